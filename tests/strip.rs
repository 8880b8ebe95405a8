mod tests {
    use myrtio_status_light::{LightStrip, Rgb, SmartLedsStrip};
    use smart_leds::SmartLedsWrite;

    #[derive(Default)]
    struct MockWriter {
        written: Vec<Rgb>,
        fail: bool,
    }

    impl SmartLedsWrite for MockWriter {
        type Error = &'static str;
        type Color = Rgb;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            if self.fail {
                return Err("bus error");
            }
            self.written = iterator.into_iter().map(Into::into).collect();
            Ok(())
        }
    }

    #[test]
    fn test_write_forwards_colors() {
        let mut strip = SmartLedsStrip::new(MockWriter::default());
        let colors = [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)];
        strip.write(&colors);

        assert_eq!(strip.into_inner().written, colors.to_vec());
    }

    #[test]
    fn test_write_error_is_swallowed() {
        let mut strip = SmartLedsStrip::new(MockWriter {
            fail: true,
            ..MockWriter::default()
        });
        strip.write(&[Rgb::new(1, 2, 3)]);

        assert!(strip.into_inner().written.is_empty());
    }
}
