mod tests {
    use myrtio_status_light::color::{
        BLACK, Rgb, blend_colors, lerp8, level_to_brightness, scale, scale8_f,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0.0), RED);
        assert_eq!(blend_colors(RED, BLUE, 1.0), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 0.5),
            Rgb {
                r: 127,
                g: 0,
                b: 127
            }
        );

        assert_eq!(blend_colors(WHITE, BLACK, 1.0), BLACK);
        assert_eq!(blend_colors(WHITE, BLACK, 0.0), WHITE);
    }

    #[test]
    fn test_lerp8_clamps_progress() {
        assert_eq!(lerp8(10, 20, -1.0), 10);
        assert_eq!(lerp8(10, 20, 2.0), 20);
        assert_eq!(lerp8(200, 100, 0.5), 150);
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale8_f(255, 0.5), 127);
        assert_eq!(scale8_f(255, 1.0), 255);
        assert_eq!(scale8_f(255, 1.5), 255);
        assert_eq!(scale8_f(255, -1.0), 0);
        assert_eq!(
            scale(Rgb::new(255, 128, 0), 0.5),
            Rgb {
                r: 127,
                g: 64,
                b: 0
            }
        );
        assert_eq!(scale(WHITE, 0.0), BLACK);
    }

    #[test]
    fn test_level_to_brightness() {
        assert_eq!(level_to_brightness(0), 0.0);
        assert_eq!(level_to_brightness(255), 1.0);
        assert!((level_to_brightness(0x7F) - 0.498).abs() < 1e-3);
    }
}
