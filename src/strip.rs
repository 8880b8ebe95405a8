use core::fmt::Debug;

use smart_leds::SmartLedsWrite;

use crate::LightStrip;
use crate::color::Rgb;
use crate::log::log;

/// [`LightStrip`] over any `smart-leds` driver
///
/// Write errors are logged and dropped; the next frame simply tries again.
pub struct SmartLedsStrip<W> {
    writer: W,
}

impl<W> SmartLedsStrip<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> LightStrip for SmartLedsStrip<W>
where
    W: SmartLedsWrite,
    W::Color: From<Rgb>,
    W::Error: Debug,
{
    fn write(&mut self, colors: &[Rgb]) {
        if let Err(error) = self.writer.write(colors.iter().copied()) {
            log!("[SmartLedsStrip.write] failed: {:?}", error);
        }
    }
}
