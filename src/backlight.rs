//! Display backlight.

use esp_hal::gpio::{
    Level,
    Output,
    OutputConfig,
};

use crate::BacklightResources;

/// The LCD backlight. Starts switched off so the first frame is not shown
/// half drawn.
pub struct Backlight {
    pin: Output<'static>,
}

impl From<BacklightResources<'static>> for Backlight {
    fn from(res: BacklightResources<'static>) -> Self {
        Self {
            pin: Output::new(res.led, Level::Low, OutputConfig::default()),
        }
    }
}

impl Backlight {
    pub fn on(&mut self) {
        self.pin.set_high();
    }
}
