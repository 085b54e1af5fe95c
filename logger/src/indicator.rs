use tracing::debug;

/// RGB color for the status pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

pub const BLACK: Color = Color(0, 0, 0);
pub const RED: Color = Color(255, 0, 0);
pub const GREEN: Color = Color(0, 255, 0);
pub const BLUE: Color = Color(0, 0, 255);
pub const YELLOW: Color = Color(255, 255, 0);
pub const ORANGE: Color = Color(173, 9, 0);

/// Status pixel plus optional readout panel. Fire-and-forget: the hardware
/// never reports failure back to the control loop.
pub trait Indicator {
    fn set_color(&mut self, color: Color);
    fn show(&mut self, text: &str);
}

/// Logs transitions instead of driving a pixel. Used where no indicator
/// hardware is attached; a NeoPixel or display driver plugs in behind the
/// same trait.
pub struct ConsoleIndicator;

impl Indicator for ConsoleIndicator {
    fn set_color(&mut self, color: Color) {
        debug!("indicator color ({}, {}, {})", color.0, color.1, color.2);
    }

    fn show(&mut self, text: &str) {
        debug!("display: {}", text);
    }
}
