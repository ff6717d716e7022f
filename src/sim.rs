//! Host stand-ins for the board's GPIO.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use portable_atomic::{AtomicBool, Ordering};

use crate::log::*;

/// Level of the simulated button, written by the button driver task.
pub static BUTTON_PRESSED: AtomicBool = AtomicBool::new(false);

/// Button that reads a shared flag.
pub struct SimButton {
    pressed: &'static AtomicBool,
}

impl SimButton {
    pub fn new(pressed: &'static AtomicBool) -> Self {
        Self { pressed }
    }

    pub fn press(&self, pressed: bool) {
        self.pressed.store(pressed, Ordering::Relaxed);
    }
}

impl ErrorType for SimButton {
    type Error = Infallible;
}

impl InputPin for SimButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed.load(Ordering::Relaxed))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed.load(Ordering::Relaxed))
    }
}

/// LED that logs when its level changes.
pub struct LogLed {
    name: &'static str,
    high: bool,
}

impl LogLed {
    pub fn new(name: &'static str) -> Self {
        Self { name, high: false }
    }

    pub fn is_set_high(&self) -> bool {
        self.high
    }

    fn set(&mut self, high: bool) {
        if self.high != high {
            debug!("{} {}", self.name, if high { "on" } else { "off" });
        }
        self.high = high;
    }
}

impl ErrorType for LogLed {
    type Error = Infallible;
}

impl OutputPin for LogLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}
