use core::fmt;

/// Task loop error. Carries the pin driver's own error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum Error<PinE> {
    /// Reading the button failed.
    Input(PinE),
    /// Driving an LED line failed.
    Output(PinE),
}

impl<PinE: fmt::Debug> fmt::Display for Error<PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Input(e) => write!(f, "input pin error: {:?}", e),
            Error::Output(e) => write!(f, "output pin error: {:?}", e),
        }
    }
}
