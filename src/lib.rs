#![cfg_attr(not(test), no_std)]

#[cfg(feature = "rp2040")]
pub use defmt as log;

#[cfg(not(feature = "rp2040"))]
pub use log;

#[cfg(feature = "rp2040")]
pub mod tasks_rp2040;
#[cfg(feature = "rp2040")]
pub use tasks_rp2040 as tasks;

#[cfg(all(feature = "std", not(feature = "rp2040")))]
pub mod sim;
#[cfg(all(feature = "std", not(feature = "rp2040")))]
pub mod tasks_std;
#[cfg(all(feature = "std", not(feature = "rp2040")))]
pub use tasks_std as tasks;

pub mod actuating;
pub mod channel;
pub mod config;
pub mod error;
pub mod sensing;
pub mod shutdown;

pub use channel::{AnyChannel, DelayChannel, Strategy};
pub use config::Config;
pub use error::Error;
pub use shutdown::Shutdown;

pub static VERSION: &str = "v0.1";

/// How long each LED phase stays lit, in milliseconds.
///
/// This is the only value shared between the two tasks. The system only ever
/// produces [`PhaseDelay::FAST`] and [`PhaseDelay::SLOW`], but the channels
/// carry any `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub struct PhaseDelay(u32);

impl PhaseDelay {
    /// Button held.
    pub const FAST: Self = Self(config::FAST_DELAY_MS);
    /// Button released.
    pub const SLOW: Self = Self(config::SLOW_DELAY_MS);
    /// Value the channel holds before anything is published.
    pub const INITIAL: Self = Self(config::INITIAL_DELAY_MS);

    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u32 {
        self.0
    }
}

impl Default for PhaseDelay {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl From<u32> for PhaseDelay {
    fn from(millis: u32) -> Self {
        Self(millis)
    }
}

impl From<PhaseDelay> for u32 {
    fn from(delay: PhaseDelay) -> Self {
        delay.0
    }
}
