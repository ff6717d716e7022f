//! Board and timing configuration.

use crate::{PhaseDelay, Strategy};

// ===================================================================
// Timing
// ===================================================================

pub const FAST_DELAY_MS: u32 = 100; // button held
pub const SLOW_DELAY_MS: u32 = 1000; // button released
pub const INITIAL_DELAY_MS: u32 = SLOW_DELAY_MS;
pub const POLL_INTERVAL_MS: u32 = 100; // button sampling period

// ===================================================================
// Tasks
// ===================================================================

pub const SENSING_TASK_NAME: &str = "BUTTON_TASK";
pub const ACTUATING_TASK_NAME: &str = "LED_TASK";

/// Runtime configuration shared by both tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub struct Config {
    /// Published while the button reads high.
    pub fast: PhaseDelay,
    /// Published while the button reads low.
    pub slow: PhaseDelay,
    /// Channel contents before the first publish.
    pub initial: PhaseDelay,
    pub poll_interval_ms: u32,
    pub strategy: Strategy,
}

impl Config {
    pub const fn new(strategy: Strategy) -> Self {
        Self {
            fast: PhaseDelay::FAST,
            slow: PhaseDelay::SLOW,
            initial: PhaseDelay::INITIAL,
            poll_interval_ms: POLL_INTERVAL_MS,
            strategy,
        }
    }

    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_board_firmware() {
        let config = Config::default();
        assert_eq!(config.fast.as_millis(), 100);
        assert_eq!(config.slow.as_millis(), 1000);
        assert_eq!(config.initial, config.slow);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.strategy, Strategy::Mutex);
    }

    #[test]
    fn with_strategy_keeps_timing() {
        let config = Config::default().with_strategy(Strategy::Queue);
        assert_eq!(config.strategy, Strategy::Queue);
        assert_eq!(config.fast, PhaseDelay::FAST);
    }
}
