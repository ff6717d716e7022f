//! Button polling task.
//!
//! Samples the button once per poll interval and publishes the matching
//! delay, but only when it differs from the last value this task published.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::channel::DelayChannel;
use crate::log::*;
use crate::{Config, Error, PhaseDelay, Shutdown};

/// Edge-triggered mapping from button level to delay.
///
/// Synchronous so that a timer callback can drive it as well as the task
/// loop.
#[derive(Debug, Clone)]
pub struct Sampler {
    fast: PhaseDelay,
    slow: PhaseDelay,
    last_published: PhaseDelay,
}

impl Sampler {
    /// The channel starts out holding `config.initial`, so that counts as
    /// already published.
    pub fn new(config: &Config) -> Self {
        Self {
            fast: config.fast,
            slow: config.slow,
            last_published: config.initial,
        }
    }

    pub fn desired(&self, pressed: bool) -> PhaseDelay {
        if pressed {
            self.fast
        } else {
            self.slow
        }
    }

    /// Returns the delay to publish, or `None` when nothing changed.
    pub fn sample(&mut self, pressed: bool) -> Option<PhaseDelay> {
        let desired = self.desired(pressed);
        if desired == self.last_published {
            return None;
        }
        self.last_published = desired;
        Some(desired)
    }

    pub fn last_published(&self) -> PhaseDelay {
        self.last_published
    }
}

/// Poll `button` until `shutdown` is requested.
pub async fn run<I, C, D>(
    config: &Config,
    button: &mut I,
    channel: &C,
    delay: &mut D,
    shutdown: &Shutdown,
) -> Result<(), Error<I::Error>>
where
    I: InputPin,
    C: DelayChannel,
    D: DelayNs,
{
    let mut sampler = Sampler::new(config);

    while !shutdown.is_requested() {
        let pressed = button.is_high().map_err(Error::Input)?;
        trace!("button sample: {}", pressed);

        if let Some(next) = sampler.sample(pressed) {
            debug!(
                "button {}, publishing {} ms",
                if pressed { "pressed" } else { "released" },
                next.as_millis()
            );
            channel.publish(next).await;
        }

        delay.delay_ms(config.poll_interval_ms).await;
    }

    info!("sensing task stopped");
    Ok(())
}
