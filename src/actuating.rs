//! LED cycle task.
//!
//! Drives Green → Yellow → Red forever. The delay is fetched once at the
//! start of each full cycle and used for all three phases, so a change
//! published mid-cycle shows up on the next Green.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::channel::DelayChannel;
use crate::log::*;
use crate::{Error, Shutdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum Phase {
    Green,
    Yellow,
    Red,
}

impl Phase {
    /// One full cycle, in order.
    pub const CYCLE: [Phase; 3] = [Phase::Green, Phase::Yellow, Phase::Red];

    /// Position of this phase's line in [`PhaseOutputs`].
    pub const fn index(self) -> usize {
        match self {
            Phase::Green => 0,
            Phase::Yellow => 1,
            Phase::Red => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Green => "green",
            Phase::Yellow => "yellow",
            Phase::Red => "red",
        }
    }
}

/// The three LED lines, indexed by [`Phase::index`].
pub struct PhaseOutputs<O: OutputPin> {
    lines: [O; 3],
}

impl<O: OutputPin> PhaseOutputs<O> {
    /// Lines are expected to start low.
    pub fn new(green: O, yellow: O, red: O) -> Self {
        Self {
            lines: [green, yellow, red],
        }
    }

    /// Light `phase` and clear the others. The other lines are cleared
    /// before the new one is raised, so two lines are never high together.
    pub fn show(&mut self, phase: Phase) -> Result<(), O::Error> {
        for (index, line) in self.lines.iter_mut().enumerate() {
            if index != phase.index() {
                line.set_low()?;
            }
        }
        self.lines[phase.index()].set_high()
    }

    pub fn into_inner(self) -> [O; 3] {
        self.lines
    }
}

/// Cycle the LEDs until `shutdown` is requested.
pub async fn run<O, C, D>(
    outputs: &mut PhaseOutputs<O>,
    channel: &C,
    delay: &mut D,
    shutdown: &Shutdown,
) -> Result<(), Error<O::Error>>
where
    O: OutputPin,
    C: DelayChannel,
    D: DelayNs,
{
    let mut cycles: u32 = 0;

    'cycle: while !shutdown.is_requested() {
        let period = channel.fetch().await;
        debug!("cycle {}: {} ms per phase", cycles, period.as_millis());

        for phase in Phase::CYCLE {
            if shutdown.is_requested() {
                break 'cycle;
            }
            outputs.show(phase).map_err(Error::Output)?;
            trace!("{} for {} ms", phase.name(), period.as_millis());
            if period.as_millis() == 0 {
                embassy_futures::yield_now().await;
            } else {
                delay.delay_ms(period.as_millis()).await;
            }
        }
        cycles = cycles.wrapping_add(1);
    }

    info!("actuating task stopped after {} cycles", cycles);
    Ok(())
}
