use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU32, Ordering};

use super::DelayChannel;
use crate::PhaseDelay;

/// Overwriting mailbox.
///
/// [`Signaled::set`] is synchronous and never waits, so it can be called from
/// a timer callback or an interrupt handler as well as from the sensing task.
/// A newer value always replaces an unread one.
pub struct Signaled<M: RawMutex> {
    signal: Signal<M, PhaseDelay>,
    last: AtomicU32,
}

impl<M: RawMutex> Signaled<M> {
    pub const fn new(initial: PhaseDelay) -> Self {
        Self {
            signal: Signal::new(),
            last: AtomicU32::new(initial.as_millis()),
        }
    }

    pub fn set(&self, delay: PhaseDelay) {
        self.signal.signal(delay);
    }

    /// Take the newest value if one arrived since the last take.
    pub fn try_fetch(&self) -> Option<PhaseDelay> {
        let delay = self.signal.try_take()?;
        self.last.store(delay.as_millis(), Ordering::Release);
        Some(delay)
    }

    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }
}

impl<M: RawMutex> DelayChannel for Signaled<M> {
    async fn publish(&self, delay: PhaseDelay) {
        self.set(delay);
    }

    async fn fetch(&self) -> PhaseDelay {
        match self.try_fetch() {
            Some(delay) => delay,
            None => PhaseDelay::from_millis(self.last.load(Ordering::Acquire)),
        }
    }
}
