use portable_atomic::{AtomicU32, Ordering};

use super::DelayChannel;
use crate::PhaseDelay;

/// A bare shared word.
///
/// Stores and loads are `Relaxed`: there is no lock, no ordering with
/// respect to anything else the tasks do, and no notion of "new since last
/// fetch". It only works because the delay fits in one machine word, so a
/// load can never see half of a store. Kept for comparison with the
/// synchronized strategies.
pub struct RawShared {
    cell: AtomicU32,
}

impl RawShared {
    pub const fn new(initial: PhaseDelay) -> Self {
        Self {
            cell: AtomicU32::new(initial.as_millis()),
        }
    }

    pub fn store(&self, delay: PhaseDelay) {
        self.cell.store(delay.as_millis(), Ordering::Relaxed);
    }

    pub fn load(&self) -> PhaseDelay {
        PhaseDelay::from_millis(self.cell.load(Ordering::Relaxed))
    }
}

impl DelayChannel for RawShared {
    async fn publish(&self, delay: PhaseDelay) {
        self.store(delay);
    }

    async fn fetch(&self) -> PhaseDelay {
        self.load()
    }
}
