use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use super::DelayChannel;
use crate::PhaseDelay;

/// Delay cell that is only touched with its lock held.
///
/// Both sides wait for the lock without a timeout. The critical section is a
/// single copy, so the wait is never longer than that.
pub struct MutexGuarded<M: RawMutex> {
    cell: Mutex<M, PhaseDelay>,
}

impl<M: RawMutex> MutexGuarded<M> {
    pub const fn new(initial: PhaseDelay) -> Self {
        Self {
            cell: Mutex::new(initial),
        }
    }
}

impl<M: RawMutex> DelayChannel for MutexGuarded<M> {
    async fn publish(&self, delay: PhaseDelay) {
        let mut cell = self.cell.lock().await;
        *cell = delay;
    }

    async fn fetch(&self) -> PhaseDelay {
        let cell = self.cell.lock().await;
        *cell
    }
}
