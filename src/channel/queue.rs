use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::{Channel, TrySendError};
use portable_atomic::{AtomicU32, Ordering};

use super::DelayChannel;
use crate::log::*;
use crate::PhaseDelay;

/// Single-slot message queue.
///
/// Neither side ever waits on the queue. [`QueueChannel::try_publish`] and
/// [`QueueChannel::try_fetch`] return immediately on full / empty.
/// [`DelayChannel::publish`] coalesces: if the previous value has not been
/// consumed yet it is discarded and replaced, so a consumer that fetches after
/// two publishes sees the second one. [`DelayChannel::fetch`] falls back to
/// the last value it received when the slot is empty.
///
/// Replacing an unread value and dequeueing both run under `swap`, so a
/// fetch never lands between the two halves of a replacement.
pub struct QueueChannel<M: RawMutex> {
    slot: Channel<M, PhaseDelay, 1>,
    swap: Mutex<M, ()>,
    /// Consumer side memory. Only written by the fetching task.
    last: AtomicU32,
}

impl<M: RawMutex> QueueChannel<M> {
    pub const fn new(initial: PhaseDelay) -> Self {
        Self {
            slot: Channel::new(),
            swap: Mutex::new(()),
            last: AtomicU32::new(initial.as_millis()),
        }
    }

    /// Enqueue without waiting. Hands the value back if the slot is taken.
    pub fn try_publish(&self, delay: PhaseDelay) -> Result<(), PhaseDelay> {
        self.slot.try_send(delay).map_err(|e| match e {
            TrySendError::Full(delay) => delay,
        })
    }

    /// Dequeue without waiting. `None` if nothing was published since the
    /// last successful fetch.
    pub fn try_fetch(&self) -> Option<PhaseDelay> {
        self.swap.lock(|_| {
            let delay = self.slot.try_receive().ok()?;
            self.last.store(delay.as_millis(), Ordering::Release);
            Some(delay)
        })
    }

    /// Whether a published value is waiting for the consumer.
    pub fn is_pending(&self) -> bool {
        !self.slot.is_empty()
    }

    /// Last value handed to the consumer.
    pub fn last_fetched(&self) -> PhaseDelay {
        PhaseDelay::from_millis(self.last.load(Ordering::Acquire))
    }
}

impl<M: RawMutex> DelayChannel for QueueChannel<M> {
    async fn publish(&self, delay: PhaseDelay) {
        self.swap.lock(|_| {
            let Err(delay) = self.try_publish(delay) else {
                return;
            };
            if let Ok(stale) = self.slot.try_receive() {
                debug!(
                    "queue: replacing unread {} ms with {} ms",
                    stale.as_millis(),
                    delay.as_millis()
                );
            }
            if self.try_publish(delay).is_err() {
                // Only possible with a second publisher using try_publish.
                warn!("queue: dropped {} ms, slot refilled", delay.as_millis());
            }
        })
    }

    async fn fetch(&self) -> PhaseDelay {
        self.try_fetch().unwrap_or_else(|| self.last_fetched())
    }
}
