//! Delay sharing between the sensing task and the actuating task.
//!
//! Every strategy implements [`DelayChannel`]. The sensing task is the only
//! publisher and the actuating task the only consumer, so all of them are
//! single-producer / single-consumer.

use core::fmt;
use core::str::FromStr;

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::PhaseDelay;

mod mutex_guarded;
mod queue;
mod raw_shared;
mod signaled;

pub use mutex_guarded::MutexGuarded;
pub use queue::QueueChannel;
pub use raw_shared::RawShared;
pub use signaled::Signaled;

/// Publish / fetch contract for the shared delay.
#[allow(async_fn_in_trait)]
pub trait DelayChannel {
    /// Make `delay` the value seen by the next fetch.
    async fn publish(&self, delay: PhaseDelay);

    /// Current delay. Never waits for a publish; returns the previously
    /// fetched value when nothing new is available.
    async fn fetch(&self) -> PhaseDelay;
}

impl<C: DelayChannel> DelayChannel for &C {
    async fn publish(&self, delay: PhaseDelay) {
        (**self).publish(delay).await
    }

    async fn fetch(&self) -> PhaseDelay {
        (**self).fetch().await
    }
}

/// Selects a channel implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub enum Strategy {
    /// Unsynchronized word, see [`RawShared`].
    RawShared,
    /// Single-slot queue, see [`QueueChannel`].
    Queue,
    /// Lock-guarded cell, see [`MutexGuarded`].
    #[default]
    Mutex,
    /// Overwriting mailbox, see [`Signaled`].
    Signaled,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::RawShared,
        Strategy::Queue,
        Strategy::Mutex,
        Strategy::Signaled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Strategy::RawShared => "raw-shared",
            Strategy::Queue => "queue",
            Strategy::Mutex => "mutex",
            Strategy::Signaled => "signaled",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStrategy;

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy, expected one of: raw-shared, queue, mutex, signaled"
        )
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownStrategy)
    }
}

/// Any of the strategies, chosen at runtime.
pub enum AnyChannel<M: RawMutex> {
    RawShared(RawShared),
    Queue(QueueChannel<M>),
    Mutex(MutexGuarded<M>),
    Signaled(Signaled<M>),
}

impl<M: RawMutex> AnyChannel<M> {
    pub const fn new(strategy: Strategy, initial: PhaseDelay) -> Self {
        match strategy {
            Strategy::RawShared => AnyChannel::RawShared(RawShared::new(initial)),
            Strategy::Queue => AnyChannel::Queue(QueueChannel::new(initial)),
            Strategy::Mutex => AnyChannel::Mutex(MutexGuarded::new(initial)),
            Strategy::Signaled => AnyChannel::Signaled(Signaled::new(initial)),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            AnyChannel::RawShared(_) => Strategy::RawShared,
            AnyChannel::Queue(_) => Strategy::Queue,
            AnyChannel::Mutex(_) => Strategy::Mutex,
            AnyChannel::Signaled(_) => Strategy::Signaled,
        }
    }
}

impl<M: RawMutex> DelayChannel for AnyChannel<M> {
    async fn publish(&self, delay: PhaseDelay) {
        match self {
            AnyChannel::RawShared(c) => c.publish(delay).await,
            AnyChannel::Queue(c) => c.publish(delay).await,
            AnyChannel::Mutex(c) => c.publish(delay).await,
            AnyChannel::Signaled(c) => c.publish(delay).await,
        }
    }

    async fn fetch(&self) -> PhaseDelay {
        match self {
            AnyChannel::RawShared(c) => c.fetch().await,
            AnyChannel::Queue(c) => c.fetch().await,
            AnyChannel::Mutex(c) => c.fetch().await,
            AnyChannel::Signaled(c) => c.fetch().await,
        }
    }
}
