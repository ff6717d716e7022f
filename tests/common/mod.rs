//! Discrete-event harness: both task loops run under one `block_on`, and
//! virtual time only moves forward once every task is asleep.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::future::poll_fn;
use std::rc::Rc;
use std::task::Poll;

use embassy_futures::block_on;
use embassy_futures::join::join3;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use traffic_light::actuating::{self, PhaseOutputs};
use traffic_light::{sensing, AnyChannel, Config, DelayChannel, PhaseDelay, Shutdown, Strategy};

pub type Levels = Rc<RefCell<[bool; 3]>>;

/// One actuating-task sleep, with the LED levels at the moment it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sleep {
    pub at: u64,
    pub ms: u32,
    pub levels: [bool; 3],
}

#[derive(Default)]
pub struct SimClock {
    now: Cell<u64>,
    deadlines: RefCell<Vec<u64>>,
    sleeps: RefCell<Vec<Sleep>>,
}

impl SimClock {
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    async fn sleep(&self, ms: u64) {
        let deadline = self.now() + ms;
        self.deadlines.borrow_mut().push(deadline);
        poll_fn(|_| {
            if self.now() >= deadline {
                let mut deadlines = self.deadlines.borrow_mut();
                if let Some(i) = deadlines.iter().position(|&d| d == deadline) {
                    deadlines.swap_remove(i);
                }
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }

    /// Plain sleeper.
    pub fn delay(&self) -> SimDelay<'_> {
        SimDelay {
            clock: self,
            probe: None,
        }
    }

    /// Sleeper that records every `delay_ms` together with the LED levels.
    pub fn probe(&self, levels: Levels) -> SimDelay<'_> {
        SimDelay {
            clock: self,
            probe: Some(levels),
        }
    }

    /// Moves time to the earliest deadline whenever every task is asleep.
    /// Requests shutdown once `end` is reached and finishes when the last
    /// sleeper is gone.
    pub async fn run_until(&self, end: u64, shutdown: &Shutdown) {
        poll_fn(|_| {
            if self.now() >= end {
                shutdown.request();
            }
            let next = self.deadlines.borrow().iter().copied().min();
            match next {
                None if shutdown.is_requested() => Poll::Ready(()),
                None => Poll::Pending,
                Some(deadline) => {
                    if deadline > self.now() {
                        self.now.set(deadline);
                    }
                    Poll::Pending
                }
            }
        })
        .await
    }

    pub fn take_sleeps(&self) -> Vec<Sleep> {
        self.sleeps.take()
    }
}

pub struct SimDelay<'a> {
    clock: &'a SimClock,
    probe: Option<Levels>,
}

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.sleep(u64::from(ns) / 1_000_000).await
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.sleep(u64::from(us) / 1_000).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        if let Some(levels) = &self.probe {
            self.clock.sleeps.borrow_mut().push(Sleep {
                at: self.clock.now(),
                ms,
                levels: *levels.borrow(),
            });
        }
        self.clock.sleep(u64::from(ms)).await
    }
}

/// Button whose level is a function of virtual time.
pub struct ScriptedButton<'a> {
    clock: &'a SimClock,
    script: Box<dyn Fn(u64) -> bool>,
}

impl ErrorType for ScriptedButton<'_> {
    type Error = Infallible;
}

impl InputPin for ScriptedButton<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok((self.script)(self.clock.now()))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

pub struct Line {
    levels: Levels,
    index: usize,
}

impl ErrorType for Line {
    type Error = Infallible;
}

impl OutputPin for Line {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut()[self.index] = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut()[self.index] = true;
        Ok(())
    }
}

/// Channel wrapper that timestamps every publish and fetch.
pub struct Recording<'a, C> {
    clock: &'a SimClock,
    inner: C,
    published: RefCell<Vec<(u64, PhaseDelay)>>,
    fetched: RefCell<Vec<(u64, PhaseDelay)>>,
}

impl<C: DelayChannel> DelayChannel for Recording<'_, C> {
    async fn publish(&self, delay: PhaseDelay) {
        self.published.borrow_mut().push((self.clock.now(), delay));
        self.inner.publish(delay).await
    }

    async fn fetch(&self) -> PhaseDelay {
        let delay = self.inner.fetch().await;
        self.fetched.borrow_mut().push((self.clock.now(), delay));
        delay
    }
}

pub struct Run {
    pub sleeps: Vec<Sleep>,
    pub published: Vec<(u64, PhaseDelay)>,
    pub fetched: Vec<(u64, PhaseDelay)>,
}

/// Run both tasks with `strategy` until virtual time `end`.
pub fn simulate(strategy: Strategy, button: impl Fn(u64) -> bool + 'static, end: u64) -> Run {
    let _ = env_logger::builder().is_test(true).try_init();

    let clock = SimClock::default();
    let shutdown = Shutdown::new();
    let config = Config::default().with_strategy(strategy);

    let channel = Recording {
        clock: &clock,
        inner: AnyChannel::<NoopRawMutex>::new(config.strategy, config.initial),
        published: RefCell::new(Vec::new()),
        fetched: RefCell::new(Vec::new()),
    };

    let levels: Levels = Rc::new(RefCell::new([false; 3]));
    let line = |index| Line {
        levels: levels.clone(),
        index,
    };
    let mut outputs = PhaseOutputs::new(line(0), line(1), line(2));
    let mut button = ScriptedButton {
        clock: &clock,
        script: Box::new(button),
    };
    let mut sensing_delay = clock.delay();
    let mut actuating_delay = clock.probe(levels.clone());

    let (sensed, actuated, ()) = block_on(join3(
        sensing::run(&config, &mut button, &channel, &mut sensing_delay, &shutdown),
        actuating::run(&mut outputs, &channel, &mut actuating_delay, &shutdown),
        clock.run_until(end, &shutdown),
    ));
    sensed.unwrap();
    actuated.unwrap();

    Run {
        sleeps: clock.take_sleeps(),
        published: channel.published.take(),
        fetched: channel.fetched.take(),
    }
}

/// Phases go green, yellow, red in order with exactly one line lit.
pub fn assert_phase_sequence(sleeps: &[Sleep]) {
    const EXPECTED: [[bool; 3]; 3] = [
        [true, false, false],
        [false, true, false],
        [false, false, true],
    ];
    for (n, sleep) in sleeps.iter().enumerate() {
        assert_eq!(
            sleep.levels,
            EXPECTED[n % 3],
            "sleep {} at {} ms has levels {:?}",
            n,
            sleep.at,
            sleep.levels
        );
    }
}
