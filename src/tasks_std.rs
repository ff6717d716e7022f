use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Timer};
use portable_atomic::Ordering;
use static_cell::StaticCell;

use crate::actuating::{self, PhaseOutputs};
use crate::config::{ACTUATING_TASK_NAME, SENSING_TASK_NAME};
use crate::log::*;
use crate::sensing;
use crate::sim::{LogLed, SimButton, BUTTON_PRESSED};
use crate::{AnyChannel, Config, Shutdown};

pub type SharedDelay = AnyChannel<CriticalSectionRawMutex>;

/// Never requested by the simulator; the tasks run until the process exits.
pub static SHUTDOWN: Shutdown = Shutdown::new();

static SHARED_DELAY: StaticCell<SharedDelay> = StaticCell::new();

/// Create the process-wide channel. Panics if called twice.
pub fn shared_delay(config: &Config) -> &'static SharedDelay {
    SHARED_DELAY.init(SharedDelay::new(config.strategy, config.initial))
}

#[embassy_executor::task]
pub async fn sensing_task(config: Config, channel: &'static SharedDelay) {
    info!("{} started, polling every {} ms", SENSING_TASK_NAME, config.poll_interval_ms);
    let mut button = SimButton::new(&BUTTON_PRESSED);
    if let Err(e) = sensing::run(&config, &mut button, channel, &mut Delay, &SHUTDOWN).await {
        error!("{}: {}", SENSING_TASK_NAME, e);
    }
}

#[embassy_executor::task]
pub async fn actuating_task(channel: &'static SharedDelay) {
    info!("{} started", ACTUATING_TASK_NAME);
    let mut outputs =
        PhaseOutputs::new(LogLed::new("green"), LogLed::new("yellow"), LogLed::new("red"));
    if let Err(e) = actuating::run(&mut outputs, channel, &mut Delay, &SHUTDOWN).await {
        error!("{}: {}", ACTUATING_TASK_NAME, e);
    }
}

/// Presses and releases the simulated button on a fixed schedule.
#[embassy_executor::task]
pub async fn button_driver_task(press_ms: u64, release_ms: u64) -> ! {
    loop {
        Timer::after_millis(release_ms).await;
        BUTTON_PRESSED.store(true, Ordering::Relaxed);
        info!("button pressed");

        Timer::after_millis(press_ms).await;
        BUTTON_PRESSED.store(false, Ordering::Relaxed);
        info!("button released");
    }
}
