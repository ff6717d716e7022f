use embassy_rp::gpio::{Input, Output};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Delay;
use static_cell::StaticCell;

use crate::actuating::{self, PhaseOutputs};
use crate::config::{ACTUATING_TASK_NAME, SENSING_TASK_NAME};
use crate::log::*;
use crate::sensing;
use crate::{AnyChannel, Config, Shutdown};

pub type SharedDelay = AnyChannel<CriticalSectionRawMutex>;

/// Never requested on the board.
pub static SHUTDOWN: Shutdown = Shutdown::new();

static SHARED_DELAY: StaticCell<SharedDelay> = StaticCell::new();

/// Create the process-wide channel. Panics if called twice.
pub fn shared_delay(config: &Config) -> &'static SharedDelay {
    SHARED_DELAY.init(SharedDelay::new(config.strategy, config.initial))
}

#[embassy_executor::task]
pub async fn sensing_task(
    config: Config,
    mut button: Input<'static>,
    channel: &'static SharedDelay,
) {
    info!("{} started, polling every {} ms", SENSING_TASK_NAME, config.poll_interval_ms);
    if let Err(e) = sensing::run(&config, &mut button, channel, &mut Delay, &SHUTDOWN).await {
        error!("{}: {:?}", SENSING_TASK_NAME, e);
    }
}

#[embassy_executor::task]
pub async fn actuating_task(
    green: Output<'static>,
    yellow: Output<'static>,
    red: Output<'static>,
    channel: &'static SharedDelay,
) {
    info!("{} started", ACTUATING_TASK_NAME);
    let mut outputs = PhaseOutputs::new(green, yellow, red);
    if let Err(e) = actuating::run(&mut outputs, channel, &mut Delay, &SHUTDOWN).await {
        error!("{}: {:?}", ACTUATING_TASK_NAME, e);
    }
}
