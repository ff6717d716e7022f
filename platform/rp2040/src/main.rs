#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use traffic_light::tasks::{actuating_task, sensing_task, shared_delay};
use traffic_light::{Config, Strategy, VERSION};
use {defmt_rtt as _, panic_probe as _};

#[macro_use]
mod resources;
use resources::*;

#[cfg(feature = "raw-shared")]
const STRATEGY: Strategy = Strategy::RawShared;
#[cfg(all(feature = "queue", not(feature = "raw-shared")))]
const STRATEGY: Strategy = Strategy::Queue;
#[cfg(all(
    feature = "signaled",
    not(any(feature = "raw-shared", feature = "queue"))
))]
const STRATEGY: Strategy = Strategy::Signaled;
#[cfg(not(any(feature = "raw-shared", feature = "queue", feature = "signaled")))]
const STRATEGY: Strategy = Strategy::Mutex;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    let config = Config::new(STRATEGY);
    info!("traffic-light {}, strategy {}", VERSION, config.strategy.as_str());

    let button = Input::new(r.button.pin, Pull::Down);
    let green = Output::new(r.leds.green, Level::Low);
    let yellow = Output::new(r.leds.yellow, Level::Low);
    let red = Output::new(r.leds.red, Level::Low);

    let channel = shared_delay(&config);

    spawner.spawn(unwrap!(sensing_task(config, button, channel)));
    spawner.spawn(unwrap!(actuating_task(green, yellow, red, channel)));
}
