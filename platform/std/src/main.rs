use clap::Parser;
use embassy_executor::Spawner;
use log::*;
use traffic_light::tasks::{actuating_task, button_driver_task, sensing_task, shared_delay};
use traffic_light::{Config, Strategy, VERSION};

/// Host simulation of the button-controlled traffic light.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
    /// Channel between the button and LED tasks: raw-shared, queue, mutex or signaled
    #[clap(long, default_value = "mutex")]
    strategy: Strategy,

    /// How long each simulated press lasts
    #[clap(long, default_value_t = 3000)]
    press_ms: u64,

    /// Time between simulated presses
    #[clap(long, default_value_t = 5000)]
    release_ms: u64,

    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::default().with_strategy(args.strategy);
    info!("traffic-light {} (host), strategy {}", VERSION, config.strategy);

    let channel = shared_delay(&config);

    spawner.spawn(button_driver_task(args.press_ms, args.release_ms).unwrap());
    spawner.spawn(sensing_task(config, channel).unwrap());
    spawner.spawn(actuating_task(channel).unwrap());
}
