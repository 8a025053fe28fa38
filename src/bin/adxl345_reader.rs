use argh::FromArgs;
use embassy_executor::Spawner;
use jetson_io::{config, platform, sampling};
#[allow(unused_imports)]
use log::{debug, error, info, warn};

#[derive(FromArgs)]
/// Read data from ADXL345 on I2C bus 7 at address 0x53.
struct Args {
    /// number of samples to read
    #[argh(option, default = "config::DEFAULT_SAMPLES")]
    samples: u32,

    /// interval between samples in seconds
    #[argh(option, default = "config::DEFAULT_SAMPLE_INTERVAL_SECS")]
    interval: f32,
}

async fn run(args: Args) {
    let Some(interval) = jetson_io::duration_from_secs(f64::from(args.interval)) else {
        error!("--interval must be a non-negative number of seconds, got {}", args.interval);
        return;
    };

    let mut acc = match platform::open_accelerometer(config::ACCELEROMETER_I2C_BUS).await {
        Ok(acc) => acc,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
    info!("ADXL345 initialized. Reading data...");

    if let Err(e) = sampling::sample_acceleration(&mut acc, args.samples, interval).await {
        error!("I2C communication error: {:?}", e);
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    jetson_io::init_logger();
    let args: Args = argh::from_env();

    run(args).await;
    std::process::exit(0);
}
