use embassy_executor::Spawner;
use embassy_time::Timer;
use jetson_io::{config, platform, sampling};
#[allow(unused_imports)]
use log::{debug, error, info, warn};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    jetson_io::init_logger();

    let mut sensor = match platform::open_hygrometer(config::HYGROMETER_I2C_BUS) {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("{}", e);
            std::process::exit(0);
        }
    };

    loop {
        sampling::sample_climate(&mut sensor).await;
        Timer::after(config::HYGROMETER_INTERVAL).await;
    }
}
