use embassy_executor::Spawner;
use jetson_io::shutdown::{self, StopFlag};
use jetson_io::{config, platform, toggler};
#[allow(unused_imports)]
use log::{debug, error, info, warn};

static STOP: StopFlag = StopFlag::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    jetson_io::init_logger();

    if let Err(e) = shutdown::install_handler(&STOP) {
        error!("could not install signal handler: {}", e);
        std::process::exit(0);
    }

    // nothing is held if this fails, the request is all or nothing
    let bank = match platform::open_pin_bank(&config::TOGGLE_PINS) {
        Ok(bank) => bank,
        Err(e) => {
            error!("{}", e);
            std::process::exit(0);
        }
    };

    if let Ok(cycles) = toggler::toggle_until_stopped(bank, &STOP, config::TOGGLE_HALF_PERIOD).await {
        debug!("{} cycles", cycles);
    }
    std::process::exit(0);
}
