use embassy_executor::Spawner;
use jetson_io::config::{SQUARE_WAVE_DUTY_CYCLE, SQUARE_WAVE_FREQUENCY_HZ, SQUARE_WAVE_PIN};
use jetson_io::shutdown::{self, StopFlag};
use jetson_io::square_wave::{self, SquareWave};
use jetson_io::platform;
#[allow(unused_imports)]
use log::{debug, error, info, warn};

static STOP: StopFlag = StopFlag::new();

async fn run() {
    let wave = match SquareWave::new(SQUARE_WAVE_FREQUENCY_HZ, SQUARE_WAVE_DUTY_CYCLE) {
        Ok(wave) => wave,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let mut pin = match platform::open_output_pin(SQUARE_WAVE_PIN) {
        Ok(pin) => pin,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
    info!("GPIO {} configured for output.", SQUARE_WAVE_PIN);

    info!(
        "Generating {} Hz square wave with {}% duty cycle on GPIO {}.",
        wave.frequency_hz(),
        wave.duty_cycle(),
        SQUARE_WAVE_PIN
    );
    match square_wave::generate(&mut pin, wave.timing(), &STOP).await {
        Ok(_) => warn!("CTRL+C detected. Stopping square wave generation."),
        Err(e) => error!("GPIO write failed: {:?}", e),
    }

    drop(pin);
    info!("GPIO cleaned up.");
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    jetson_io::init_logger();

    match shutdown::install_handler(&STOP) {
        Ok(()) => run().await,
        Err(e) => error!("could not install signal handler: {}", e),
    }
    std::process::exit(0);
}
