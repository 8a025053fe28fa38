//! Board wiring and program defaults.

use embassy_time::Duration;

/// `/dev/i2c-7` on the Orin Nano header, pins 3 and 5
pub const ACCELEROMETER_I2C_BUS: u8 = 7;
pub const ACCELEROMETER_ADDRESS: u8 = adxl345::PRIMARY_ADDRESS;
pub const DEFAULT_SAMPLES: u32 = 10;
pub const DEFAULT_SAMPLE_INTERVAL_SECS: f32 = 0.5;

pub const HYGROMETER_I2C_BUS: u8 = 1;
pub const HYGROMETER_ADDRESS: u8 = aht10::ADDRESS;
pub const HYGROMETER_INTERVAL: Duration = Duration::from_secs(2);

pub const SQUARE_WAVE_PIN: u8 = 7;
pub const SQUARE_WAVE_FREQUENCY_HZ: f64 = 100.0;
pub const SQUARE_WAVE_DUTY_CYCLE: f64 = 50.0;

/// Toggled together, in this order
pub const TOGGLE_PINS: [u8; 8] = [7, 29, 31, 11, 36, 16, 18, 13];
pub const TOGGLE_HALF_PERIOD: Duration = Duration::from_secs(1);

pub const GPIO_CHIP: &str = "/dev/gpiochip0";
pub const GPIO_CONSUMER: &str = "jetson-io";

pub fn i2c_device_path(bus: u8) -> String {
    format!("/dev/i2c-{}", bus)
}

/// Physical 40-pin header number to `tegra234-gpio` line offset.
///
/// Only pins that can be driven as plain GPIO are listed.
pub fn board_pin_line(pin: u8) -> Option<u32> {
    let line = match pin {
        7 => 144,
        11 => 112,
        12 => 50,
        13 => 122,
        15 => 85,
        16 => 126,
        18 => 125,
        19 => 135,
        21 => 134,
        22 => 123,
        23 => 133,
        24 => 136,
        26 => 137,
        29 => 105,
        31 => 106,
        32 => 41,
        33 => 43,
        35 => 53,
        36 => 113,
        37 => 124,
        38 => 52,
        40 => 51,
        _ => return None,
    };
    Some(line)
}
