use adxl345::{Adxl345, Adxl345Error};
use aht10::{Aht10, Aht10Error, Measurement};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_time::Delay;
use embedded_hal::digital::PinState;
use linux_embedded_hal::gpio_cdev::{errors::Error as GpioError, Chip, LineRequestFlags, MultiLineHandle};
use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use linux_embedded_hal::{CdevPin, I2CError, I2cdev};
#[allow(unused_imports)]
use log::{debug, error, info, warn};

use super::{Accelerometer, Hygrometer, PinBank, SetupError};
use crate::config;

pub type I2cBus = BlockingAsync<I2cdev>;
pub type I2cBusError = I2CError;

pub type AccelerometerType = Adxl345<I2cBus>;
pub type AccelerometerError = Adxl345Error<I2cBusError>;
pub type HygrometerType = Aht10<I2cBus, Delay>;
pub type HygrometerError = Aht10Error<I2cBusError>;

pub type OutputPinType = CdevPin;
pub type PinBankType = LinuxPinBank;

#[derive(Debug)]
pub enum PlatformError {
    I2c(LinuxI2CError),
    Gpio(GpioError),
}

impl From<GpioError> for PlatformError {
    fn from(err: GpioError) -> Self {
        PlatformError::Gpio(err)
    }
}

impl From<GpioError> for SetupError {
    fn from(err: GpioError) -> Self {
        SetupError::Gpio(PlatformError::Gpio(err))
    }
}

impl Accelerometer<AccelerometerError> for AccelerometerType {
    async fn read_acceleration(&mut self) -> Result<[f32; 3], AccelerometerError> {
        self.accel_norm().await
    }
}

impl Hygrometer<HygrometerError> for HygrometerType {
    async fn read_measurement(&mut self) -> Result<Measurement, HygrometerError> {
        self.read().await
    }
}

/// Lines requested as one handle so every write lands at once
pub struct LinuxPinBank {
    handle: MultiLineHandle,
    pins: Vec<u8>,
}

impl PinBank for LinuxPinBank {
    type Error = GpioError;

    fn set_all(&mut self, level: PinState) -> Result<(), GpioError> {
        let value = match level {
            PinState::High => 1,
            PinState::Low => 0,
        };
        let values = vec![value; self.pins.len()];
        self.handle.set_values(&values)
    }

    fn pins(&self) -> &[u8] {
        &self.pins
    }

    fn release(self) {
        debug!("releasing lines for pins {:?}", self.pins);
        drop(self.handle);
    }
}

pub fn open_i2c_bus(bus: u8) -> Result<I2cBus, SetupError> {
    let path = config::i2c_device_path(bus);
    let dev = I2cdev::new(&path).map_err(|e| SetupError::BusOpen {
        bus,
        source: PlatformError::I2c(e),
    })?;
    debug!("opened {}", path);
    Ok(BlockingAsync::new(dev))
}

pub async fn open_accelerometer(bus: u8) -> Result<AccelerometerType, SetupError> {
    let i2c = open_i2c_bus(bus)?;
    let mut acc = Adxl345::with_address(i2c, config::ACCELEROMETER_ADDRESS);
    if !acc.is_adxl345().await.map_err(SetupError::Accelerometer)? {
        warn!("device at {:#04x} on bus {} is not an ADXL345", config::ACCELEROMETER_ADDRESS, bus);
    }
    acc.init().await.map_err(SetupError::Accelerometer)?;
    Ok(acc)
}

pub fn open_hygrometer(bus: u8) -> Result<HygrometerType, SetupError> {
    let i2c = open_i2c_bus(bus)?;
    Ok(Aht10::with_address(i2c, Delay, config::HYGROMETER_ADDRESS))
}

fn line_offset(pin: u8) -> Result<u32, SetupError> {
    config::board_pin_line(pin).ok_or(SetupError::UnknownPin(pin))
}

pub fn open_output_pin(pin: u8) -> Result<OutputPinType, SetupError> {
    let offset = line_offset(pin)?;
    let mut chip = Chip::new(config::GPIO_CHIP)?;
    let handle = chip
        .get_line(offset)?
        .request(LineRequestFlags::OUTPUT, 0, config::GPIO_CONSUMER)?;
    let pin = CdevPin::new(handle)?;
    Ok(pin)
}

/// Request every pin LOW in a single call. Either all lines are granted or
/// none are held.
pub fn open_pin_bank(pins: &[u8]) -> Result<PinBankType, SetupError> {
    let offsets = pins.iter().map(|p| line_offset(*p)).collect::<Result<Vec<_>, _>>()?;
    let mut chip = Chip::new(config::GPIO_CHIP)?;
    let defaults = vec![0u8; offsets.len()];
    let handle = chip
        .get_lines(&offsets)?
        .request(LineRequestFlags::OUTPUT, &defaults, config::GPIO_CONSUMER)?;
    Ok(LinuxPinBank {
        handle,
        pins: pins.to_vec(),
    })
}
