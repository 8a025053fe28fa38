//! A platform agnostic driver for the AHT10 humidity and temperature sensor
//!
//! This driver is built using [`embedded-hal-async`](docs.rs/embedded-hal-async) traits.
//!
//! # Examples
//!
//! ```ignore
//! use aht10::Aht10;
//! // depends on your board
//! let i2c = todo!("Create the I2C interface");
//! let delay = todo!("Create a delay that implements `embedded_hal_async::delay::DelayNs`");
//! let mut sensor = Aht10::new(i2c, delay);
//!
//! match sensor.read().await {
//!     Ok(m) => log::info!("{}% {}F", m.humidity, m.fahrenheit),
//!     Err(aht10::Aht10Error::NotReady) => log::warn!("busy"),
//!     Err(e) => log::error!("{:?}", e),
//! }
//! ```

#![no_std]

use core::fmt;

use log::{debug, trace};

/// Default I2C address
pub const ADDRESS: u8 = 0x38;

/// Trigger measurement command
pub const CMD_TRIGGER: u8 = 0xAC;

/// Register the six result bytes are read from
pub const REG_DATA: u8 = 0x00;

/// Time the sensor needs after a trigger before the result is valid
pub const MEASUREMENT_TIME_MS: u32 = 100;

/// Bit 7 of the status byte: conversion still in progress
const STATUS_BUSY: u8 = 1 << 7;

/// 2^20, full scale of both 20 bit fields
const FULL_SCALE: f64 = 1_048_576.0;

pub struct Aht10<Bus, Delay> {
    bus: Bus,
    delay: Delay,
    address: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aht10Error<BusError> {
    BusError(BusError),
    /// Status byte reported a conversion in progress
    NotReady,
}

impl<BusError> From<BusError> for Aht10Error<BusError> {
    fn from(err: BusError) -> Self {
        Aht10Error::BusError(err)
    }
}

impl<BusError: fmt::Debug> fmt::Display for Aht10Error<BusError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aht10Error::BusError(e) => write!(f, "bus error: {:?}", e),
            Aht10Error::NotReady => f.write_str("Sensor not ready"),
        }
    }
}

/// The status byte had its busy bit set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotReady;

/// Unscaled 20 bit fields as packed by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMeasurement {
    pub humidity: u32,
    pub temperature: u32,
}

impl RawMeasurement {
    /// Unpack the humidity and temperature fields. `data[0]` is the status
    /// byte and is not inspected here.
    pub fn unpack(data: &[u8; 6]) -> Self {
        let humidity = (u32::from(data[1]) << 12) | (u32::from(data[2]) << 4) | (u32::from(data[3]) >> 4);
        let temperature = (u32::from(data[3] & 0x0F) << 16) | (u32::from(data[4]) << 8) | u32::from(data[5]);
        Self { humidity, temperature }
    }

    /// Relative humidity in percent
    pub fn humidity_percent(&self) -> f64 {
        f64::from(self.humidity) / FULL_SCALE * 100.0
    }

    /// Temperature in degrees Celsius
    pub fn celsius(&self) -> f64 {
        f64::from(self.temperature) / FULL_SCALE * 200.0 - 50.0
    }
}

/// One decoded sample, every field rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Relative humidity, percent
    pub humidity: f64,
    /// Degrees Celsius
    pub celsius: f64,
    /// Degrees Fahrenheit
    pub fahrenheit: f64,
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Round to one decimal, exact ties to even
fn round_tenth(value: f64) -> f64 {
    libm::rint(value * 10.0) / 10.0
}

/// Decode the status byte and the five data bytes read after a trigger.
pub fn decode_measurement(data: &[u8; 6]) -> Result<Measurement, NotReady> {
    if data[0] & STATUS_BUSY != 0 {
        return Err(NotReady);
    }

    let raw = RawMeasurement::unpack(data);
    let celsius = raw.celsius();

    Ok(Measurement {
        humidity: round_tenth(raw.humidity_percent()),
        celsius: round_tenth(celsius),
        fahrenheit: round_tenth(celsius_to_fahrenheit(celsius)),
    })
}

impl<I2C, D> Aht10<I2C, D>
where
    I2C: embedded_hal_async::i2c::I2c,
    D: embedded_hal_async::delay::DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, ADDRESS)
    }

    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self { bus: i2c, delay, address }
    }

    /// Start a one-shot conversion
    pub async fn trigger_measurement(&mut self) -> Result<(), Aht10Error<I2C::Error>> {
        debug!("trigger {:#04x}", CMD_TRIGGER);
        self.bus.write(self.address, &[CMD_TRIGGER]).await?;
        Ok(())
    }

    /// Status byte followed by the five data bytes
    pub async fn read_raw(&mut self) -> Result<[u8; 6], Aht10Error<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.bus.write_read(self.address, &[REG_DATA], &mut buf).await?;
        trace!("raw {:02x?}", buf);
        Ok(buf)
    }

    /// Trigger, wait for the conversion and decode the result.
    /// There is no retry when the sensor is still busy.
    pub async fn read(&mut self) -> Result<Measurement, Aht10Error<I2C::Error>> {
        self.trigger_measurement().await?;
        self.delay.delay_ms(MEASUREMENT_TIME_MS).await;
        let data = self.read_raw().await?;
        decode_measurement(&data).map_err(|NotReady| Aht10Error::NotReady)
    }

    pub fn release(self) -> (I2C, D) {
        (self.bus, self.delay)
    }
}
