//! Platform-agnostic ADXL345 accelerometer driver which talks I2C via
//! [embedded-hal-async].
//!
//! The device is configured for full resolution in the +/-2g range, where one
//! LSB is 4 mg.
//!
//! [embedded-hal-async]: https://docs.rs/embedded-hal-async

#![no_std]
#![forbid(unsafe_code)]

mod reg;

use cast::f32;

use crate::reg::*;
pub use crate::reg::{ALTERNATE_ADDRESS, DEVICE_ID, PRIMARY_ADDRESS, SCALE_G_PER_LSB};

#[allow(unused)]
use log::{debug, info, trace};

/// `ADXL345` driver
pub struct Adxl345<Bus> {
    bus: Bus,
    address: u8,
}

#[derive(Debug, Clone, Copy)]
pub enum Adxl345Error<BusError> {
    BusError(BusError),
}

impl<BusError> From<BusError> for Adxl345Error<BusError> {
    fn from(err: BusError) -> Self {
        Adxl345Error::BusError(err)
    }
}

/// Turns the six bytes starting at `DATAX0` into acceleration in g.
///
/// Each axis is a little-endian two's-complement `i16`.
pub fn decode_acceleration(raw: &[u8; 6]) -> [f32; 3] {
    let [x, y, z] = decode_raw(raw);
    [
        f32(x) * SCALE_G_PER_LSB,
        f32(y) * SCALE_G_PER_LSB,
        f32(z) * SCALE_G_PER_LSB,
    ]
}

fn decode_raw(raw: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_le_bytes([raw[0], raw[1]]),
        i16::from_le_bytes([raw[2], raw[3]]),
        i16::from_le_bytes([raw[4], raw[5]]),
    ]
}

impl<I2C: embedded_hal_async::i2c::I2c> Adxl345<I2C> {
    /// Create a new driver at the primary address. Nothing is sent until
    /// [`Adxl345::init`].
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, PRIMARY_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { bus: i2c, address }
    }

    /// Enable measurement and select full resolution +/-2g.
    /// `POWER_CTL`: `Measure`,
    /// `DATA_FORMAT`: `FULL_RES`
    pub async fn init(&mut self) -> Result<(), Adxl345Error<I2C::Error>> {
        self.write_reg(Register::POWER_CTL, MEASURE).await?;
        self.write_reg(Register::DATA_FORMAT, FULL_RES).await?;
        info!("ADXL345 at {:#04x} initialized", self.address);
        Ok(())
    }

    /// `DEVID` register
    pub async fn device_id(&mut self) -> Result<u8, Adxl345Error<I2C::Error>> {
        self.read_reg(Register::DEVID).await
    }

    /// `DEVID` reads back the fixed ADXL345 part id
    pub async fn is_adxl345(&mut self) -> Result<bool, Adxl345Error<I2C::Error>> {
        Ok(self.device_id().await? == DEVICE_ID)
    }

    /// Get acceleration reading from the accelerometer
    pub async fn accel_raw(&mut self) -> Result<[i16; 3], Adxl345Error<I2C::Error>> {
        let buf = self.read_data().await?;
        Ok(decode_raw(&buf))
    }

    /// Get acceleration reading in Gs
    pub async fn accel_norm(&mut self) -> Result<[f32; 3], Adxl345Error<I2C::Error>> {
        let buf = self.read_data().await?;
        Ok(decode_acceleration(&buf))
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.bus
    }

    async fn read_data(&mut self) -> Result<[u8; 6], Adxl345Error<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.read_bytes(Register::DATAX0, &mut buf).await?;
        trace!("DATAX0..DATAZ1 {:02x?}", buf);
        Ok(buf)
    }

    #[inline]
    async fn read_reg(&mut self, reg: Register) -> Result<u8, Adxl345Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read_bytes(reg, &mut buf).await?;
        Ok(buf[0])
    }

    #[inline]
    async fn read_bytes(&mut self, reg: Register, buffer: &mut [u8]) -> Result<(), Adxl345Error<I2C::Error>> {
        self.bus.write_read(self.address, &[reg.addr()], buffer).await?;
        Ok(())
    }

    #[inline]
    async fn write_reg(&mut self, reg: Register, val: u8) -> Result<(), Adxl345Error<I2C::Error>> {
        debug!("write {:?} <- {:#04x}", reg, val);
        self.bus.write(self.address, &[reg.addr(), val]).await?;
        Ok(())
    }
}
