#![allow(non_camel_case_types)]

/// Primary I2C address, `ALT ADDRESS` pin tied low
pub const PRIMARY_ADDRESS: u8 = 0x53;
/// Alternate I2C address, `ALT ADDRESS` pin tied high
pub const ALTERNATE_ADDRESS: u8 = 0x1D;

/// Expected `DEVID` content
pub const DEVICE_ID: u8 = 0xE5;

/// Full resolution, +/-2g: 4 mg/LSB
pub const SCALE_G_PER_LSB: f32 = 0.004;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    DEVID = 0x00,
    POWER_CTL = 0x2D,
    DATA_FORMAT = 0x31,
    DATAX0 = 0x32,
}

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// POWER_CTL
pub const MEASURE: u8 = 0b0000_1000;

// DATA_FORMAT
pub const FULL_RES: u8 = 0b0000_1000;
