use std::convert::Infallible;

use adxl345::Adxl345Error;
use aht10::{Aht10Error, Measurement};
use embedded_hal::digital::{ErrorType, OutputPin, PinState};
#[allow(unused_imports)]
use log::{debug, info, trace, warn};

use super::{Accelerometer, Hygrometer, PinBank, SetupError};
use crate::config;

pub type AccelerometerType = MockAccelerometer;
pub type AccelerometerError = Adxl345Error<Infallible>;
pub type HygrometerType = MockHygrometer;
pub type HygrometerError = Aht10Error<Infallible>;

pub type OutputPinType = MockPin;
pub type PinBankType = MockPinBank;

pub type PlatformError = Infallible;

/// Gravity swinging slowly between the z and x axes, fed through the real
/// register decoder
pub struct MockAccelerometer {
    tick: u32,
}

/// Replays a fixed set of AHT10 frames, one of them still busy
pub struct MockHygrometer {
    tick: usize,
}

pub struct MockPin {
    pin: u8,
}

pub struct MockPinBank {
    pins: Vec<u8>,
}

impl MockAccelerometer {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    fn next_frame(&mut self) -> [u8; 6] {
        // 250 LSB is 1g
        let phase = (self.tick % 40) as i16;
        let x = (phase - 20) * 12;
        let z = 250 - x.abs();
        self.tick = self.tick.wrapping_add(1);

        let [x0, x1] = x.to_le_bytes();
        let [z0, z1] = z.to_le_bytes();
        [x0, x1, 0x03, 0x00, z0, z1]
    }
}

impl Default for MockAccelerometer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHygrometer {
    const FRAMES: [[u8; 6]; 4] = [
        [0x1C, 0x80, 0x00, 0x05, 0x99, 0x9A],
        [0x1C, 0x73, 0x33, 0x35, 0xC2, 0x8F],
        [0x9C, 0x00, 0x00, 0x00, 0x00, 0x00],
        [0x1C, 0x66, 0x66, 0x65, 0x47, 0xAE],
    ];

    pub fn new() -> Self {
        Self { tick: 0 }
    }
}

impl Default for MockHygrometer {
    fn default() -> Self {
        Self::new()
    }
}

impl Accelerometer<AccelerometerError> for AccelerometerType {
    async fn read_acceleration(&mut self) -> Result<[f32; 3], AccelerometerError> {
        let frame = self.next_frame();
        trace!("mock frame {:02x?}", frame);
        Ok(adxl345::decode_acceleration(&frame))
    }
}

impl Hygrometer<HygrometerError> for HygrometerType {
    async fn read_measurement(&mut self) -> Result<Measurement, HygrometerError> {
        let frame = Self::FRAMES[self.tick % Self::FRAMES.len()];
        self.tick += 1;
        aht10::decode_measurement(&frame).map_err(|_| Aht10Error::NotReady)
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        trace!("pin {} low", self.pin);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        trace!("pin {} high", self.pin);
        Ok(())
    }
}

impl PinBank for MockPinBank {
    type Error = Infallible;

    fn set_all(&mut self, level: PinState) -> Result<(), Infallible> {
        debug!("pins {:?} {:?}", self.pins, level);
        Ok(())
    }

    fn pins(&self) -> &[u8] {
        &self.pins
    }

    fn release(self) {
        debug!("released mock pins {:?}", self.pins);
    }
}

pub async fn open_accelerometer(bus: u8) -> Result<AccelerometerType, SetupError> {
    info!("mock accelerometer on bus {}", bus);
    Ok(MockAccelerometer::new())
}

pub fn open_hygrometer(bus: u8) -> Result<HygrometerType, SetupError> {
    info!("mock hygrometer on bus {}", bus);
    Ok(MockHygrometer::new())
}

pub fn open_output_pin(pin: u8) -> Result<OutputPinType, SetupError> {
    config::board_pin_line(pin).ok_or(SetupError::UnknownPin(pin))?;
    Ok(MockPin { pin })
}

pub fn open_pin_bank(pins: &[u8]) -> Result<PinBankType, SetupError> {
    for pin in pins {
        config::board_pin_line(*pin).ok_or(SetupError::UnknownPin(*pin))?;
    }
    Ok(MockPinBank { pins: pins.to_vec() })
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;

    #[test]
    fn accelerometer_reports_about_one_g() {
        let mut acc = MockAccelerometer::new();
        for _ in 0..80 {
            let [x, y, z] = block_on(acc.read_acceleration()).unwrap();
            assert!(x.abs() <= 0.96 + 1e-6);
            assert!((y - 0.012).abs() < 1e-6);
            assert!(z > 0.0 && z <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn hygrometer_cycles_through_a_busy_frame() {
        let mut sensor = MockHygrometer::new();
        let first = block_on(sensor.read_measurement()).unwrap();
        assert_eq!(first.humidity, 50.0);
        assert_eq!(first.celsius, 20.0);
        assert!(block_on(sensor.read_measurement()).is_ok());
        assert_eq!(block_on(sensor.read_measurement()), Err(Aht10Error::NotReady));
        assert!(block_on(sensor.read_measurement()).is_ok());
        assert_eq!(block_on(sensor.read_measurement()).unwrap(), first);
    }

    #[test]
    fn default_devices_start_at_the_first_frame() {
        let mut a = MockAccelerometer::default();
        let mut b = MockAccelerometer::new();
        assert_eq!(block_on(a.read_acceleration()).unwrap(), block_on(b.read_acceleration()).unwrap());
        let mut sensor = MockHygrometer::default();
        assert_eq!(block_on(sensor.read_measurement()).unwrap().humidity, 50.0);
    }

    #[test]
    fn unknown_pins_are_rejected() {
        assert!(matches!(open_output_pin(1), Err(SetupError::UnknownPin(1))));
        assert!(matches!(open_pin_bank(&[7, 2]), Err(SetupError::UnknownPin(2))));
        assert_eq!(open_pin_bank(&config::TOGGLE_PINS).unwrap().pins(), &config::TOGGLE_PINS);
    }
}
