use core::fmt;

use embedded_hal::digital::PinState;

pub use aht10::Measurement;

#[cfg(all(target_os = "linux", not(feature = "mock")))]
mod linux;
#[cfg(all(target_os = "linux", not(feature = "mock")))]
pub use linux::*;

#[cfg(any(test, not(target_os = "linux"), feature = "mock"))]
#[cfg_attr(all(test, target_os = "linux", not(feature = "mock")), allow(dead_code))]
mod mock;
#[cfg(any(not(target_os = "linux"), feature = "mock"))]
pub use mock::*;

#[allow(async_fn_in_trait)]
pub trait Accelerometer<E> {
    /// Acceleration in g, x y z
    async fn read_acceleration(&mut self) -> Result<[f32; 3], E>;
}

#[allow(async_fn_in_trait)]
pub trait Hygrometer<E> {
    async fn read_measurement(&mut self) -> Result<Measurement, E>;
}

/// A fixed set of output lines that are always written together.
pub trait PinBank {
    type Error: fmt::Debug;

    /// Drive every line to `level` in one request
    fn set_all(&mut self, level: PinState) -> Result<(), Self::Error>;

    /// Physical pin numbers, in request order
    fn pins(&self) -> &[u8];

    /// Give the lines back to the kernel. Consumes the bank so nothing can
    /// be written afterwards.
    fn release(self);
}

/// Failures while acquiring a bus or pins, before any loop starts
#[derive(Debug)]
pub enum SetupError {
    BusOpen { bus: u8, source: PlatformError },
    Accelerometer(AccelerometerError),
    Gpio(PlatformError),
    UnknownPin(u8),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::BusOpen { bus, source } => write!(
                f,
                "Could not open I2C bus {}. Ensure the device is connected. ({:?})",
                bus, source
            ),
            SetupError::Accelerometer(e) => write!(f, "I2C communication error: {:?}", e),
            SetupError::Gpio(e) => write!(
                f,
                "Failed to initialize GPIO pins: {:?}. Please check if you have the necessary \
                 permissions or if another process is using the pins.",
                e
            ),
            SetupError::UnknownPin(pin) => write!(f, "header pin {} is not a GPIO", pin),
        }
    }
}
