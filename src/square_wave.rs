use core::convert::Infallible;
use core::fmt;

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use embedded_hal::digital::OutputPin;
#[allow(unused_imports)]
use log::{debug, info, trace};

use crate::duration_from_secs;
use crate::shutdown::StopFlag;

/// Software-timed square wave parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareWave {
    frequency_hz: f64,
    duty_cycle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveformError {
    InvalidFrequency(f64),
    InvalidDutyCycle(f64),
}

impl fmt::Display for WaveformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveformError::InvalidFrequency(hz) => write!(f, "frequency must be above 0 Hz, got {}", hz),
            WaveformError::InvalidDutyCycle(d) => write!(f, "duty cycle must be within 0..=100 %, got {}", d),
        }
    }
}

/// How long each level is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveTiming {
    pub high: Duration,
    pub low: Duration,
}

impl SquareWave {
    pub fn new(frequency_hz: f64, duty_cycle: f64) -> Result<Self, WaveformError> {
        if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
            return Err(WaveformError::InvalidFrequency(frequency_hz));
        }
        if !(0.0..=100.0).contains(&duty_cycle) {
            return Err(WaveformError::InvalidDutyCycle(duty_cycle));
        }
        Ok(Self { frequency_hz, duty_cycle })
    }

    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    pub fn duty_cycle(&self) -> f64 {
        self.duty_cycle
    }

    pub fn period_secs(&self) -> f64 {
        1.0 / self.frequency_hz
    }

    pub fn high_secs(&self) -> f64 {
        self.period_secs() * (self.duty_cycle / 100.0)
    }

    /// Whatever is left of the period, so high + low is always one period
    pub fn low_secs(&self) -> f64 {
        self.period_secs() - self.high_secs()
    }

    /// Both levels rounded to the microsecond
    pub fn timing(&self) -> WaveTiming {
        WaveTiming {
            high: duration_from_secs(self.high_secs()).unwrap_or(Duration::MIN),
            low: duration_from_secs(self.low_secs()).unwrap_or(Duration::MIN),
        }
    }
}

async fn drive<P: OutputPin>(pin: &mut P, timing: WaveTiming, periods: &mut u64) -> Result<Infallible, P::Error> {
    loop {
        pin.set_high()?;
        Timer::after(timing.high).await;
        pin.set_low()?;
        Timer::after(timing.low).await;
        *periods += 1;
    }
}

/// Toggle `pin` HIGH then LOW until `stop` fires. A stop cuts the current
/// sleep short and leaves the pin at whatever level it was last driven to.
///
/// Returns the number of completed periods.
pub async fn generate<P: OutputPin>(pin: &mut P, timing: WaveTiming, stop: &StopFlag) -> Result<u64, P::Error> {
    debug!("high {} us, low {} us", timing.high.as_micros(), timing.low.as_micros());
    let mut periods = 0;
    let outcome = select(drive(pin, timing, &mut periods), stop.wait()).await;
    match outcome {
        Either::First(Err(e)) => Err(e),
        Either::First(Ok(never)) => match never {},
        Either::Second(()) => {
            info!("stopped after {} periods", periods);
            Ok(periods)
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embedded_hal::digital::{ErrorKind, ErrorType, PinState};

    use super::*;

    struct RecordingPin<'a> {
        levels: Vec<PinState>,
        stop_after: usize,
        fail_after: Option<usize>,
        stop: &'a StopFlag,
    }

    impl<'a> RecordingPin<'a> {
        fn new(stop: &'a StopFlag, stop_after: usize) -> Self {
            Self {
                levels: Vec::new(),
                stop_after,
                fail_after: None,
                stop,
            }
        }

        fn record(&mut self, level: PinState) -> Result<(), ErrorKind> {
            if self.fail_after == Some(self.levels.len()) {
                return Err(ErrorKind::Other);
            }
            self.levels.push(level);
            if self.levels.len() == self.stop_after {
                self.stop.request_stop();
            }
            Ok(())
        }
    }

    impl ErrorType for RecordingPin<'_> {
        type Error = ErrorKind;
    }

    impl OutputPin for RecordingPin<'_> {
        fn set_low(&mut self) -> Result<(), ErrorKind> {
            self.record(PinState::Low)
        }

        fn set_high(&mut self) -> Result<(), ErrorKind> {
            self.record(PinState::High)
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn fifty_percent_splits_the_period_evenly() {
        let wave = SquareWave::new(100.0, 50.0).unwrap();
        assert_eq!(wave.high_secs(), 0.005);
        assert_eq!(wave.low_secs(), 0.005);
        let timing = wave.timing();
        assert_eq!(timing.high, Duration::from_micros(5_000));
        assert_eq!(timing.low, timing.high);
    }

    #[test]
    fn quarter_duty_cycle() {
        let wave = SquareWave::new(100.0, 25.0).unwrap();
        assert!(close(wave.high_secs(), 0.0025));
        assert!(close(wave.low_secs(), 0.0075));
        let timing = wave.timing();
        assert_eq!(timing.high.as_micros(), 2_500);
        assert_eq!(timing.low.as_micros(), 7_500);
    }

    #[test]
    fn high_plus_low_is_one_period() {
        for hz in [1.0, 3.0, 7.0, 100.0, 1000.0, 12_345.0] {
            for duty in [0.0, 1.0, 10.0, 33.3, 50.0, 66.6, 99.0, 100.0] {
                let wave = SquareWave::new(hz, duty).unwrap();
                let period = wave.high_secs() + wave.low_secs();
                assert!(close(period, 1.0 / hz), "{} Hz {} %", hz, duty);
                assert!(close(wave.high_secs() / period, duty / 100.0), "{} Hz {} %", hz, duty);
            }
        }
    }

    #[test]
    fn rejects_nonsense_parameters() {
        assert_eq!(SquareWave::new(0.0, 50.0), Err(WaveformError::InvalidFrequency(0.0)));
        assert_eq!(SquareWave::new(-5.0, 50.0), Err(WaveformError::InvalidFrequency(-5.0)));
        assert!(SquareWave::new(f64::NAN, 50.0).is_err());
        assert!(SquareWave::new(f64::INFINITY, 50.0).is_err());
        assert_eq!(SquareWave::new(100.0, 100.5), Err(WaveformError::InvalidDutyCycle(100.5)));
        assert_eq!(SquareWave::new(100.0, -1.0), Err(WaveformError::InvalidDutyCycle(-1.0)));
        assert!(SquareWave::new(100.0, f64::NAN).is_err());
    }

    #[test]
    fn alternates_high_low_until_stopped() {
        let stop = StopFlag::new();
        let mut pin = RecordingPin::new(&stop, 6);
        let timing = SquareWave::new(2_000.0, 50.0).unwrap().timing();

        let periods = block_on(generate(&mut pin, timing, &stop)).unwrap();

        // the stop lands on the sixth write, during the third LOW sleep
        assert_eq!(periods, 2);
        assert_eq!(
            pin.levels,
            [
                PinState::High,
                PinState::Low,
                PinState::High,
                PinState::Low,
                PinState::High,
                PinState::Low
            ]
        );
    }

    #[test]
    fn pin_failure_ends_generation() {
        let stop = StopFlag::new();
        let mut pin = RecordingPin::new(&stop, usize::MAX);
        pin.fail_after = Some(3);
        let timing = SquareWave::new(5_000.0, 20.0).unwrap().timing();

        assert_eq!(block_on(generate(&mut pin, timing, &stop)), Err(ErrorKind::Other));
        assert_eq!(pin.levels.len(), 3);
        assert!(!stop.is_stopped());
    }
}
