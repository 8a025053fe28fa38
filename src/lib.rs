//! Sensor and GPIO demo programs for a Jetson carrier board.
//!
//! Each binary in `src/bin` is a standalone program; this crate holds what
//! they share: the platform seam, the timing loops and the stop flag.

use embassy_time::Duration;

pub mod config;
pub mod platform;
pub mod sampling;
pub mod shutdown;
pub mod square_wave;
pub mod toggler;

/// `RUST_LOG` wins, `info` otherwise
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Seconds to a microsecond-rounded [`Duration`]. `None` for negative,
/// NaN or infinite input.
pub fn duration_from_secs(secs: f64) -> Option<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Some(Duration::from_micros((secs * 1_000_000.0).round() as u64))
}
