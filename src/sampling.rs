use core::fmt;

use embassy_time::{Duration, Timer};
#[allow(unused_imports)]
use log::{debug, error, info, warn};

use crate::platform::{Accelerometer, Hygrometer, Measurement};

pub fn format_acceleration(g: &[f32; 3]) -> String {
    format!("X: {:.4} g, Y: {:.4} g, Z: {:.4} g", g[0], g[1], g[2])
}

pub fn format_measurement(m: &Measurement) -> String {
    format!("Humidity: {:.1}% | Temperature: {:.1}°F", m.humidity, m.fahrenheit)
}

/// Read and print `samples` accelerations, sleeping `interval` after each.
///
/// There is no retry: the first failed read ends sampling and is returned.
pub async fn sample_acceleration<A, E>(acc: &mut A, samples: u32, interval: Duration) -> Result<u32, E>
where
    A: Accelerometer<E>,
{
    for n in 0..samples {
        let g = acc.read_acceleration().await?;
        debug!("sample {}/{}", n + 1, samples);
        info!("{}", format_acceleration(&g));
        Timer::after(interval).await;
    }
    Ok(samples)
}

/// One humidity/temperature cycle. Every failure is logged and the cycle's
/// result is simply absent.
pub async fn sample_climate<H, E>(sensor: &mut H) -> Option<Measurement>
where
    H: Hygrometer<E>,
    E: fmt::Display,
{
    match sensor.read_measurement().await {
        Ok(m) => {
            info!("{}", format_measurement(&m));
            Some(m)
        }
        Err(e) => {
            error!("Error reading sensor: {}", e);
            warn!("Failed to read sensor data.");
            None
        }
    }
}
