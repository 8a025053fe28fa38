use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
#[allow(unused_imports)]
use log::{debug, info, warn};

/// Cooperative stop request shared between a signal handler and a loop.
///
/// Loops that may only stop between iterations poll [`StopFlag::is_stopped`];
/// loops that must stop mid-sleep race their body against [`StopFlag::wait`].
pub struct StopFlag {
    stopped: AtomicBool,
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl StopFlag {
    pub const fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
            signal: Signal::new(),
        }
    }

    pub fn request_stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            self.signal.signal(());
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Resolves once a stop has been requested
    pub async fn wait(&self) {
        while !self.is_stopped() {
            self.signal.wait().await;
        }
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Route SIGINT and SIGTERM to `flag`. Can only be called once per process.
pub fn install_handler(flag: &'static StopFlag) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        warn!("Termination signal received. Exiting...");
        flag.request_stop();
    })?;
    debug!("stop handler installed");
    Ok(())
}
