use embassy_time::{Duration, Timer};
use embedded_hal::digital::PinState;
#[allow(unused_imports)]
use log::{debug, error, info, warn};

use crate::platform::PinBank;
use crate::shutdown::StopFlag;

async fn toggle<B: PinBank>(bank: &mut B, stop: &StopFlag, half_period: Duration) -> Result<u32, B::Error> {
    let mut cycles = 0;
    while !stop.is_stopped() {
        bank.set_all(PinState::High)?;
        info!("Pins ON");
        Timer::after(half_period).await;

        bank.set_all(PinState::Low)?;
        info!("Pins OFF");
        Timer::after(half_period).await;

        cycles += 1;
    }
    Ok(cycles)
}

/// Drive every pin of `bank` HIGH, then LOW, each for `half_period`, until
/// `stop` is set. The flag is only looked at between full cycles, so a cycle
/// that has started always finishes.
///
/// The bank is released exactly once on every exit path. Returns the number
/// of completed cycles.
pub async fn toggle_until_stopped<B: PinBank>(mut bank: B, stop: &StopFlag, half_period: Duration) -> Result<u32, B::Error> {
    let pins = bank
        .pins()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    info!("Toggling pins: {}. Press Ctrl+C to exit.", pins);

    let result = toggle(&mut bank, stop, half_period).await;
    if let Err(e) = &result {
        error!("An error occurred during GPIO operation: {:?}", e);
    }

    bank.release();
    info!("GPIO cleanup completed.");
    result
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use embassy_futures::block_on;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Set(PinState),
        Released,
    }

    struct RecordingBank<'a> {
        pins: Vec<u8>,
        events: Rc<RefCell<Vec<Event>>>,
        stop: &'a StopFlag,
        stop_on_write: Option<usize>,
        fail_on_write: Option<usize>,
        writes: usize,
    }

    impl<'a> RecordingBank<'a> {
        fn new(stop: &'a StopFlag) -> (Self, Rc<RefCell<Vec<Event>>>) {
            let events = Rc::new(RefCell::new(Vec::new()));
            let bank = Self {
                pins: vec![7, 29, 31, 11, 36, 16, 18, 13],
                events: events.clone(),
                stop,
                stop_on_write: None,
                fail_on_write: None,
                writes: 0,
            };
            (bank, events)
        }
    }

    impl PinBank for RecordingBank<'_> {
        type Error = &'static str;

        fn set_all(&mut self, level: PinState) -> Result<(), Self::Error> {
            self.writes += 1;
            if self.fail_on_write == Some(self.writes) {
                return Err("line busy");
            }
            self.events.borrow_mut().push(Event::Set(level));
            if self.stop_on_write == Some(self.writes) {
                self.stop.request_stop();
            }
            Ok(())
        }

        fn pins(&self) -> &[u8] {
            &self.pins
        }

        fn release(self) {
            self.events.borrow_mut().push(Event::Released);
        }
    }

    const HIGH: Event = Event::Set(PinState::High);
    const LOW: Event = Event::Set(PinState::Low);

    #[test]
    fn stop_between_iterations_ends_the_loop_and_releases_once() {
        let stop = StopFlag::new();
        let (mut bank, events) = RecordingBank::new(&stop);
        // requested while the second cycle is HIGH
        bank.stop_on_write = Some(3);

        let cycles = block_on(toggle_until_stopped(bank, &stop, Duration::from_micros(200))).unwrap();

        assert_eq!(cycles, 2);
        assert_eq!(*events.borrow(), [HIGH, LOW, HIGH, LOW, Event::Released]);
    }

    #[test]
    fn already_stopped_touches_nothing_but_still_cleans_up() {
        let stop = StopFlag::new();
        stop.request_stop();
        let (bank, events) = RecordingBank::new(&stop);

        let cycles = block_on(toggle_until_stopped(bank, &stop, Duration::from_secs(1))).unwrap();

        assert_eq!(cycles, 0);
        assert_eq!(*events.borrow(), [Event::Released]);
    }

    #[test]
    fn write_failure_still_releases_the_bank() {
        let stop = StopFlag::new();
        let (mut bank, events) = RecordingBank::new(&stop);
        bank.fail_on_write = Some(4);

        let result = block_on(toggle_until_stopped(bank, &stop, Duration::from_micros(100)));

        assert_eq!(result, Err("line busy"));
        assert_eq!(*events.borrow(), [HIGH, LOW, HIGH, Event::Released]);
        let released = events.borrow().iter().filter(|e| **e == Event::Released).count();
        assert_eq!(released, 1);
    }
}
