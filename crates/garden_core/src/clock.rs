//! Time source used for entity timestamps and time-based ids.

use crate::model::timestamp::Timestamp;
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock, truncated to milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Settable clock; clones share the same current instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance_millis(&self, millis: i64) {
        self.now.set(self.now.get().plus_millis(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock};
    use crate::model::timestamp::Timestamp;

    #[test]
    fn manual_clock_clones_observe_advances() {
        let clock = ManualClock::new(Timestamp::from_epoch_millis(1_000).unwrap());
        let observer = clock.clone();

        clock.advance_millis(250);
        assert_eq!(observer.now().epoch_millis(), 1_250);

        observer.set(Timestamp::from_epoch_millis(10).unwrap());
        assert_eq!(clock.now().epoch_millis(), 10);
    }
}
