//! Time source for the engine.
//!
//! The reward engine needs "today's weekday" and the task store needs a
//! creation timestamp for ids. Both come from a [`Clock`] handed to the
//! [`Tracker`](crate::Tracker) so tests can pin the date.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Weekday};

/// Provider of the current local wall-clock time.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Productivity slot for today (Monday = 0 .. Sunday = 6).
    fn weekday_index(&self) -> usize {
        weekday_index(self.now().weekday())
    }

    /// Milliseconds since the epoch, used for task ids.
    fn now_ms(&self) -> u64 {
        self.now().and_utc().timestamp_millis().max(0) as u64
    }
}

/// Map a weekday onto the Monday-first productivity window.
pub fn weekday_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// The real local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Midnight of the given date.
    ///
    /// Falls back to the Unix epoch date when the triple is not a valid date.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
        Self::new(date.and_hms_opt(0, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
