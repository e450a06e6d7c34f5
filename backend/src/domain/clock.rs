//! Source of "now" for the booking wizard.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Today's date, which is what past-day checks compare against
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Midnight of `date`
    pub fn on(date: NaiveDate) -> Self {
        Self::at(date.and_time(NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
