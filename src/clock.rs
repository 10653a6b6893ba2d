//! Deterministic clock for status derivation and reports.
//!
//! Production code takes any [`mockable::Clock`]; [`FixedClock`] pins "now"
//! for tests and for reports generated as of a chosen date.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use mockable::Clock;

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock pinned to `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Creates a clock pinned to midnight UTC on `date`.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Returns the pinned UTC date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.instant.date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.instant.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.instant
    }
}
