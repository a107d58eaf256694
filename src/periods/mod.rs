//! Lazy period streams.
//!
//! Every stream is a plain [`Iterator`] built fresh per query; nothing is computed
//! until it is pulled.

mod linear;

pub use linear::{Dated, Linear, Selector};

use crate::business_hours::BusinessHours;
use crate::time_segment::TimeSegment;
use chrono::{DateTime, NaiveDate, Utc};

pub type PeriodIter<'a> = Box<dyn Iterator<Item = TimeSegment> + 'a>;

/// A segment tagged with the local date it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedPeriod {
    pub date: NaiveDate,
    pub segment: TimeSegment,
}

impl DatedPeriod {
    pub fn new(date: NaiveDate, segment: TimeSegment) -> Self {
        Self { date, segment }
    }
}

impl Dated for DatedPeriod {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Entry point for `periods().after(t)` / `periods().before(t)`.
pub struct Periods<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S> Periods<'a, S>
where
    S: BusinessHours + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Periods ending after `origin`, ascending; the first one starts no earlier
    /// than `origin`.
    pub fn after(&self, origin: DateTime<Utc>) -> PeriodIter<'a> {
        self.source.periods_after(origin)
    }

    /// Periods starting before `origin`, descending; the first one ends no later
    /// than `origin`.
    pub fn before(&self, origin: DateTime<Utc>) -> PeriodIter<'a> {
        self.source.periods_before(origin)
    }
}
