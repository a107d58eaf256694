use crate::calculation::{self, ForDuration, TimeUnit};
use crate::dates::Dates;
use crate::periods::{PeriodIter, Periods};
use crate::zone::Zone;
use chrono::{DateTime, TimeDelta, Utc};

/// Anything that can answer business-time queries.
///
/// Implementors provide the two directional period streams and their break and
/// holiday lookups; every other query is derived from the streams.
pub trait BusinessHours {
    /// Zone used to turn periods into local dates.
    fn zone(&self) -> Zone;

    fn periods_after(&self, origin: DateTime<Utc>) -> PeriodIter<'_>;

    fn periods_before(&self, origin: DateTime<Utc>) -> PeriodIter<'_>;

    /// How far a search may run past its last progress point without finding a
    /// period before giving up.
    fn search_horizon(&self) -> TimeDelta;

    /// Whether `time` falls inside a break, `[start, end)`.
    fn on_break(&self, time: DateTime<Utc>) -> bool;

    /// Whether the local date of `time` is a holiday.
    fn on_holiday(&self, time: DateTime<Utc>) -> bool;

    fn periods(&self) -> Periods<'_, Self> {
        Periods::new(self)
    }

    fn dates(&self) -> Dates<'_, Self> {
        Dates::new(self)
    }

    /// `amount` of business time in `unit`; negative amounts run backward.
    fn time(&self, amount: i64, unit: TimeUnit) -> ForDuration<'_, Self> {
        ForDuration::new(self, unit.duration(amount))
    }

    /// Business time elapsed between two instants, in either order.
    fn within(&self, first: DateTime<Utc>, second: DateTime<Utc>) -> TimeDelta {
        calculation::within(self, first, second)
    }

    fn in_hours(&self, time: DateTime<Utc>) -> bool {
        self.periods_after(time)
            .next()
            .is_some_and(|period| period.contains(time))
    }

    fn business_hours(&self, time: DateTime<Utc>) -> bool {
        self.in_hours(time)
    }
}
