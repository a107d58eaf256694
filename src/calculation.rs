use crate::business_hours::BusinessHours;
use crate::schedule::ScheduleError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    /// A business day of 1440 minutes.
    Days,
}

impl TimeUnit {
    pub fn seconds(&self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 60 * 60,
            TimeUnit::Days => 24 * 60 * 60,
        }
    }

    /// `amount` of this unit, saturating at the limits of `TimeDelta`.
    pub fn duration(&self, amount: i64) -> TimeDelta {
        amount
            .checked_mul(self.seconds())
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(if amount < 0 {
                TimeDelta::MIN
            } else {
                TimeDelta::MAX
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeUnitError(String);

impl fmt::Display for ParseTimeUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown time unit '{}'", self.0)
    }
}

impl std::error::Error for ParseTimeUnitError {}

impl FromStr for TimeUnit {
    type Err = ParseTimeUnitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "second" | "seconds" | "sec" | "secs" | "s" => Ok(TimeUnit::Seconds),
            "minute" | "minutes" | "min" | "mins" | "m" => Ok(TimeUnit::Minutes),
            "hour" | "hours" | "h" => Ok(TimeUnit::Hours),
            "day" | "days" | "d" => Ok(TimeUnit::Days),
            _ => Err(ParseTimeUnitError(value.to_string())),
        }
    }
}

/// A fixed amount of business time, positioned relative to an instant.
pub struct ForDuration<'a, S: ?Sized> {
    source: &'a S,
    duration: TimeDelta,
}

impl<'a, S> ForDuration<'a, S>
where
    S: BusinessHours + ?Sized,
{
    pub fn new(source: &'a S, duration: TimeDelta) -> Self {
        Self { source, duration }
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// The instant at which the business time elapsed since `origin` reaches the
    /// duration. A zero duration snaps to the start of the next period.
    pub fn after(&self, origin: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        if self.duration < TimeDelta::zero() {
            return self.reversed().before(origin);
        }

        let mut periods = self.source.periods_after(origin);
        if self.duration == TimeDelta::zero() {
            return periods
                .next()
                .map(|period| period.start())
                .ok_or_else(|| self.unbounded(origin));
        }

        let mut remaining = self.duration;
        for period in periods {
            let available = period.duration();
            if remaining <= available {
                return Ok(period.start() + remaining);
            }
            remaining -= available;
        }
        Err(self.unbounded(origin))
    }

    /// Mirror of [`ForDuration::after`]: a zero duration snaps to the end of the
    /// previous period.
    pub fn before(&self, origin: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        if self.duration < TimeDelta::zero() {
            return self.reversed().after(origin);
        }

        let mut periods = self.source.periods_before(origin);
        if self.duration == TimeDelta::zero() {
            return periods
                .next()
                .map(|period| period.end())
                .ok_or_else(|| self.unbounded(origin));
        }

        let mut remaining = self.duration;
        for period in periods {
            let available = period.duration();
            if remaining <= available {
                return Ok(period.end() - remaining);
            }
            remaining -= available;
        }
        Err(self.unbounded(origin))
    }

    fn reversed(&self) -> Self {
        Self::new(self.source, self.duration.abs())
    }

    fn unbounded(&self, origin: DateTime<Utc>) -> ScheduleError {
        let horizon = self.source.search_horizon();
        log::warn!(
            "no business time left for {}s from {origin}; search horizon {}d",
            self.duration.num_seconds(),
            horizon.num_days()
        );
        ScheduleError::UnboundedSearch { origin, horizon }
    }
}

pub(crate) fn within<S>(source: &S, first: DateTime<Utc>, second: DateTime<Utc>) -> TimeDelta
where
    S: BusinessHours + ?Sized,
{
    let (start, end) = if first <= second {
        (first, second)
    } else {
        (second, first)
    };
    source
        .periods_after(start)
        .take_while(|period| period.start() < end)
        .map(|period| period.clip_before(end).duration())
        .fold(TimeDelta::zero(), |total, elapsed| total + elapsed)
}
