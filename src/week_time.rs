//! Week-relative time.
//!
//! A [`WeekTime`] is a position inside the abstract seven-day cycle that starts on
//! Sunday 00:00, measured in minutes. It never names a calendar date; a [`Week`]
//! ordinal is needed to anchor it to one.

use crate::day_time::{DayTime, MINUTES_IN_DAY, MINUTES_IN_HOUR};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone, Timelike, Weekday};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::str::FromStr;

pub const DAYS_IN_WEEK: u32 = 7;
pub const MINUTES_IN_WEEK: u32 = MINUTES_IN_DAY * DAYS_IN_WEEK;

// 1969-12-28, the Sunday starting the week that contains the Unix epoch.
const EPOCH_DAYS_FROM_CE: i64 = 719_159;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekTimeError {
    /// The value has no integer projection at all.
    InvalidType { found: &'static str },
    /// The value is a string that is not an integer literal.
    InvalidFormat(String),
    /// A comparison was attempted against a value with no integer projection.
    InvalidComparison { found: &'static str },
    OutOfRange(i64),
}

impl fmt::Display for WeekTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekTimeError::InvalidType { found } => {
                write!(f, "cannot build a week time from a {found} value")
            }
            WeekTimeError::InvalidFormat(value) => {
                write!(f, "invalid week minute '{value}' (expected an integer)")
            }
            WeekTimeError::InvalidComparison { found } => {
                write!(f, "cannot compare a week time with a {found} value")
            }
            WeekTimeError::OutOfRange(minutes) => write!(
                f,
                "week minute {minutes} is outside 0..={MINUTES_IN_WEEK}"
            ),
        }
    }
}

impl std::error::Error for WeekTimeError {}

/// Minutes since the start of the week (Sunday 00:00).
///
/// Valid values are `0..=10080`. `10080` is the end-of-week marker: it belongs to
/// the first day of the following week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekTime(u32);

impl WeekTime {
    pub const START: WeekTime = WeekTime(0);
    pub const END: WeekTime = WeekTime(MINUTES_IN_WEEK);

    pub fn from_minutes(minutes: i64) -> Result<Self, WeekTimeError> {
        if !(0..=i64::from(MINUTES_IN_WEEK)).contains(&minutes) {
            return Err(WeekTimeError::OutOfRange(minutes));
        }
        Ok(Self(minutes as u32))
    }

    /// Projects an instant into the week, using the instant's own offset.
    pub fn from_datetime<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self(
            time.weekday().num_days_from_sunday() * MINUTES_IN_DAY
                + time.hour() * MINUTES_IN_HOUR
                + time.minute(),
        )
    }

    pub fn from_day_time(weekday: Weekday, day_time: DayTime) -> Self {
        Self(weekday.num_days_from_sunday() * MINUTES_IN_DAY + day_time.day_minute())
    }

    pub fn week_minute(&self) -> u32 {
        self.0
    }

    /// Day of the week, Sunday = 0. The end-of-week marker maps to Sunday.
    pub fn wday(&self) -> u32 {
        (self.0 % MINUTES_IN_WEEK) / MINUTES_IN_DAY
    }

    pub fn weekday(&self) -> Weekday {
        match self.wday() {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    /// The week this time falls in when counted from `base`.
    pub fn week_for(&self, base: Week) -> Week {
        if self.0 < MINUTES_IN_WEEK {
            base
        } else {
            base.succ()
        }
    }

    pub fn day_minute(&self) -> u32 {
        self.0 % MINUTES_IN_DAY
    }

    pub fn day_time(&self) -> DayTime {
        DayTime::from_minutes(i64::from(self.day_minute())).unwrap_or(DayTime::MIDNIGHT)
    }

    pub fn hour(&self) -> u32 {
        self.day_minute() / MINUTES_IN_HOUR
    }

    pub fn minute(&self) -> u32 {
        self.day_minute() % MINUTES_IN_HOUR
    }

    pub fn timestamp(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// Formats with `strftime` directives against the first week of the epoch, so
    /// only weekday and time-of-day directives are meaningful. Invalid directives
    /// yield an empty string.
    pub fn strftime(&self, format: &str) -> String {
        let time =
            NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN);
        let local = Week::new(0).day(self.wday()).and_time(time);
        let mut out = String::new();
        if write!(out, "{}", local.format(format)).is_err() {
            out.clear();
        }
        out
    }

    pub fn succ(&self) -> Self {
        Self((self.0 + 1) % MINUTES_IN_WEEK)
    }

    pub fn pred(&self) -> Self {
        Self((self.0 + MINUTES_IN_WEEK - 1) % MINUTES_IN_WEEK)
    }

    /// Compares against an arbitrary JSON value by its integer projection.
    pub fn try_cmp(&self, other: &Value) -> Result<Ordering, WeekTimeError> {
        let minutes = match integer_projection(other) {
            Some(Ok(minutes)) => minutes,
            _ => {
                return Err(WeekTimeError::InvalidComparison {
                    found: value_kind(other),
                });
            }
        };
        Ok(i64::from(self.0).cmp(&minutes))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `None` when the value has no integer form at all, `Some(Err)` for strings that
/// are not integer literals.
fn integer_projection(value: &Value) -> Option<Result<i64, WeekTimeError>> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64))
            .map(Ok),
        Value::String(text) => Some(
            text.trim()
                .parse::<i64>()
                .map_err(|_| WeekTimeError::InvalidFormat(text.clone())),
        ),
        _ => None,
    }
}

impl TryFrom<i64> for WeekTime {
    type Error = WeekTimeError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl TryFrom<&Value> for WeekTime {
    type Error = WeekTimeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match integer_projection(value) {
            Some(minutes) => Self::from_minutes(minutes?),
            None => Err(WeekTimeError::InvalidType {
                found: value_kind(value),
            }),
        }
    }
}

impl FromStr for WeekTime {
    type Err = WeekTimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let minutes = value
            .trim()
            .parse::<i64>()
            .map_err(|_| WeekTimeError::InvalidFormat(value.to_string()))?;
        Self::from_minutes(minutes)
    }
}

impl From<WeekTime> for u32 {
    fn from(value: WeekTime) -> Self {
        value.0
    }
}

impl PartialEq<u32> for WeekTime {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<u32> for WeekTime {
    fn partial_cmp(&self, other: &u32) -> Option<Ordering> {
        Some(self.0.cmp(other))
    }
}

impl PartialEq<WeekTime> for u32 {
    fn eq(&self, other: &WeekTime) -> bool {
        *self == other.0
    }
}

impl PartialOrd<WeekTime> for u32 {
    fn partial_cmp(&self, other: &WeekTime) -> Option<Ordering> {
        Some(self.cmp(&other.0))
    }
}

impl fmt::Display for WeekTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday(), self.timestamp())
    }
}

/// Ordinal of a calendar week, counted in Sunday-started weeks from 1969-12-28.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Week(i64);

impl Week {
    pub fn new(ordinal: i64) -> Self {
        Self(ordinal)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        let days = i64::from(date.num_days_from_ce()) - EPOCH_DAYS_FROM_CE;
        Self(days.div_euclid(i64::from(DAYS_IN_WEEK)))
    }

    /// Last week whose dates are still handled by the period search.
    pub fn far_future() -> Self {
        Self::from_date(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX))
    }

    pub fn far_past() -> Self {
        Self::from_date(NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN))
    }

    pub fn ordinal(&self) -> i64 {
        self.0
    }

    pub fn succ(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn pred(&self) -> Self {
        Self(self.0 - 1)
    }

    /// The Sunday this week starts on, clamped to the supported date range.
    pub fn start_date(&self) -> NaiveDate {
        let days = self
            .0
            .saturating_mul(i64::from(DAYS_IN_WEEK))
            .saturating_add(EPOCH_DAYS_FROM_CE);
        i32::try_from(days)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .unwrap_or(if days < 0 {
                NaiveDate::MIN
            } else {
                NaiveDate::MAX
            })
    }

    /// The date `wday` days (Sunday = 0) into this week.
    pub fn day(&self, wday: u32) -> NaiveDate {
        self.start_date()
            .checked_add_days(Days::new(u64::from(wday)))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} ({})", self.0, self.start_date())
    }
}
