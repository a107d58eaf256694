//! Schedule configuration.
//!
//! [`RawConfiguration`] is the serde-facing description (weekday names, `"HH:MM"`
//! strings, an IANA zone name). [`Configuration`] is the validated, normalized form a
//! [`Schedule`](crate::Schedule) is built from; every error is reported here, before
//! any period is generated.

use crate::day_time::{DayTime, DayTimeError};
use crate::holidays::Holidays;
use crate::interval::Interval;
use crate::week_time::WeekTime;
use crate::zone::Zone;
use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_TIME_ZONE: &str = "Etc/UTC";
pub const DEFAULT_SEARCH_HORIZON_DAYS: u32 = 3653;

/// Start time to end time, both `"HH:MM"`.
pub type TimeTable = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    InvalidWeekday(String),
    InvalidTime(DayTimeError),
    UnknownTimeZone(String),
    NonsensicalRange {
        context: String,
        start: DayTime,
        end: DayTime,
    },
    OverlappingRanges {
        context: String,
        first: DayRange,
        second: DayRange,
    },
    InvalidSearchHorizon,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidWeekday(value) => write!(f, "invalid weekday '{value}'"),
            ConfigurationError::InvalidTime(err) => write!(f, "{err}"),
            ConfigurationError::UnknownTimeZone(name) => write!(f, "unknown time zone '{name}'"),
            ConfigurationError::NonsensicalRange {
                context,
                start,
                end,
            } => write!(f, "{context}: start {start} must be before end {end}"),
            ConfigurationError::OverlappingRanges {
                context,
                first,
                second,
            } => write!(f, "{context}: ranges {first} and {second} overlap"),
            ConfigurationError::InvalidSearchHorizon => {
                write!(f, "search horizon must be at least one day")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<DayTimeError> for ConfigurationError {
    fn from(value: DayTimeError) -> Self {
        Self::InvalidTime(value)
    }
}

/// A `[start, end)` range within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayRange {
    start: DayTime,
    end: DayTime,
}

impl DayRange {
    pub fn new(start: DayTime, end: DayTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DayTime {
        self.start
    }

    pub fn end(&self) -> DayTime {
        self.end
    }

    pub fn intersection(&self, other: &DayRange) -> Option<DayRange> {
        DayRange::new(self.start.max(other.start), self.end.min(other.end))
    }
}

impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Configuration as written by users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfiguration {
    /// Weekday name to time table. `None` means the default Mon-Fri 09:00-17:00.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<BTreeMap<String, TimeTable>>,
    pub shifts: BTreeMap<NaiveDate, TimeTable>,
    pub breaks: BTreeMap<NaiveDate, TimeTable>,
    pub holidays: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_horizon_days: Option<u32>,
}

impl RawConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicitly configures no regular hours (shift-only schedules).
    pub fn without_hours(mut self) -> Self {
        self.hours = Some(BTreeMap::new());
        self
    }

    pub fn with_hours(mut self, weekday: &str, start: &str, end: &str) -> Self {
        self.hours
            .get_or_insert_with(BTreeMap::new)
            .entry(weekday.to_string())
            .or_default()
            .insert(start.to_string(), end.to_string());
        self
    }

    pub fn with_shift(mut self, date: NaiveDate, start: &str, end: &str) -> Self {
        self.shifts
            .entry(date)
            .or_default()
            .insert(start.to_string(), end.to_string());
        self
    }

    /// A shift with no ranges: the schedule is closed on `date`.
    pub fn with_closed_shift(mut self, date: NaiveDate) -> Self {
        self.shifts.entry(date).or_default();
        self
    }

    pub fn with_break(mut self, date: NaiveDate, start: &str, end: &str) -> Self {
        self.breaks
            .entry(date)
            .or_default()
            .insert(start.to_string(), end.to_string());
        self
    }

    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.push(date);
        self
    }

    pub fn with_holidays<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.holidays.extend(dates);
        self
    }

    pub fn with_time_zone(mut self, time_zone: &str) -> Self {
        self.time_zone = Some(time_zone.to_string());
        self
    }

    pub fn with_search_horizon_days(mut self, days: u32) -> Self {
        self.search_horizon_days = Some(days);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    weekly: [Vec<DayRange>; 7],
    shifts: BTreeMap<NaiveDate, Vec<DayRange>>,
    breaks: BTreeMap<NaiveDate, Vec<DayRange>>,
    holidays: Holidays,
    zone: Zone,
    search_horizon: TimeDelta,
}

impl Default for Configuration {
    fn default() -> Self {
        let mut weekly: [Vec<DayRange>; 7] = Default::default();
        let office = DayRange {
            start: DayTime::from_minutes(9 * 60).unwrap_or(DayTime::MIDNIGHT),
            end: DayTime::from_minutes(17 * 60).unwrap_or(DayTime::ENDNIGHT),
        };
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ] {
            weekly[Self::day_index(weekday)] = vec![office];
        }
        Self {
            weekly,
            shifts: BTreeMap::new(),
            breaks: BTreeMap::new(),
            holidays: Holidays::default(),
            zone: Zone::default(),
            search_horizon: TimeDelta::days(i64::from(DEFAULT_SEARCH_HORIZON_DAYS)),
        }
    }
}

impl Configuration {
    /// Sunday-first, matching week-minute numbering.
    pub const WEEKDAYS: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    pub fn new(raw: &RawConfiguration) -> Result<Self, ConfigurationError> {
        let mut configuration = Self::default();

        if let Some(hours) = &raw.hours {
            configuration.weekly = Default::default();
            for (name, table) in hours {
                let weekday: Weekday = name
                    .parse()
                    .map_err(|_| ConfigurationError::InvalidWeekday(name.clone()))?;
                let ranges = parse_table(table, &format!("hours on {name}"))?;
                let slot = &mut configuration.weekly[Self::day_index(weekday)];
                slot.extend(ranges);
                normalize(slot, &format!("hours on {name}"))?;
            }
        }

        for (date, table) in &raw.shifts {
            let ranges = parse_table(table, &format!("shift on {date}"))?;
            configuration.shifts.insert(*date, ranges);
        }

        for (date, table) in &raw.breaks {
            let ranges = parse_table(table, &format!("break on {date}"))?;
            configuration.breaks.insert(*date, ranges);
        }

        configuration.holidays = raw.holidays.iter().copied().collect();

        let name = raw.time_zone.as_deref().unwrap_or(DEFAULT_TIME_ZONE);
        let tz: Tz = name
            .parse()
            .map_err(|_| ConfigurationError::UnknownTimeZone(name.to_string()))?;
        configuration.zone = Zone::new(tz);

        if let Some(days) = raw.search_horizon_days {
            if days == 0 {
                return Err(ConfigurationError::InvalidSearchHorizon);
            }
            configuration.search_horizon = TimeDelta::days(i64::from(days));
        }

        Ok(configuration)
    }

    fn day_index(weekday: Weekday) -> usize {
        weekday.num_days_from_sunday() as usize
    }

    pub fn hours_on(&self, weekday: Weekday) -> &[DayRange] {
        &self.weekly[Self::day_index(weekday)]
    }

    /// The ranges in effect on `date`: its shift when one exists, otherwise the
    /// regular hours for its weekday.
    pub fn ranges_on(&self, date: NaiveDate) -> &[DayRange] {
        self.shifts
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_else(|| self.hours_on(date.weekday()))
    }

    pub fn shifts(&self) -> &BTreeMap<NaiveDate, Vec<DayRange>> {
        &self.shifts
    }

    pub fn breaks(&self) -> &BTreeMap<NaiveDate, Vec<DayRange>> {
        &self.breaks
    }

    pub fn holidays(&self) -> &Holidays {
        &self.holidays
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn time_zone(&self) -> Tz {
        self.zone.time_zone()
    }

    pub fn search_horizon(&self) -> TimeDelta {
        self.search_horizon
    }

    pub fn has_regular_hours(&self) -> bool {
        self.weekly.iter().any(|ranges| !ranges.is_empty())
    }

    /// The regular hours as week-relative intervals, ordered by start.
    pub fn intervals(&self) -> Vec<Interval> {
        let tz = self.time_zone();
        Self::WEEKDAYS
            .iter()
            .flat_map(|weekday| {
                self.hours_on(*weekday).iter().map(move |range| {
                    Interval::new(
                        WeekTime::from_day_time(*weekday, range.start),
                        WeekTime::from_day_time(*weekday, range.end),
                        tz,
                    )
                })
            })
            .collect()
    }

    /// Week-relative intersection: hours and shifts are intersected, breaks and
    /// holidays are combined, the zone and search horizon of `self` are kept.
    pub fn intersect(&self, other: &Configuration) -> Configuration {
        let mut weekly: [Vec<DayRange>; 7] = Default::default();
        for (index, slot) in weekly.iter_mut().enumerate() {
            *slot = intersect_ranges(&self.weekly[index], &other.weekly[index]);
        }

        let shifts = self
            .shifts
            .keys()
            .chain(other.shifts.keys())
            .map(|date| {
                let ranges = intersect_ranges(self.ranges_on(*date), other.ranges_on(*date));
                (*date, ranges)
            })
            .collect();

        let mut breaks = self.breaks.clone();
        for (date, ranges) in &other.breaks {
            let combined = breaks.entry(*date).or_default();
            combined.extend(ranges.iter().copied());
            *combined = coalesce(std::mem::take(combined));
        }

        Configuration {
            weekly,
            shifts,
            breaks,
            holidays: self.holidays.union(&other.holidays),
            zone: self.zone,
            search_horizon: self.search_horizon,
        }
    }
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = ConfigurationError;

    fn try_from(raw: RawConfiguration) -> Result<Self, Self::Error> {
        Configuration::new(&raw)
    }
}

impl From<&Configuration> for RawConfiguration {
    fn from(configuration: &Configuration) -> Self {
        let hours = Configuration::WEEKDAYS
            .iter()
            .filter(|weekday| !configuration.hours_on(**weekday).is_empty())
            .map(|weekday| {
                (
                    weekday.to_string().to_lowercase(),
                    time_table(configuration.hours_on(*weekday)),
                )
            })
            .collect();

        RawConfiguration {
            hours: Some(hours),
            shifts: configuration
                .shifts
                .iter()
                .map(|(date, ranges)| (*date, time_table(ranges)))
                .collect(),
            breaks: configuration
                .breaks
                .iter()
                .map(|(date, ranges)| (*date, time_table(ranges)))
                .collect(),
            holidays: configuration.holidays.iter().copied().collect(),
            time_zone: Some(configuration.zone.name().to_string()),
            search_horizon_days: u32::try_from(configuration.search_horizon.num_days()).ok(),
        }
    }
}

fn time_table(ranges: &[DayRange]) -> TimeTable {
    ranges
        .iter()
        .map(|range| (range.start.timestamp(), range.end.timestamp()))
        .collect()
}

fn parse_table(table: &TimeTable, context: &str) -> Result<Vec<DayRange>, ConfigurationError> {
    let mut ranges = Vec::with_capacity(table.len());
    for (start, end) in table {
        let start: DayTime = start.parse()?;
        let end: DayTime = end.parse()?;
        let range = DayRange::new(start, end).ok_or_else(|| ConfigurationError::NonsensicalRange {
            context: context.to_string(),
            start,
            end,
        })?;
        ranges.push(range);
    }
    normalize(&mut ranges, context)?;
    Ok(ranges)
}

fn normalize(ranges: &mut [DayRange], context: &str) -> Result<(), ConfigurationError> {
    ranges.sort();
    for pair in ranges.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(ConfigurationError::OverlappingRanges {
                context: context.to_string(),
                first: pair[0],
                second: pair[1],
            });
        }
    }
    Ok(())
}

fn intersect_ranges(left: &[DayRange], right: &[DayRange]) -> Vec<DayRange> {
    let mut ranges: Vec<DayRange> = left
        .iter()
        .flat_map(|a| right.iter().filter_map(move |b| a.intersection(b)))
        .collect();
    ranges.sort();
    ranges
}

fn coalesce(mut ranges: Vec<DayRange>) -> Vec<DayRange> {
    ranges.sort();
    let mut merged: Vec<DayRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}
