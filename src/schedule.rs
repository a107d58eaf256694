use crate::business_hours::BusinessHours;
use crate::configuration::{Configuration, ConfigurationError, DayRange, RawConfiguration};
use crate::day_time::DayTime;
use crate::holidays::Holidays;
use crate::interval::Interval;
use crate::periods::{DatedPeriod, Linear, PeriodIter, Selector};
use crate::time_segment::TimeSegment;
use crate::week_time::Week;
use crate::zone::Zone;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The period stream ran out before the requested amount of business time was
    /// consumed.
    UnboundedSearch {
        origin: DateTime<Utc>,
        horizon: TimeDelta,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::UnboundedSearch { origin, horizon } => write!(
                f,
                "no business time found from {origin} within a {} day search horizon",
                horizon.num_days()
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

type DatedIter<'a> = Box<dyn Iterator<Item = DatedPeriod> + 'a>;

/// Business hours resolved from a [`Configuration`].
///
/// Shifts and breaks are anchored to absolute time once, at construction; the
/// weekly hours are anchored per week as the period streams advance.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    configuration: Configuration,
    intervals: Vec<Interval>,
    shifts: BTreeMap<NaiveDate, Vec<TimeSegment>>,
    breaks: BTreeMap<NaiveDate, Vec<TimeSegment>>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::from_configuration(Configuration::default())
    }
}

impl Schedule {
    pub fn new(raw: &RawConfiguration) -> Result<Self, ConfigurationError> {
        Ok(Self::from_configuration(Configuration::new(raw)?))
    }

    pub fn from_configuration(configuration: Configuration) -> Self {
        let zone = configuration.zone();
        let resolve = |ranges: &BTreeMap<NaiveDate, Vec<DayRange>>| {
            ranges
                .iter()
                .map(|(date, ranges)| (*date, anchor_ranges(zone, *date, ranges)))
                .collect::<BTreeMap<_, _>>()
        };
        let shifts = resolve(configuration.shifts());
        let breaks = resolve(configuration.breaks());
        let intervals = configuration.intervals();

        log::debug!(
            "schedule in {}: {} weekly intervals, {} shifts, {} breaks, {} holidays",
            zone.name(),
            intervals.len(),
            shifts.len(),
            breaks.len(),
            configuration.holidays().len()
        );

        Self {
            configuration,
            intervals,
            shifts,
            breaks,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn shifts(&self) -> &BTreeMap<NaiveDate, Vec<TimeSegment>> {
        &self.shifts
    }

    pub fn breaks(&self) -> &BTreeMap<NaiveDate, Vec<TimeSegment>> {
        &self.breaks
    }

    pub fn holidays(&self) -> &Holidays {
        self.configuration.holidays()
    }

    pub fn time_zone(&self) -> Tz {
        self.configuration.time_zone()
    }

    pub fn in_zone(&self) -> Zone {
        self.configuration.zone()
    }

    /// Whether `time` falls inside a break, `[start, end)`.
    pub fn on_break(&self, time: DateTime<Utc>) -> bool {
        let date = self.in_zone().date_of(time);
        let from = date.pred_opt().unwrap_or(date);
        let to = date.succ_opt().unwrap_or(date);
        self.breaks
            .range(from..=to)
            .flat_map(|(_, segments)| segments)
            .any(|segment| segment.contains(time))
    }

    /// Whether the local date of `time` is a holiday.
    pub fn on_holiday(&self, time: DateTime<Utc>) -> bool {
        self.holidays().contains(&self.in_zone().date_of(time))
    }

    /// A schedule open only when both are open in week-relative terms.
    pub fn intersect_hours(&self, other: &Schedule) -> Schedule {
        Schedule::from_configuration(self.configuration.intersect(&other.configuration))
    }

    fn dated(&self, interval: &Interval, week: Week) -> DatedPeriod {
        let start = interval.start();
        let date = start.week_for(week).day(start.wday());
        DatedPeriod::new(date, interval.to_time_segment(week))
    }

    fn regular_after(&self, first: Week) -> DatedIter<'_> {
        if self.intervals.is_empty() {
            return Box::new(std::iter::empty());
        }
        let weeks = (first.ordinal()..=Week::far_future().ordinal()).map(Week::new);
        Box::new(weeks.flat_map(move |week| {
            self.intervals
                .iter()
                .map(move |interval| self.dated(interval, week))
        }))
    }

    fn regular_before(&self, last: Week) -> DatedIter<'_> {
        if self.intervals.is_empty() {
            return Box::new(std::iter::empty());
        }
        let weeks = (Week::far_past().ordinal()..=last.ordinal())
            .rev()
            .map(Week::new);
        Box::new(weeks.flat_map(move |week| {
            self.intervals
                .iter()
                .rev()
                .map(move |interval| self.dated(interval, week))
        }))
    }

    fn shifts_after(&self, from: NaiveDate) -> DatedIter<'_> {
        let zone = self.in_zone();
        Box::new(
            self.shifts
                .range(from..)
                .flat_map(move |(date, segments)| shift_periods(zone, *date, segments)),
        )
    }

    fn shifts_before(&self, to: NaiveDate) -> DatedIter<'_> {
        let zone = self.in_zone();
        Box::new(self.shifts.range(..=to).rev().flat_map(move |(date, segments)| {
            let mut periods = shift_periods(zone, *date, segments);
            periods.reverse();
            periods
        }))
    }

    fn open(&self, period: &DatedPeriod) -> bool {
        !period.segment.is_empty() && !self.holidays().contains(&period.date)
    }

    /// `segment` with the breaks of `date` cut out, ascending.
    fn without_breaks(&self, date: NaiveDate, segment: TimeSegment) -> Vec<TimeSegment> {
        let Some(breaks) = self.breaks.get(&date) else {
            return vec![segment];
        };
        breaks.iter().fold(vec![segment], |pieces, pause| {
            pieces
                .iter()
                .flat_map(|piece| piece.difference(pause))
                .collect()
        })
    }
}

impl BusinessHours for Schedule {
    fn zone(&self) -> Zone {
        self.in_zone()
    }

    fn on_break(&self, time: DateTime<Utc>) -> bool {
        Schedule::on_break(self, time)
    }

    fn on_holiday(&self, time: DateTime<Utc>) -> bool {
        Schedule::on_holiday(self, time)
    }

    fn periods_after(&self, origin: DateTime<Utc>) -> PeriodIter<'_> {
        let first = self.in_zone().week_of(origin);
        let merged = Linear::new(
            self.regular_after(first),
            self.shifts_after(first.start_date()),
            Selector::Earliest,
        );
        Box::new(
            merged
                .filter(move |period| origin < period.segment.end() && self.open(period))
                .flat_map(move |period| {
                    self.without_breaks(period.date, period.segment.clip_after(origin))
                })
                .filter(|segment| !segment.is_empty()),
        )
    }

    fn periods_before(&self, origin: DateTime<Utc>) -> PeriodIter<'_> {
        let last = self.in_zone().week_of(origin);
        let merged = Linear::new(
            self.regular_before(last),
            self.shifts_before(last.day(6)),
            Selector::Latest,
        );
        Box::new(
            merged
                .filter(move |period| period.segment.start() < origin && self.open(period))
                .flat_map(move |period| {
                    let mut pieces =
                        self.without_breaks(period.date, period.segment.clip_before(origin));
                    pieces.reverse();
                    pieces
                })
                .filter(|segment| !segment.is_empty()),
        )
    }

    fn search_horizon(&self) -> TimeDelta {
        self.configuration.search_horizon()
    }
}

fn anchor_ranges(zone: Zone, date: NaiveDate, ranges: &[DayRange]) -> Vec<TimeSegment> {
    ranges
        .iter()
        .map(|range| {
            TimeSegment::new(
                zone.on_date(date, range.start()),
                zone.on_date(date, range.end()),
            )
        })
        .collect()
}

// A closed shift still has to displace the weekly hours of its date, so it enters
// the merge as an empty marker at local midnight.
fn shift_periods(zone: Zone, date: NaiveDate, segments: &[TimeSegment]) -> Vec<DatedPeriod> {
    if segments.is_empty() {
        let midnight = zone.on_date(date, DayTime::MIDNIGHT);
        return vec![DatedPeriod::new(date, TimeSegment::instant(midnight))];
    }
    segments
        .iter()
        .map(|segment| DatedPeriod::new(date, *segment))
        .collect()
}
