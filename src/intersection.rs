//! Absolute-time intersection of two business-hours sources.
//!
//! Each side produces its own periods (own zone, own breaks and holidays); the
//! intersection walks both streams with two cursors and yields their overlaps. An
//! instant is on a break or a holiday when it is on one for either side. A
//! search gives up once the candidate overlap lies further than the search horizon
//! from the last overlap found (or from the origin), so disjoint schedules end
//! instead of scanning forever.

use crate::business_hours::BusinessHours;
use crate::periods::PeriodIter;
use crate::schedule::Schedule;
use crate::time_segment::TimeSegment;
use crate::zone::Zone;
use chrono::{DateTime, TimeDelta, Utc};
use std::iter::Peekable;
use std::ops::BitAnd;

pub struct Intersection<'a, L: ?Sized, R: ?Sized> {
    left: &'a L,
    right: &'a R,
}

impl<'a, L, R> Intersection<'a, L, R>
where
    L: BusinessHours + ?Sized,
    R: BusinessHours + ?Sized,
{
    pub fn new(left: &'a L, right: &'a R) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> &'a L {
        self.left
    }

    pub fn right(&self) -> &'a R {
        self.right
    }

    /// The left side's zone.
    pub fn in_zone(&self) -> Zone {
        self.left.zone()
    }
}

impl<L, R> BusinessHours for Intersection<'_, L, R>
where
    L: BusinessHours + ?Sized,
    R: BusinessHours + ?Sized,
{
    fn zone(&self) -> Zone {
        self.left.zone()
    }

    fn periods_after(&self, origin: DateTime<Utc>) -> PeriodIter<'_> {
        Box::new(Overlaps::new(
            self.left.periods_after(origin),
            self.right.periods_after(origin),
            Direction::Forward,
            origin,
            self.search_horizon(),
        ))
    }

    fn periods_before(&self, origin: DateTime<Utc>) -> PeriodIter<'_> {
        Box::new(Overlaps::new(
            self.left.periods_before(origin),
            self.right.periods_before(origin),
            Direction::Backward,
            origin,
            self.search_horizon(),
        ))
    }

    fn search_horizon(&self) -> TimeDelta {
        self.left.search_horizon().min(self.right.search_horizon())
    }

    fn on_break(&self, time: DateTime<Utc>) -> bool {
        self.left.on_break(time) || self.right.on_break(time)
    }

    fn on_holiday(&self, time: DateTime<Utc>) -> bool {
        self.left.on_holiday(time) || self.right.on_holiday(time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

struct Overlaps<'a> {
    left: Peekable<PeriodIter<'a>>,
    right: Peekable<PeriodIter<'a>>,
    direction: Direction,
    progress: DateTime<Utc>,
    horizon: TimeDelta,
}

impl<'a> Overlaps<'a> {
    fn new(
        left: PeriodIter<'a>,
        right: PeriodIter<'a>,
        direction: Direction,
        origin: DateTime<Utc>,
        horizon: TimeDelta,
    ) -> Self {
        Self {
            left: left.peekable(),
            right: right.peekable(),
            direction,
            progress: origin,
            horizon,
        }
    }

    /// Distance from the last progress point to where the next overlap could begin.
    fn gap(&self, left: &TimeSegment, right: &TimeSegment) -> TimeDelta {
        match self.direction {
            Direction::Forward => left.start().max(right.start()) - self.progress,
            Direction::Backward => self.progress - left.end().min(right.end()),
        }
    }

    /// Whether the left cursor is the one that can no longer overlap anything new.
    fn advance_left(&self, left: &TimeSegment, right: &TimeSegment) -> bool {
        match self.direction {
            Direction::Forward => left.end() <= right.end(),
            Direction::Backward => left.start() >= right.start(),
        }
    }
}

impl Iterator for Overlaps<'_> {
    type Item = TimeSegment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let left = *self.left.peek()?;
            let right = *self.right.peek()?;

            if self.gap(&left, &right) > self.horizon {
                log::trace!(
                    "intersection search stopped {} days past {}",
                    self.horizon.num_days(),
                    self.progress
                );
                return None;
            }

            if self.advance_left(&left, &right) {
                self.left.next();
            } else {
                self.right.next();
            }

            let overlap = left.intersection(&right);
            if !overlap.is_empty() {
                self.progress = match self.direction {
                    Direction::Forward => overlap.end(),
                    Direction::Backward => overlap.start(),
                };
                return Some(overlap);
            }
        }
    }
}

impl<'a, R> BitAnd<&'a R> for &'a Schedule
where
    R: BusinessHours + ?Sized,
{
    type Output = Intersection<'a, Schedule, R>;

    fn bitand(self, other: &'a R) -> Self::Output {
        Intersection::new(self, other)
    }
}

impl<'a, 'b, L, R, O> BitAnd<&'a O> for &'a Intersection<'b, L, R>
where
    L: BusinessHours + ?Sized,
    R: BusinessHours + ?Sized,
    O: BusinessHours + ?Sized,
{
    type Output = Intersection<'a, Intersection<'b, L, R>, O>;

    fn bitand(self, other: &'a O) -> Self::Output {
        Intersection::new(self, other)
    }
}
