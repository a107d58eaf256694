use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A span of absolute time, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSegment {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSegment {
    /// Builds a segment; an `end` before `start` yields the empty segment at `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn instant(time: DateTime<Utc>) -> Self {
        Self::new(time, time)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.end
    }

    pub fn overlaps(&self, other: &TimeSegment) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The overlapping part of both segments (possibly empty).
    pub fn intersection(&self, other: &TimeSegment) -> TimeSegment {
        TimeSegment::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// What remains of `self` once `other` is cut out, in ascending order.
    pub fn difference(&self, other: &TimeSegment) -> Vec<TimeSegment> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        [
            TimeSegment::new(self.start, other.start),
            TimeSegment::new(other.end, self.end),
        ]
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect()
    }

    pub fn clip_after(&self, origin: DateTime<Utc>) -> TimeSegment {
        TimeSegment::new(self.start.max(origin), self.end)
    }

    pub fn clip_before(&self, origin: DateTime<Utc>) -> TimeSegment {
        TimeSegment::new(self.start, self.end.min(origin))
    }
}

impl fmt::Display for TimeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}
