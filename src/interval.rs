use crate::time_segment::TimeSegment;
use crate::week_time::{Week, WeekTime};
use crate::zone::Zone;
use chrono_tz::Tz;

/// A recurring week-relative period in a given time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: WeekTime,
    end: WeekTime,
    time_zone: Tz,
}

impl Interval {
    pub fn new(start: WeekTime, end: WeekTime, time_zone: Tz) -> Self {
        Self {
            start,
            end,
            time_zone,
        }
    }

    pub fn start(&self) -> WeekTime {
        self.start
    }

    pub fn end(&self) -> WeekTime {
        self.end
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Resolves this interval against a concrete week.
    ///
    /// An end of `10080` anchors to the Sunday midnight of the following week.
    pub fn to_time_segment(&self, week: Week) -> TimeSegment {
        let zone = Zone::new(self.time_zone);
        let anchor = |endpoint: WeekTime| zone.during_week(endpoint.week_for(week), endpoint);
        TimeSegment::new(anchor(self.start), anchor(self.end))
    }
}
