use crate::day_time::DayTime;
use crate::week_time::{Week, WeekTime};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

// Nonexistent local times are pushed forward an hour at a time; real gaps are at
// most two hours wide.
const GAP_ATTEMPTS: u32 = 4;

/// Time zone service: moves between absolute instants and local civil time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Zone {
    tz: Tz,
}

impl Default for Zone {
    fn default() -> Self {
        Self::utc()
    }
}

impl Zone {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn utc() -> Self {
        Self::new(chrono_tz::Etc::UTC)
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// The instant expressed in this zone.
    pub fn local(&self, time: DateTime<Utc>) -> DateTime<Tz> {
        time.with_timezone(&self.tz)
    }

    pub fn date_of(&self, time: DateTime<Utc>) -> NaiveDate {
        self.local(time).date_naive()
    }

    pub fn week_of(&self, time: DateTime<Utc>) -> Week {
        Week::from_date(self.date_of(time))
    }

    pub fn week_time_of(&self, time: DateTime<Utc>) -> WeekTime {
        WeekTime::from_datetime(&self.local(time))
    }

    /// The instant at `day_time` on `date`, local to this zone. `24:00` is the
    /// following midnight.
    pub fn on_date(&self, date: NaiveDate, day_time: DayTime) -> DateTime<Utc> {
        let (date, time) = if day_time.is_endnight() {
            (date.succ_opt().unwrap_or(date), NaiveTime::MIN)
        } else {
            let time = NaiveTime::from_hms_opt(day_time.hour(), day_time.minute(), 0)
                .unwrap_or(NaiveTime::MIN);
            (date, time)
        };
        self.resolve_local(date.and_time(time))
    }

    /// Anchors a week time to the given week.
    pub fn during_week(&self, week: Week, week_time: WeekTime) -> DateTime<Utc> {
        self.on_date(week.day(week_time.wday()), week_time.day_time())
    }

    /// Resolves a local civil time. Ambiguous times take the earlier instant;
    /// times inside a DST gap move forward until they exist.
    pub fn resolve_local(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        let mut candidate = naive;
        for _ in 0..GAP_ATTEMPTS {
            if let Some(time) = self.tz.from_local_datetime(&candidate).earliest() {
                return time.with_timezone(&Utc);
            }
            candidate += Duration::hours(1);
        }
        let offset = self.tz.offset_from_utc_datetime(&naive).fix();
        (naive - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
    }
}

impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        Self::new(tz)
    }
}
