use crate::business_hours::BusinessHours;
use crate::day_time::DayTime;
use crate::periods::PeriodIter;
use crate::zone::Zone;
use chrono::NaiveDate;

/// Date-level view over a period stream.
pub struct Dates<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S> Dates<'a, S>
where
    S: BusinessHours + ?Sized,
{
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Dates with at least one period, ascending, starting with `date` itself.
    pub fn after(&self, date: NaiveDate) -> DateIter<'a> {
        let zone = self.source.zone();
        let origin = zone.on_date(date, DayTime::MIDNIGHT);
        DateIter::new(self.source.periods_after(origin), zone)
    }

    /// Dates with at least one period, descending, starting with `date` itself.
    pub fn before(&self, date: NaiveDate) -> DateIter<'a> {
        let zone = self.source.zone();
        let origin = zone.on_date(date, DayTime::ENDNIGHT);
        DateIter::new(self.source.periods_before(origin), zone)
    }

    pub fn active(&self, date: NaiveDate) -> bool {
        self.after(date).next() == Some(date)
    }
}

/// Local dates of a period stream with consecutive repeats collapsed.
pub struct DateIter<'a> {
    periods: PeriodIter<'a>,
    zone: Zone,
    last: Option<NaiveDate>,
}

impl<'a> DateIter<'a> {
    fn new(periods: PeriodIter<'a>, zone: Zone) -> Self {
        Self {
            periods,
            zone,
            last: None,
        }
    }
}

impl Iterator for DateIter<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let period = self.periods.next()?;
            let date = self.zone.date_of(period.start());
            if self.last != Some(date) {
                self.last = Some(date);
                return Some(date);
            }
        }
    }
}
