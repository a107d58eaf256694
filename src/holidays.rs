use bdays::HolidayCalendar;
use bdays::calendars::us::USSettlement;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dates on which a schedule is closed regardless of its hours and shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Holidays {
    dates: BTreeSet<NaiveDate>,
}

impl Holidays {
    pub fn new<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// US settlement holidays (federal holidays with their observed dates) for a
    /// range of years, inclusive.
    pub fn us_federal(start_year: i32, end_year: i32) -> Self {
        let (start, end) = if start_year <= end_year {
            (start_year, end_year)
        } else {
            (end_year, start_year)
        };

        let mut holidays = Self::default();
        let calendar = USSettlement;
        for year in start..=end {
            let (Some(first), Some(last)) = (
                NaiveDate::from_ymd_opt(year, 1, 1),
                NaiveDate::from_ymd_opt(year, 12, 31),
            ) else {
                continue;
            };
            holidays.dates.extend(
                first
                    .iter_days()
                    .take_while(|date| *date <= last)
                    .filter(|date| calendar.is_holiday(*date)),
            );
        }
        holidays
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.dates.extend(dates);
    }

    /// Closes `month`/`day` in every year of the range. Years without that date
    /// (Feb 29) are skipped.
    pub fn add_recurring_holiday(&mut self, month: u32, day: u32, start_year: i32, end_year: i32) {
        for year in start_year..=end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.dates.insert(date);
            }
        }
    }

    /// Closes the `n`th `weekday` of `month` in every year of the range, e.g.
    /// `(11, Weekday::Thu, 4)` for Thanksgiving.
    pub fn add_recurring_weekday_holiday(
        &mut self,
        month: u32,
        weekday: Weekday,
        n: u32,
        start_year: i32,
        end_year: i32,
    ) {
        for year in start_year..=end_year {
            if let Some(date) = Self::nth_weekday(year, month, weekday, n) {
                self.dates.insert(date);
            }
        }
    }

    fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
        let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let mut count = 0;

        while date.month() == month {
            if date.weekday() == weekday {
                count += 1;
                if count == n {
                    return Some(date);
                }
            }
            date = date.succ_opt()?;
        }
        None
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.contains(date)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn union(&self, other: &Holidays) -> Holidays {
        Self {
            dates: self.dates.union(&other.dates).copied().collect(),
        }
    }
}

impl FromIterator<NaiveDate> for Holidays {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Extend<NaiveDate> for Holidays {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.dates.extend(iter);
    }
}
