use business_time::{
    BusinessHours, RawConfiguration, Schedule, ScheduleError, TimeSegment, TimeUnit,
};
use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Timelike, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn regular_config() -> RawConfiguration {
    RawConfiguration::new()
        .with_hours("mon", "09:00", "17:00")
        .with_hours("tue", "10:00", "16:00")
        .with_hours("wed", "09:00", "17:00")
        .with_hours("thu", "10:00", "16:00")
        .with_hours("fri", "09:00", "17:00")
        .with_hours("sat", "11:00", "14:30")
        .with_break(date(2006, 1, 2), "10:00", "11:30")
        .with_break(date(2006, 1, 3), "14:15", "14:30")
        .with_break(date(2006, 1, 3), "15:40", "15:50")
        .with_holidays([date(2006, 1, 1), date(2006, 12, 25)])
        .with_time_zone("Etc/UTC")
}

fn regular_schedule() -> Schedule {
    Schedule::new(&regular_config()).unwrap()
}

fn irregular_schedule() -> Schedule {
    let raw = RawConfiguration::new()
        .without_hours()
        // thursday
        .with_shift(date(2021, 9, 16), "09:00", "12:00")
        .with_shift(date(2021, 9, 16), "13:00", "17:00")
        // wednesday
        .with_shift(date(2021, 9, 22), "10:00", "14:00")
        // alternate fridays
        .with_shift(date(2021, 12, 3), "10:00", "14:00")
        .with_shift(date(2021, 12, 17), "10:00", "14:00")
        .with_shift(date(2021, 12, 31), "10:00", "14:00")
        .with_shift(date(2022, 1, 7), "10:00", "14:00")
        // monday
        .with_shift(date(2022, 1, 10), "10:00", "12:00")
        .with_break(date(2021, 9, 16), "12:00", "13:00")
        .with_holidays([date(2021, 1, 1), date(2021, 12, 25), date(2021, 12, 31)]);
    Schedule::new(&raw).unwrap()
}

#[test]
fn exposes_the_configuration_it_was_built_from() {
    let schedule = regular_schedule();
    let configuration = business_time::Configuration::new(&regular_config()).unwrap();
    assert_eq!(schedule.intervals(), configuration.intervals().as_slice());
    assert_eq!(schedule.holidays(), configuration.holidays());
    assert_eq!(schedule.time_zone(), configuration.time_zone());
    assert_eq!(schedule.breaks().len(), 2);
    assert!(schedule.shifts().is_empty());
}

#[test]
fn first_period_after_a_sunday() {
    let raw = RawConfiguration::new().with_hours("mon", "01:00", "02:00");
    let schedule = Schedule::new(&raw).unwrap();
    assert_eq!(
        schedule.periods().after(utc(2006, 1, 1, 0, 0)).next(),
        Some(TimeSegment::new(utc(2006, 1, 2, 1, 0), utc(2006, 1, 2, 2, 0)))
    );
}

#[test]
fn default_hours_are_weekday_office_hours() {
    let schedule = Schedule::default();
    assert_eq!(
        schedule.periods().after(utc(2006, 1, 1, 0, 0)).next(),
        Some(TimeSegment::new(utc(2006, 1, 2, 9, 0), utc(2006, 1, 2, 17, 0)))
    );
}

#[test]
fn periods_after_clip_the_first_period_and_split_on_breaks() {
    let schedule = regular_schedule();
    let periods: Vec<_> = schedule
        .periods()
        .after(utc(2006, 1, 2, 9, 30))
        .take(4)
        .collect();
    assert_eq!(
        periods,
        vec![
            TimeSegment::new(utc(2006, 1, 2, 9, 30), utc(2006, 1, 2, 10, 0)),
            TimeSegment::new(utc(2006, 1, 2, 11, 30), utc(2006, 1, 2, 17, 0)),
            TimeSegment::new(utc(2006, 1, 3, 10, 0), utc(2006, 1, 3, 14, 15)),
            TimeSegment::new(utc(2006, 1, 3, 14, 30), utc(2006, 1, 3, 15, 40)),
        ]
    );
}

#[test]
fn periods_before_run_backward() {
    let schedule = regular_schedule();
    let periods: Vec<_> = schedule
        .periods()
        .before(utc(2006, 1, 3, 15, 0))
        .take(3)
        .collect();
    assert_eq!(
        periods,
        vec![
            TimeSegment::new(utc(2006, 1, 3, 14, 30), utc(2006, 1, 3, 15, 0)),
            TimeSegment::new(utc(2006, 1, 3, 10, 0), utc(2006, 1, 3, 14, 15)),
            TimeSegment::new(utc(2006, 1, 2, 11, 30), utc(2006, 1, 2, 17, 0)),
        ]
    );
}

#[test]
fn dates_after_skip_closed_days() {
    let raw = RawConfiguration::new()
        .with_hours("mon", "09:00", "17:00")
        .with_hours("fri", "09:00", "17:00");
    let schedule = Schedule::new(&raw).unwrap();
    let dates: Vec<_> = schedule.dates().after(date(2006, 1, 1)).take(2).collect();
    assert_eq!(dates, vec![date(2006, 1, 2), date(2006, 1, 6)]);
}

#[test]
fn dates_before_include_the_given_date() {
    let schedule = regular_schedule();
    let dates: Vec<_> = schedule.dates().before(date(2006, 1, 3)).take(3).collect();
    // 2006-01-01 is a holiday and a Sunday anyway.
    assert_eq!(dates, vec![date(2006, 1, 3), date(2006, 1, 2), date(2005, 12, 31)]);
    assert!(schedule.dates().active(date(2006, 1, 3)));
    assert!(!schedule.dates().active(date(2006, 1, 1)));
}

#[test]
fn holidays_are_absent_from_dates() {
    let raw = RawConfiguration::new()
        .with_hours("mon", "09:00", "17:00")
        .with_holiday(date(2006, 1, 2));
    let schedule = Schedule::new(&raw).unwrap();
    let first = schedule.dates().after(date(2006, 1, 1)).next();
    assert_eq!(first, Some(date(2006, 1, 9)));
}

#[test]
fn time_after_consumes_business_time() {
    let schedule = regular_schedule();
    assert_eq!(
        schedule
            .time(30, TimeUnit::Minutes)
            .after(utc(2006, 1, 2, 9, 0)),
        Ok(utc(2006, 1, 2, 9, 30))
    );
    // One hour before the break, the rest after it.
    assert_eq!(
        schedule.time(2, TimeUnit::Hours).after(utc(2006, 1, 2, 9, 0)),
        Ok(utc(2006, 1, 2, 12, 30))
    );
}

#[test]
fn time_ending_exactly_at_close_stays_on_that_day() {
    let schedule = Schedule::default();
    assert_eq!(
        schedule.time(8, TimeUnit::Hours).after(utc(2006, 1, 2, 9, 0)),
        Ok(utc(2006, 1, 2, 17, 0))
    );
}

#[test]
fn zero_time_snaps_to_the_next_period() {
    let schedule = Schedule::default();
    assert_eq!(
        schedule.time(0, TimeUnit::Hours).after(utc(2006, 1, 7, 12, 0)),
        Ok(utc(2006, 1, 9, 9, 0))
    );
    assert_eq!(
        schedule.time(0, TimeUnit::Hours).before(utc(2006, 1, 7, 12, 0)),
        Ok(utc(2006, 1, 6, 17, 0))
    );
}

#[test]
fn time_before_and_negative_amounts_search_backward() {
    let schedule = Schedule::default();
    let expected = Ok(utc(2006, 1, 6, 15, 0));
    assert_eq!(
        schedule.time(2, TimeUnit::Hours).before(utc(2006, 1, 9, 9, 0)),
        expected
    );
    assert_eq!(
        schedule.time(-2, TimeUnit::Hours).after(utc(2006, 1, 9, 9, 0)),
        expected
    );
}

#[test]
fn within_sums_business_time_in_either_order() {
    let schedule = regular_schedule();
    let thursday_noon = utc(2006, 1, 5, 12, 0);
    let friday_noon = utc(2006, 1, 6, 12, 0);
    assert_eq!(schedule.within(thursday_noon, friday_noon), TimeDelta::hours(7));
    assert_eq!(schedule.within(friday_noon, thursday_noon), TimeDelta::hours(7));
}

#[test]
fn within_spans_a_week_of_default_hours() {
    let schedule = Schedule::default();
    // Thursday 5h, Friday 8h, Monday to Thursday 32h, Friday morning 3h.
    assert_eq!(
        schedule.within(utc(2006, 1, 5, 12, 0), utc(2006, 1, 13, 12, 0)),
        TimeDelta::hours(48)
    );
}

#[test]
fn in_hours_is_half_open() {
    let schedule = regular_schedule();
    assert!(!schedule.in_hours(utc(2006, 1, 2, 8, 0)));
    assert!(schedule.in_hours(utc(2006, 1, 2, 12, 0)));
    assert!(schedule.business_hours(utc(2006, 1, 2, 12, 0)));
    assert!(schedule.in_hours(utc(2006, 1, 4, 9, 0)));
    assert!(!schedule.in_hours(utc(2006, 1, 4, 17, 0)));
    // Inside the break.
    assert!(!schedule.in_hours(utc(2006, 1, 2, 11, 0)));
}

#[test]
fn on_break_checks_break_windows() {
    let schedule = regular_schedule();
    assert!(schedule.on_break(utc(2006, 1, 2, 11, 0)));
    assert!(!schedule.on_break(utc(2006, 1, 2, 13, 0)));
    assert!(!schedule.on_break(utc(2006, 1, 2, 11, 30)));
}

#[test]
fn on_holiday_checks_the_local_date() {
    let schedule = regular_schedule();
    assert!(schedule.on_holiday(utc(2006, 12, 25, 12, 0)));
    assert!(!schedule.on_holiday(utc(2006, 12, 26, 12, 0)));

    let pacific = Schedule::new(
        &RawConfiguration::new()
            .with_holiday(date(2006, 12, 25))
            .with_time_zone("America/Los_Angeles"),
    )
    .unwrap();
    // Still Christmas Eve in Los Angeles.
    assert!(!pacific.on_holiday(utc(2006, 12, 25, 6, 0)));
    assert!(pacific.on_holiday(utc(2006, 12, 25, 12, 0)));
}

#[test]
fn in_zone_shows_local_time() {
    let schedule = Schedule::new(&regular_config().with_time_zone("America/Los_Angeles")).unwrap();
    let local = schedule.in_zone().local(utc(2006, 1, 1, 10, 0));
    assert_eq!(local.hour(), 2);
    assert_eq!(local.date_naive(), date(2006, 1, 1));
}

#[test]
fn periods_resolve_in_the_schedule_time_zone() {
    let schedule = Schedule::new(
        &RawConfiguration::new()
            .with_hours("mon", "09:00", "17:00")
            .with_time_zone("America/New_York"),
    )
    .unwrap();
    assert_eq!(
        schedule.periods().after(utc(2006, 1, 1, 0, 0)).next(),
        Some(TimeSegment::new(utc(2006, 1, 2, 14, 0), utc(2006, 1, 2, 22, 0)))
    );
    // After the spring change the offset is four hours.
    assert_eq!(
        schedule.periods().after(utc(2006, 4, 2, 0, 0)).next(),
        Some(TimeSegment::new(utc(2006, 4, 3, 13, 0), utc(2006, 4, 3, 21, 0)))
    );
}

#[test]
fn saturday_hours_until_midnight_end_on_the_next_week() {
    let schedule =
        Schedule::new(&RawConfiguration::new().with_hours("sat", "22:00", "24:00")).unwrap();
    assert_eq!(
        schedule.periods().after(utc(2006, 1, 1, 0, 0)).next(),
        Some(TimeSegment::new(utc(2006, 1, 7, 22, 0), utc(2006, 1, 8, 0, 0)))
    );
}

#[test]
fn irregular_periods_come_from_shifts() {
    let schedule = irregular_schedule();
    assert_eq!(
        schedule.periods().after(utc(2021, 9, 22, 0, 0)).next(),
        Some(TimeSegment::new(utc(2021, 9, 22, 10, 0), utc(2021, 9, 22, 14, 0)))
    );
    assert_eq!(
        schedule.periods().after(utc(2021, 9, 23, 0, 0)).next(),
        Some(TimeSegment::new(utc(2021, 12, 3, 10, 0), utc(2021, 12, 3, 14, 0)))
    );
    // 2021-12-31 is a holiday.
    assert_eq!(
        schedule.periods().after(utc(2021, 12, 31, 0, 0)).next(),
        Some(TimeSegment::new(utc(2022, 1, 7, 10, 0), utc(2022, 1, 7, 14, 0)))
    );
}

#[test]
fn irregular_dates_time_and_within() {
    let schedule = irregular_schedule();
    let dates: Vec<_> = schedule.dates().after(date(2021, 12, 1)).take(3).collect();
    assert_eq!(dates, vec![date(2021, 12, 3), date(2021, 12, 17), date(2022, 1, 7)]);
    assert_eq!(
        schedule.time(30, TimeUnit::Minutes).after(utc(2021, 12, 3, 10, 0)),
        Ok(utc(2021, 12, 3, 10, 30))
    );
    assert_eq!(
        schedule.within(utc(2021, 12, 3, 12, 0), utc(2021, 12, 3, 15, 0)),
        TimeDelta::hours(2)
    );
}

#[test]
fn irregular_hours_breaks_and_holidays() {
    let schedule = irregular_schedule();
    assert!(!schedule.in_hours(utc(2021, 12, 3, 8, 0)));
    assert!(schedule.in_hours(utc(2021, 12, 3, 12, 0)));
    assert!(schedule.on_break(utc(2021, 9, 16, 12, 0)));
    assert!(!schedule.on_break(utc(2021, 9, 16, 11, 59)));
    assert!(schedule.on_holiday(utc(2021, 12, 31, 12, 0)));
    assert!(!schedule.on_holiday(utc(2021, 9, 22, 12, 0)));
}

#[test]
fn shifts_mix_with_weekly_hours() {
    let raw = RawConfiguration::new()
        .with_hours("wed", "08:00", "10:00")
        // alternate fridays
        .with_shift(date(2022, 1, 14), "10:00", "14:00")
        .with_shift(date(2022, 1, 28), "10:00", "14:00");
    let schedule = Schedule::new(&raw).unwrap();
    let dates: Vec<_> = schedule.dates().after(date(2022, 1, 10)).take(3).collect();
    assert_eq!(dates, vec![date(2022, 1, 12), date(2022, 1, 14), date(2022, 1, 19)]);
}

#[test]
fn shifts_replace_weekly_hours_on_their_date() {
    let raw = RawConfiguration::new()
        .with_hours("mon", "09:00", "17:00")
        .with_shift(date(2006, 1, 2), "12:00", "13:00");
    let schedule = Schedule::new(&raw).unwrap();
    let periods: Vec<_> = schedule.periods().after(utc(2006, 1, 1, 0, 0)).take(2).collect();
    assert_eq!(
        periods,
        vec![
            TimeSegment::new(utc(2006, 1, 2, 12, 0), utc(2006, 1, 2, 13, 0)),
            TimeSegment::new(utc(2006, 1, 9, 9, 0), utc(2006, 1, 9, 17, 0)),
        ]
    );
}

#[test]
fn closed_shifts_close_the_date_in_both_directions() {
    let raw = RawConfiguration::new()
        .with_hours("mon", "09:00", "17:00")
        .with_closed_shift(date(2006, 1, 9));
    let schedule = Schedule::new(&raw).unwrap();
    let after: Vec<_> = schedule.dates().after(date(2006, 1, 3)).take(2).collect();
    assert_eq!(after, vec![date(2006, 1, 16), date(2006, 1, 23)]);
    let before: Vec<_> = schedule.dates().before(date(2006, 1, 15)).take(2).collect();
    assert_eq!(before, vec![date(2006, 1, 2), date(2005, 12, 26)]);
}

#[test]
fn running_out_of_periods_is_an_unbounded_search() {
    let raw = RawConfiguration::new()
        .without_hours()
        .with_shift(date(2006, 1, 2), "09:00", "10:00");
    let schedule = Schedule::new(&raw).unwrap();
    let origin = utc(2006, 1, 1, 0, 0);
    assert_eq!(
        schedule.time(1, TimeUnit::Hours).after(origin),
        Ok(utc(2006, 1, 2, 10, 0))
    );
    assert!(matches!(
        schedule.time(2, TimeUnit::Hours).after(origin),
        Err(ScheduleError::UnboundedSearch { origin: o, .. }) if o == origin
    ));
    assert_eq!(schedule.periods().after(utc(2006, 1, 3, 0, 0)).next(), None);
}
