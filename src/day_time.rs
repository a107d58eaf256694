use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MINUTES_IN_HOUR: u32 = 60;
pub const HOURS_IN_DAY: u32 = 24;
pub const MINUTES_IN_DAY: u32 = MINUTES_IN_HOUR * HOURS_IN_DAY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayTimeError {
    InvalidFormat(String),
    OutOfRange(i64),
}

impl fmt::Display for DayTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayTimeError::InvalidFormat(value) => {
                write!(f, "invalid time of day '{value}' (expected HH:MM)")
            }
            DayTimeError::OutOfRange(minutes) => write!(
                f,
                "day minute {minutes} is outside 0..={MINUTES_IN_DAY}"
            ),
        }
    }
}

impl std::error::Error for DayTimeError {}

/// A position within a day, in minutes since midnight.
///
/// `1440` (`"24:00"`) is valid and denotes the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayTime(u32);

impl DayTime {
    pub const MIDNIGHT: DayTime = DayTime(0);
    pub const ENDNIGHT: DayTime = DayTime(MINUTES_IN_DAY);

    pub fn from_minutes(minutes: i64) -> Result<Self, DayTimeError> {
        if !(0..=i64::from(MINUTES_IN_DAY)).contains(&minutes) {
            return Err(DayTimeError::OutOfRange(minutes));
        }
        Ok(Self(minutes as u32))
    }

    pub fn from_hour_minute(hour: u32, minute: u32) -> Result<Self, DayTimeError> {
        if minute >= MINUTES_IN_HOUR {
            return Err(DayTimeError::InvalidFormat(format!("{hour:02}:{minute:02}")));
        }
        Self::from_minutes(i64::from(hour) * i64::from(MINUTES_IN_HOUR) + i64::from(minute))
    }

    pub fn day_minute(&self) -> u32 {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0 / MINUTES_IN_HOUR
    }

    pub fn minute(&self) -> u32 {
        self.0 % MINUTES_IN_HOUR
    }

    pub fn is_endnight(&self) -> bool {
        self.0 == MINUTES_IN_DAY
    }

    pub fn timestamp(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for DayTime {
    type Err = DayTimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DayTimeError::InvalidFormat(value.to_string());
        let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(hour) || !digits(minute) {
            return Err(invalid());
        }
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        if hour > HOURS_IN_DAY || (hour == HOURS_IN_DAY && minute != 0) {
            return Err(invalid());
        }
        Self::from_hour_minute(hour, minute)
    }
}

impl TryFrom<String> for DayTime {
    type Error = DayTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayTime> for String {
    fn from(value: DayTime) -> Self {
        value.timestamp()
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.timestamp())
    }
}
