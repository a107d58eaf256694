pub mod business_hours;
pub mod calculation;
pub mod configuration;
pub mod dates;
pub mod day_time;
pub mod holidays;
pub mod intersection;
pub mod interval;
pub mod loader;
pub mod periods;
pub mod schedule;
pub mod time_segment;
pub mod week_time;
pub mod zone;

pub use business_hours::BusinessHours;
pub use calculation::TimeUnit;
pub use configuration::{Configuration, ConfigurationError, RawConfiguration};
pub use day_time::DayTime;
pub use holidays::Holidays;
pub use intersection::Intersection;
pub use interval::Interval;
pub use schedule::{Schedule, ScheduleError};
pub use time_segment::TimeSegment;
pub use week_time::{Week, WeekTime, WeekTimeError};
pub use zone::Zone;
