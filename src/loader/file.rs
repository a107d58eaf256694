use super::{LoadError, LoadResult};
use crate::configuration::{Configuration, RawConfiguration};
use crate::holidays::Holidays;
use crate::schedule::Schedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn configuration_from_json_reader<R: Read>(reader: R) -> LoadResult<Configuration> {
    let raw: RawConfiguration = serde_json::from_reader(reader)?;
    Ok(Configuration::new(&raw)?)
}

pub fn load_configuration_from_json<P: AsRef<Path>>(path: P) -> LoadResult<Configuration> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let configuration = configuration_from_json_reader(BufReader::new(file))?;
    log::debug!("loaded configuration from {}", path.display());
    Ok(configuration)
}

pub fn load_schedule_from_json<P: AsRef<Path>>(path: P) -> LoadResult<Schedule> {
    load_configuration_from_json(path).map(Schedule::from_configuration)
}

pub fn save_configuration_to_json<P: AsRef<Path>>(
    configuration: &Configuration,
    path: P,
) -> LoadResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &RawConfiguration::from(configuration))?;
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct HolidayCsvRecord {
    date: String,
}

/// Reads a CSV file with a `date` column (`YYYY-MM-DD`). Blank dates are skipped.
pub fn load_holidays_from_csv<P: AsRef<Path>>(path: P) -> LoadResult<Holidays> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut holidays = Holidays::default();
    for record in reader.deserialize::<HolidayCsvRecord>() {
        let record = record?;
        if record.date.is_empty() {
            continue;
        }
        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT).map_err(|err| {
            LoadError::InvalidData(format!("invalid holiday date '{}': {err}", record.date))
        })?;
        holidays.add_holiday(date);
    }

    log::debug!("loaded {} holidays from {}", holidays.len(), path.display());
    Ok(holidays)
}

pub fn save_holidays_to_csv<P: AsRef<Path>>(holidays: &Holidays, path: P) -> LoadResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for date in holidays.iter() {
        writer.serialize(HolidayCsvRecord {
            date: date.format(DATE_FORMAT).to_string(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
