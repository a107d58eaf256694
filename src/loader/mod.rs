//! Reading and writing configurations and holiday lists.

mod file;

pub use file::{
    configuration_from_json_reader, load_configuration_from_json, load_holidays_from_csv,
    load_schedule_from_json, save_configuration_to_json, save_holidays_to_csv,
};

use crate::configuration::ConfigurationError;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Serialization(SerdeJsonError),
    Csv(csv::Error),
    InvalidData(String),
    Configuration(ConfigurationError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "io error: {err}"),
            LoadError::Serialization(err) => write!(f, "serialization error: {err}"),
            LoadError::Csv(err) => write!(f, "csv error: {err}"),
            LoadError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            LoadError::Configuration(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Serialization(err) => Some(err),
            LoadError::Csv(err) => Some(err),
            LoadError::Configuration(err) => Some(err),
            LoadError::InvalidData(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SerdeJsonError> for LoadError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<csv::Error> for LoadError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<ConfigurationError> for LoadError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
