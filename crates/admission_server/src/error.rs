//! Start-up failures of the server process.

use admission_core::{BootstrapError, FeeTableError, LoggingError, RatingStoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ServerError {
    Logging(LoggingError),
    FeeTable(FeeTableError),
    Bootstrap(BootstrapError),
    Ratings(RatingStoreError),
    Io(std::io::Error),
    Runtime(String),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "logging setup failed: {err}"),
            Self::FeeTable(err) => write!(f, "invalid fee table: {err}"),
            Self::Bootstrap(err) => write!(f, "{err}"),
            Self::Ratings(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Runtime(message) => write!(f, "runtime failure: {message}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::FeeTable(err) => Some(err),
            Self::Bootstrap(err) => Some(err),
            Self::Ratings(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Runtime(_) => None,
        }
    }
}

impl From<LoggingError> for ServerError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<FeeTableError> for ServerError {
    fn from(value: FeeTableError) -> Self {
        Self::FeeTable(value)
    }
}

impl From<BootstrapError> for ServerError {
    fn from(value: BootstrapError) -> Self {
        Self::Bootstrap(value)
    }
}

impl From<RatingStoreError> for ServerError {
    fn from(value: RatingStoreError) -> Self {
        Self::Ratings(value)
    }
}
