use thiserror::Error;

/// Error type for period and localization operations.
#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

pub type PeriodResult<T> = std::result::Result<T, PeriodError>;
