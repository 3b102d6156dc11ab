use thiserror::Error;

/// Error type for recurrence expansion and occurrence scheduling.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Unsupported frequency: {0}")]
    UnsupportedFrequency(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The expansion would generate more occurrences than the configured
    /// cap allows. Fatal: the operation produces no partial output.
    #[error("Recurrence expansion exceeded the maximum of {0} occurrences")]
    TooManyOccurrences(usize),

    /// Failure in the external persistence collaborator.
    #[error(transparent)]
    Sink(#[from] anyhow::Error),
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
