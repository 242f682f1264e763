use thiserror::Error;

/// Schedule layer errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error(transparent)]
    RfcError(#[from] cadence_rfc::error::RfcError),

    #[error("Calendar contains no VEVENT")]
    MissingEvent,

    #[error("Event has no usable DTSTART")]
    MissingStart,

    #[error("Recurrence interval must be positive, got {0}")]
    InvalidInterval(u32),
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
