use thiserror::Error;

/// Configuration errors shared by every crate.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
