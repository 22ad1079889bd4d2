//! Error types for zoneglance operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlanceError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, GlanceError>;
