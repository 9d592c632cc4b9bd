use thiserror::Error;

/// Reasons a dispatch is refused before any call goes out.
///
/// Failures of individual calls are not errors; they are recorded in the
/// outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(String),

    #[error("Server configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
