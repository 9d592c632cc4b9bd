use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid timestamp '{value}': expected an ISO-8601 date and time")]
    InvalidTimestamp { value: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
