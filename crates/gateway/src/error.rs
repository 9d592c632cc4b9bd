use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, GatewayError>;
