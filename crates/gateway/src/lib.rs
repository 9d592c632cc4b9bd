pub mod client;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use client::{VapiClient, DEFAULT_BASE_URL};
pub use config::GatewaySettings;
pub use error::{GatewayError, Result};
pub use traits::CallGateway;
pub use types::*;
