pub mod domain;
pub mod error;

pub use domain::{
    parse_timestamp, Assistant, BulkDispatchOutcome, CallRequest, CallResult, CallStatus,
    DispatchMode, DEFAULT_DELAY_MS,
};
pub use error::{CoreError, Result};
