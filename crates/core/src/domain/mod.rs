mod assistant;
mod call;
mod dispatch;

pub use assistant::Assistant;
pub use call::{CallRequest, CallResult, CallStatus};
pub use dispatch::{parse_timestamp, BulkDispatchOutcome, DispatchMode, DEFAULT_DELAY_MS};
