pub mod error;
pub mod invoker;
pub mod sequencer;

pub use error::{DispatchError, Result};
pub use invoker::CallInvoker;
pub use sequencer::Dispatcher;
