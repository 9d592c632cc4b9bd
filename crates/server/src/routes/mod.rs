mod assistants;
mod calls;
mod health;

pub use assistants::*;
pub use calls::*;
pub use health::*;
