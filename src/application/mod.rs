//! Application layer - orchestration of the elicitation control flow.

mod active_sessions;
pub mod handlers;
mod retry;

pub use active_sessions::ActiveSessions;
pub use retry::RetryPolicy;
