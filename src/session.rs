//! Conversation state store and query dispatch
//!
//! Each browser session owns one `SessionState`. The dispatcher is the only
//! writer during a search; rendering only reads.

mod dispatch;
#[cfg(test)]
mod proptests;
mod state;
mod store;

pub use dispatch::{DispatchOutcome, Dispatcher, SkipReason};
pub use state::{Role, SessionState, Turn};
pub use store::SessionStore;
