//! HTTP surface: the HTML page, form posts, and a small JSON API

mod assets;
mod cookie;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::session::{Dispatcher, SessionStore};
use crate::summarize::SummaryClient;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// `session_ttl` is how long an untouched session is kept
    pub fn new(client: Arc<dyn SummaryClient>, session_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(session_ttl)),
            dispatcher: Arc::new(Dispatcher::new(client)),
        }
    }
}
