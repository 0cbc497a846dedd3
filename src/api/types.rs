//! API request and response types

use crate::session::{DispatchOutcome, SessionState};
use serde::{Deserialize, Serialize};

/// Form posted by the query box
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "UserQuery", default)]
    pub user_query: String,
}

/// Request to run a query through the JSON API
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Response for a JSON search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub outcome: DispatchOutcome,
    pub session: SessionState,
}

/// Response for the session snapshot
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: SessionState,
}

/// Response for version
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
