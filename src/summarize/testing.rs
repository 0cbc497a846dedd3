//! Mock summarize client for tests

use super::{SummarizeError, SummarizeResponse, SummaryClient};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Returns queued results and records every query it receives
pub struct MockSummaryClient {
    responses: Mutex<VecDeque<Result<SummarizeResponse, SummarizeError>>>,
    /// Record of all queries made
    pub queries: Mutex<Vec<String>>,
}

impl MockSummaryClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: SummarizeResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error
    pub fn queue_error(&self, error: SummarizeError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockSummaryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SummaryClient for MockSummaryClient {
    async fn summarize(&self, query: &str) -> Result<SummarizeResponse, SummarizeError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SummarizeError::network("No mock response queued")))
    }

    fn endpoint(&self) -> &str {
        "mock://summarize"
    }
}
