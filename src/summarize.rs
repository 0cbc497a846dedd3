//! Client for the remote search/summarize service
//!
//! One GET per query; the response is deserialized here, at the network
//! boundary, into typed structs.

mod error;
mod http;
#[cfg(test)]
pub mod testing;
mod types;

pub use error::{SummarizeError, SummarizeErrorKind};
pub use http::HttpSummaryClient;
#[allow(unused_imports)] // Public API re-exports
pub use types::{CitedReference, Reference, SummarizeResponse};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for summarize backends
#[async_trait]
pub trait SummaryClient: Send + Sync {
    /// Run one query against the service
    async fn summarize(&self, query: &str) -> Result<SummarizeResponse, SummarizeError>;

    /// Endpoint the client talks to, for logs
    fn endpoint(&self) -> &str;
}

/// Logging wrapper for summarize clients
pub struct LoggingClient {
    inner: Arc<dyn SummaryClient>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn SummaryClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SummaryClient for LoggingClient {
    async fn summarize(&self, query: &str) -> Result<SummarizeResponse, SummarizeError> {
        let start = std::time::Instant::now();
        let result = self.inner.summarize(query).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    references = response.reference_links.len(),
                    status = ?response.status,
                    "Summarize request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.label(),
                    error = %e.message,
                    "Summarize request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
