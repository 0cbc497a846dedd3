//! reqwest-backed summarize client

use super::{SummarizeError, SummarizeResponse, SummaryClient};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

/// Query parameter the service reads the user's text from
pub const QUERY_PARAM: &str = "UserQuery";

/// Longest slice of an error body carried into the error message
const MAX_BODY_IN_ERROR: usize = 300;

pub struct HttpSummaryClient {
    client: Client,
    endpoint: String,
}

impl HttpSummaryClient {
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.summarize_endpoint(),
        })
    }

    fn classify_status(status: StatusCode, body: &str) -> SummarizeError {
        let detail = truncate(body.trim(), MAX_BODY_IN_ERROR);
        let message = if detail.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {detail}")
        };
        SummarizeError::status(status.as_u16(), message)
    }
}

#[async_trait]
impl SummaryClient for HttpSummaryClient {
    async fn summarize(&self, query: &str) -> Result<SummarizeResponse, SummarizeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(QUERY_PARAM, query)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SummarizeError::from_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SummarizeError::from_transport(&e))?;

        if !status.is_success() {
            return Err(Self::classify_status(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| SummarizeError::decode(format!("Failed to parse response: {e}")))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", text.get(..idx).unwrap_or(text)),
        None => text.to_string(),
    }
}
