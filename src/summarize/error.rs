//! Summarize client error types

use serde::Serialize;
use std::error::Error as StdError;
use thiserror::Error;

/// Failure of a single summarize call, with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SummarizeError {
    pub kind: SummarizeErrorKind,
    pub message: String,
}

impl SummarizeError {
    pub fn new(kind: SummarizeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SummarizeErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(SummarizeErrorKind::Timeout, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(SummarizeErrorKind::Status(code), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(SummarizeErrorKind::Decode, message)
    }

    /// Classify a transport-level reqwest failure.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let detail = error_chain(err);
        if err.is_timeout() {
            Self::timeout(format!("Request timed out: {detail}"))
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {detail}"))
        } else if err.is_decode() {
            Self::decode(format!("Failed to read response: {detail}"))
        } else {
            Self::network(format!("Request failed: {detail}"))
        }
    }
}

/// Error classification, surfaced in the JSON API and in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarizeErrorKind {
    /// Connection refused, DNS, TLS or other transport failure
    Network,
    /// The fixed request timeout elapsed
    Timeout,
    /// The service answered with a non-2xx status
    Status(u16),
    /// The body was not the expected JSON shape
    Decode,
}

impl SummarizeErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Status(_) => "status",
            Self::Decode => "decode",
        }
    }
}

/// Join an error with all of its sources.
///
/// reqwest keeps the interesting part ("Connection refused") in the source
/// chain, not in the top-level `Display`.
fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
