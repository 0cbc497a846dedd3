//! Wire types for the summarize endpoint

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary used when the service omits one
pub const NO_SUMMARY: &str = "No summary available.";

/// `Status` value the service uses for "no articles matched"
pub const NO_ARTICLES_STATUS: i64 = 404;

/// Body of `GET /api/summarize`.
///
/// Only a JSON object is accepted; any other top-level shape is a decode
/// error. `Status` is kept only when it is an integer, so a quoted
/// `"404"` is not the no-articles sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct SummarizeResponse {
    pub summary: Option<String>,
    #[serde(rename = "Reference_links")]
    pub reference_links: Vec<Reference>,
    #[serde(rename = "Status")]
    pub status: Option<i64>,
}

/// Field layout of the response object as it arrives
#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    summary: Option<String>,
    #[serde(rename = "Reference_links", default)]
    reference_links: Vec<Reference>,
    #[serde(rename = "Status", default)]
    status: Option<Value>,
}

impl TryFrom<Map<String, Value>> for SummarizeResponse {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let wire: WireResponse = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            summary: wire.summary,
            reference_links: wire.reference_links,
            status: wire.status.as_ref().and_then(Value::as_i64),
        })
    }
}

impl SummarizeResponse {
    /// The summary text, with the documented fallback applied
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or(NO_SUMMARY)
    }

    /// True when the service reported that nothing matched
    pub fn is_no_articles(&self) -> bool {
        self.status == Some(NO_ARTICLES_STATUS)
    }
}

/// One article returned by the service.
///
/// Every text field is optional on the wire. Rendering supplies the
/// display fallbacks; nothing here fails on a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub published_date: Option<String>,
    pub last_updated: Option<String>,
    #[serde(rename = "author", default)]
    pub authors: Vec<String>,
    /// Primary article link
    pub link: Option<String>,
    #[serde(rename = "Similar_articles")]
    pub similar_articles: Option<String>,
    #[serde(rename = "reference", default)]
    pub cited: Vec<CitedReference>,
}

/// Entry of a reference's own bibliography
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitedReference {
    #[serde(rename = "Reference")]
    pub name: Option<String>,
    pub link: Option<String>,
}

impl CitedReference {
    /// The link, if present and non-blank
    pub fn usable_link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.trim().is_empty())
    }
}
