//! Server-side HTML for the chat and references views
//!
//! Markup is built with `maud`, which escapes every interpolated value.
//! Only the markdown renderer's output is inserted pre-escaped.

mod markdown;
mod page;
mod references;

pub use page::render_page;

/// Only http(s) links are turned into anchors
pub fn is_safe_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
