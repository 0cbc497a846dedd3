//! Markdown to HTML for chat turns

use super::is_safe_url;
use pulldown_cmark::{html, Event, Parser, Tag, TagEnd};

/// Render `text` as HTML.
///
/// Raw HTML in the source is shown as text. Links and images whose
/// destination is not http(s) are unwrapped: the link text (or image alt
/// text) stays, the element does not.
pub fn markdown_to_html(text: &str) -> String {
    // One entry per open link/image: whether its start tag was kept
    let mut kept_links: Vec<bool> = Vec::new();
    let mut kept_images: Vec<bool> = Vec::new();

    let parser = Parser::new(text).filter_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { ref dest_url, .. }) => {
            let keep = is_safe_url(dest_url);
            kept_links.push(keep);
            keep.then_some(event)
        }
        Event::End(TagEnd::Link) => kept_links.pop().unwrap_or(true).then_some(event),
        Event::Start(Tag::Image { ref dest_url, .. }) => {
            let keep = is_safe_url(dest_url);
            kept_images.push(keep);
            keep.then_some(event)
        }
        Event::End(TagEnd::Image) => kept_images.pop().unwrap_or(true).then_some(event),
        other => Some(other),
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
