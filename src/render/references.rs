//! References view

use super::is_safe_url;
use crate::session::SessionState;
use crate::summarize::Reference;
use maud::{html, Markup};

const NOT_AVAILABLE: &str = "Not available";
const NO_ABSTRACT: &str = "No abstract available.";

/// A named outbound link shown for a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLink {
    pub name: String,
    pub url: String,
}

/// Every outbound link of a reference, grouped the way the panel shows them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    pub primary: Option<DisplayLink>,
    pub similar: Option<DisplayLink>,
    pub cited: Vec<DisplayLink>,
}

/// Derive the display links of `reference`. Blank links are dropped.
pub fn display_links(reference: &Reference) -> LinkSet {
    let named = |name: &str, url: Option<&str>| {
        url.filter(|u| !u.trim().is_empty()).map(|u| DisplayLink {
            name: name.to_string(),
            url: u.to_string(),
        })
    };

    LinkSet {
        primary: named("🔗 PubMed Link", reference.link.as_deref()),
        similar: named("🧬 Similar Articles", reference.similar_articles.as_deref()),
        cited: cited_links(reference),
    }
}

/// Links from a reference's cited-reference list.
///
/// Entries without a usable link are dropped; order is preserved and each
/// link is named by its `Reference` text.
pub fn cited_links(reference: &Reference) -> Vec<DisplayLink> {
    reference
        .cited
        .iter()
        .filter_map(|cited| {
            let url = cited.usable_link()?;
            let name = cited
                .name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(url);
            Some(DisplayLink {
                name: name.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

/// Render the references tab for `state`
pub fn render_references(state: &SessionState) -> Markup {
    let references = &state.last_result().references;
    if references.is_empty() {
        let message = if state.last_query().is_some() {
            "No references found for your last query."
        } else {
            "Submit a query in the Chat tab to see references here."
        };
        return html! { div.info { (message) } };
    }

    html! {
        h3 { "📚 Articles Found" }
        @if let Some(query) = state.last_query() {
            p { "Showing references for: " em { (query) } }
        }
        @for (i, reference) in references.iter().enumerate() {
            (render_reference(i + 1, reference))
        }
    }
}

fn render_reference(index: usize, reference: &Reference) -> Markup {
    let title = reference
        .title
        .clone()
        .unwrap_or_else(|| format!("Reference {index}"));
    let abstract_text = reference.abstract_text.as_deref().unwrap_or(NO_ABSTRACT);
    let links = display_links(reference);

    html! {
        details.reference {
            summary { (index) ". " (title) }
            p {
                "📅 " strong { "Published:" } " "
                code { (date_or_placeholder(reference.published_date.as_deref())) }
                " | 🔄 " strong { "Updated:" } " "
                code { (date_or_placeholder(reference.last_updated.as_deref())) }
            }
            p { strong { "Abstract:" } " " (abstract_text) }
            @if !reference.authors.is_empty() {
                p { strong { "👨‍🔬 Authors:" } " " (reference.authors.join(", ")) }
            }
            @if links.primary.is_some() || links.similar.is_some() {
                div.links {
                    @for link in [&links.primary, &links.similar].into_iter().flatten() {
                        (link_button(link))
                    }
                }
            }
            @if links.cited.is_empty() {
                p { "No links available for this reference." }
            } @else {
                details.cited {
                    summary { "🔗 References" }
                    div.links {
                        @for link in &links.cited {
                            (link_button(link))
                        }
                    }
                }
            }
        }
    }
}

fn date_or_placeholder(date: Option<&str>) -> &str {
    date.filter(|d| !d.trim().is_empty()).unwrap_or(NOT_AVAILABLE)
}

fn link_button(link: &DisplayLink) -> Markup {
    html! {
        @if is_safe_url(&link.url) {
            a.button href=(link.url) target="_blank" rel="noopener noreferrer" { (link.name) }
        } @else {
            span.button.disabled { (link.name) }
        }
    }
}
