//! Whole-page layout: query box, chat tab, references tab

use super::markdown::markdown_to_html;
use super::references::render_references;
use crate::session::{Role, SessionState, Turn};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const PAGE_TITLE: &str = "🔍 PubMed Search Engine";
const PLACEHOLDER: &str = "Ask your question from PubMed...";

/// Render the full HTML document for one session
pub fn render_page(state: &SessionState) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (PAGE_TITLE) }
                link rel="stylesheet" href="/assets/style.css";
            }
            body {
                main {
                    h1 { (PAGE_TITLE) }
                    form.query method="post" action="/search"
                        onsubmit="document.body.classList.add('searching')" {
                        input type="text" name="UserQuery" placeholder=(PLACEHOLDER)
                            value=(state.last_query().unwrap_or_default()) autofocus required;
                        button type="submit" { "Search" }
                    }
                    form.end-session method="post" action="/session/end" {
                        button type="submit" { "New session" }
                    }
                    div.spinner { "🔍 Searching PubMed..." }
                    div.tabs {
                        input type="radio" name="tab" id="tab-all" checked;
                        label for="tab-all" { "ALL" }
                        input type="radio" name="tab" id="tab-refs";
                        label for="tab-refs" { "📚 References" }
                        section.panel id="panel-all" {
                            @for turn in state.turns() {
                                (render_turn(turn))
                            }
                        }
                        section.panel id="panel-refs" {
                            (render_references(state))
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

fn render_turn(turn: &Turn) -> Markup {
    let avatar = match turn.role {
        Role::User => "🧑",
        Role::Assistant => "🤖",
    };
    html! {
        div class={ "turn " (turn.role.as_str()) } {
            span.avatar { (avatar) }
            div.content { (PreEscaped(markdown_to_html(&turn.content))) }
        }
    }
}
