//! Query dispatch: one user submission, one network call, one state update

use super::SessionState;
use crate::summarize::{SummarizeError, SummarizeErrorKind, SummarizeResponse, SummaryClient};
use serde::Serialize;
use std::sync::Arc;

/// Why a submission was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing but whitespace was submitted
    Empty,
    /// Same text as the previous query; re-rendering must not re-query
    Duplicate,
}

/// What a dispatch did to the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Skipped { reason: SkipReason },
    Found { references: usize },
    NoArticles { references: usize },
    Failed { kind: SummarizeErrorKind, message: String },
}

impl DispatchOutcome {
    /// True when a network call was made
    pub fn dispatched(&self) -> bool {
        !matches!(self, DispatchOutcome::Skipped { .. })
    }
}

/// Issues summarize calls on behalf of sessions
pub struct Dispatcher {
    client: Arc<dyn SummaryClient>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn SummaryClient>) -> Self {
        Self { client }
    }

    /// Handle one submission against `state`.
    ///
    /// Empty and repeated queries are no-ops. Otherwise exactly one request
    /// is made and its result, success or failure, lands in `state`. Nothing
    /// is returned as an error; failures become an assistant turn.
    pub async fn dispatch(&self, state: &mut SessionState, query: &str) -> DispatchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return DispatchOutcome::Skipped {
                reason: SkipReason::Empty,
            };
        }
        if state.is_duplicate(query) {
            tracing::debug!(query = %query, "Ignoring repeated query");
            return DispatchOutcome::Skipped {
                reason: SkipReason::Duplicate,
            };
        }

        state.begin_search(query);
        tracing::info!(search = state.search_count(), "Dispatching query");

        match self.client.summarize(query).await {
            Ok(response) => apply_response(state, response),
            Err(e) => apply_failure(state, &e),
        }
    }
}

/// Fold a successful response into the session
fn apply_response(state: &mut SessionState, response: SummarizeResponse) -> DispatchOutcome {
    let no_articles = response.is_no_articles();
    let summary = response.summary_text().to_string();
    let references = response.reference_links;
    let count = references.len();

    let message = if no_articles {
        no_articles_message(&summary, count)
    } else {
        summary_message(&summary, count)
    };

    state.record_result(summary, references);
    state.append_assistant_turn(message);

    if no_articles {
        DispatchOutcome::NoArticles { references: count }
    } else {
        DispatchOutcome::Found { references: count }
    }
}

/// Fold a failed request into the session
fn apply_failure(state: &mut SessionState, error: &SummarizeError) -> DispatchOutcome {
    state.record_error(error_message(error));
    DispatchOutcome::Failed {
        kind: error.kind,
        message: error.message.clone(),
    }
}

fn summary_message(summary: &str, references: usize) -> String {
    format!("### 📝 Summary\n{summary}\n\n📚 {references} reference(s) found.")
}

fn no_articles_message(summary: &str, references: usize) -> String {
    format!("### No Articles Found\n{summary}\n\n📚 {references} reference(s) found.")
}

fn error_message(error: &SummarizeError) -> String {
    format!("❌ Error: Failed to fetch results - {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use crate::summarize::testing::MockSummaryClient;
    use crate::summarize::{CitedReference, Reference};

    fn setup() -> (Arc<MockSummaryClient>, Dispatcher) {
        let client = Arc::new(MockSummaryClient::new());
        let dispatcher = Dispatcher::new(client.clone());
        (client, dispatcher)
    }

    fn response(summary: &str, titles: &[&str], status: Option<i64>) -> SummarizeResponse {
        SummarizeResponse {
            summary: Some(summary.to_string()),
            reference_links: titles
                .iter()
                .map(|t| Reference {
                    title: Some((*t).to_string()),
                    ..Reference::default()
                })
                .collect(),
            status,
        }
    }

    #[tokio::test]
    async fn test_duplicate_query_makes_one_call() {
        let (client, dispatcher) = setup();
        client.queue_response(response("s", &["a"], None));
        client.queue_response(response("unused", &[], None));
        let mut state = SessionState::new();

        let first = dispatcher.dispatch(&mut state, "statins").await;
        let second = dispatcher.dispatch(&mut state, "statins").await;

        assert_eq!(first, DispatchOutcome::Found { references: 1 });
        assert_eq!(
            second,
            DispatchOutcome::Skipped {
                reason: SkipReason::Duplicate
            }
        );
        assert!(!second.dispatched());
        assert_eq!(client.recorded_queries(), vec!["statins"]);
        assert_eq!(state.search_count(), 1);
        assert_eq!(state.turns().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_query_is_ignored() {
        let (client, dispatcher) = setup();
        let mut state = SessionState::new();

        let outcome = dispatcher.dispatch(&mut state, "   ").await;

        assert_eq!(
            outcome,
            DispatchOutcome::Skipped {
                reason: SkipReason::Empty
            }
        );
        assert!(client.recorded_queries().is_empty());
        assert_eq!(state, SessionState::new());
    }

    #[tokio::test]
    async fn test_success_formats_summary_turn() {
        let (client, dispatcher) = setup();
        client.queue_response(response("Aspirin helps.", &["a", "b", "c"], Some(200)));
        let mut state = SessionState::new();

        let outcome = dispatcher.dispatch(&mut state, "aspirin").await;

        assert_eq!(outcome, DispatchOutcome::Found { references: 3 });
        let turns = state.turns();
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "aspirin");
        assert_eq!(turns[1].role, Role::Assistant);
        assert!(turns[1].content.starts_with("### 📝 Summary\nAspirin helps."));
        assert!(turns[1].content.contains("3 reference(s) found."));
        assert_eq!(state.last_result().summary, "Aspirin helps.");
        assert_eq!(state.last_result().references.len(), 3);
    }

    #[tokio::test]
    async fn test_not_found_sentinel_formats_no_articles_turn() {
        let (client, dispatcher) = setup();
        client.queue_response(response("Nothing matched.", &[], Some(404)));
        let mut state = SessionState::new();

        let outcome = dispatcher.dispatch(&mut state, "zzz").await;

        assert_eq!(outcome, DispatchOutcome::NoArticles { references: 0 });
        let reply = &state.turns()[1].content;
        assert!(reply.contains("No Articles Found"));
        assert!(reply.contains("Nothing matched."));
        assert!(reply.contains("0 reference(s) found."));
    }

    #[tokio::test]
    async fn test_missing_summary_uses_default() {
        let (client, dispatcher) = setup();
        client.queue_response(SummarizeResponse::default());
        let mut state = SessionState::new();

        dispatcher.dispatch(&mut state, "q").await;

        assert_eq!(state.last_result().summary, "No summary available.");
        assert!(state.turns()[1].content.contains("No summary available."));
    }

    #[tokio::test]
    async fn test_failure_adds_one_error_turn_and_keeps_result() {
        let (client, dispatcher) = setup();
        client.queue_response(response("old", &["kept"], None));
        client.queue_error(SummarizeError::network(
            "Connection failed: Connection refused (os error 111)",
        ));
        let mut state = SessionState::new();

        dispatcher.dispatch(&mut state, "first").await;
        let before = state.last_result().clone();
        let outcome = dispatcher.dispatch(&mut state, "second").await;

        assert!(matches!(
            outcome,
            DispatchOutcome::Failed {
                kind: SummarizeErrorKind::Network,
                ..
            }
        ));
        assert_eq!(state.last_result(), &before);
        let assistant: Vec<_> = state
            .turns()
            .iter()
            .filter(|t| t.role == Role::Assistant)
            .collect();
        assert_eq!(assistant.len(), 1);
        assert!(assistant[0].content.starts_with("❌ Error"));
        assert!(assistant[0].content.contains("Connection refused"));
    }

    #[tokio::test]
    async fn test_new_query_replaces_previous_exchange() {
        let (client, dispatcher) = setup();
        client.queue_response(response("about A", &["a"], None));
        client.queue_response(response("about B", &["b"], None));
        let mut state = SessionState::new();

        dispatcher.dispatch(&mut state, "query A").await;
        dispatcher.dispatch(&mut state, "query B").await;

        let contents: Vec<&str> = state.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0], "query B");
        assert!(contents[1].contains("about B"));
        assert!(!contents.iter().any(|c| c.contains("query A") || c.contains("about A")));
        assert_eq!(state.last_query(), Some("query B"));
        assert_eq!(state.search_count(), 2);
    }

    #[tokio::test]
    async fn test_query_is_trimmed_before_duplicate_check() {
        let (client, dispatcher) = setup();
        client.queue_response(response("s", &[], None));
        let mut state = SessionState::new();

        dispatcher.dispatch(&mut state, "  statins ").await;
        let again = dispatcher.dispatch(&mut state, "statins").await;

        assert!(!again.dispatched());
        assert_eq!(client.recorded_queries(), vec!["statins"]);
    }

    #[test]
    fn test_apply_response_keeps_reference_order() {
        let mut state = SessionState::new();
        state.begin_search("q");
        let mut resp = response("s", &["first", "second"], None);
        resp.reference_links[1].cited.push(CitedReference {
            name: Some("c".into()),
            link: Some("https://example.org/c".into()),
        });

        apply_response(&mut state, resp);

        let titles: Vec<_> = state
            .last_result()
            .references
            .iter()
            .map(|r| r.title.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_eq!(state.last_result().references[1].cited.len(), 1);
    }
}
