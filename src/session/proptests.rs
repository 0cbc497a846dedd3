//! Property-based tests for the session state
//!
//! Random submission sequences must never break the single-exchange and
//! last-query invariants.

use super::*;
use crate::summarize::testing::MockSummaryClient;
use crate::summarize::{Reference, SummarizeError, SummarizeResponse};
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Arbitrary Generators
// ============================================================================

#[derive(Debug, Clone)]
enum Reply {
    Found(usize),
    NoArticles,
    Failure,
}

fn arb_reply() -> impl Strategy<Value = Reply> {
    prop_oneof![
        (0usize..4).prop_map(Reply::Found),
        Just(Reply::NoArticles),
        Just(Reply::Failure),
    ]
}

/// Small alphabet so repeated queries actually happen
fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        "[ab]{1,2}",
    ]
}

fn arb_steps() -> impl Strategy<Value = Vec<(String, Reply)>> {
    prop::collection::vec((arb_query(), arb_reply()), 1..20)
}

fn queue(client: &MockSummaryClient, reply: &Reply) {
    match reply {
        Reply::Found(n) => client.queue_response(SummarizeResponse {
            summary: Some("s".into()),
            reference_links: vec![Reference::default(); *n],
            status: None,
        }),
        Reply::NoArticles => client.queue_response(SummarizeResponse {
            summary: None,
            reference_links: vec![],
            status: Some(404),
        }),
        Reply::Failure => client.queue_error(SummarizeError::network("down")),
    }
}

fn run(steps: &[(String, Reply)]) -> (SessionState, Vec<DispatchOutcome>, Vec<String>) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let client = Arc::new(MockSummaryClient::new());
    let dispatcher = Dispatcher::new(client.clone());
    let mut state = SessionState::new();
    let mut outcomes = Vec::new();

    runtime.block_on(async {
        for (query, reply) in steps {
            // Only the reply for an actual call is consumed
            let trimmed = query.trim();
            if !trimmed.is_empty() && !state.is_duplicate(trimmed) {
                queue(&client, reply);
            }
            outcomes.push(dispatcher.dispatch(&mut state, query).await);
        }
    });

    (state, outcomes, client.recorded_queries())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn at_most_one_exchange(steps in arb_steps()) {
        let (state, _, _) = run(&steps);
        let turns = state.turns();
        prop_assert!(turns.len() <= 2);
        if let Some(first) = turns.first() {
            prop_assert_eq!(first.role, Role::User);
        }
        if let Some(second) = turns.get(1) {
            prop_assert_eq!(second.role, Role::Assistant);
        }
    }

    #[test]
    fn last_query_matches_last_user_turn(steps in arb_steps()) {
        let (state, _, _) = run(&steps);
        if state.search_count() > 0 {
            let last_user = state
                .turns()
                .iter()
                .rev()
                .find(|t| t.role == Role::User)
                .map(|t| t.content.as_str());
            prop_assert_eq!(state.last_query(), last_user);
        } else {
            prop_assert!(state.turns().is_empty());
            prop_assert_eq!(state.last_query(), None);
        }
    }

    #[test]
    fn one_call_per_dispatched_outcome(steps in arb_steps()) {
        let (state, outcomes, queries) = run(&steps);
        let dispatched = outcomes.iter().filter(|o| o.dispatched()).count();
        prop_assert_eq!(dispatched, queries.len());
        prop_assert_eq!(state.search_count(), queries.len() as u64);
        for pair in queries.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }
}
