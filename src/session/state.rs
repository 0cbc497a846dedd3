//! Per-session conversation state

use crate::summarize::Reference;
use serde::Serialize;

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One chat message. `content` is markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Most recent successful response, replaced wholesale on each success
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LastResult {
    pub summary: String,
    pub references: Vec<Reference>,
}

/// Conversation state for one browser session.
///
/// Created empty on first contact. Holds at most the latest user/assistant
/// exchange; a new distinct query after the first clears earlier turns.
/// `last_query` always matches the newest user turn once a search has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    turns: Vec<Turn>,
    last_query: Option<String>,
    last_result: LastResult,
    search_count: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn last_result(&self) -> &LastResult {
        &self.last_result
    }

    pub fn search_count(&self) -> u64 {
        self.search_count
    }

    /// True when `query` is the same text as the last accepted query
    pub fn is_duplicate(&self, query: &str) -> bool {
        self.last_query.as_deref() == Some(query)
    }

    /// Open a new search cycle for `query`.
    ///
    /// Clears the previous exchange (except before the very first search),
    /// bumps the counter, remembers the query and appends the user turn.
    pub fn begin_search(&mut self, query: &str) {
        if self.search_count > 0 {
            self.reset_turns();
        }
        self.search_count += 1;
        self.last_query = Some(query.to_string());
        self.append_user_turn(query);
    }

    pub fn append_user_turn(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::User,
            content: text.into(),
        });
    }

    pub fn append_assistant_turn(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::Assistant,
            content: text.into(),
        });
    }

    pub fn reset_turns(&mut self) {
        self.turns.clear();
    }

    pub fn record_result(&mut self, summary: impl Into<String>, references: Vec<Reference>) {
        self.last_result = LastResult {
            summary: summary.into(),
            references,
        };
    }

    /// Surface a failure as an assistant turn. `last_result` is kept.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.append_assistant_turn(message);
    }
}
