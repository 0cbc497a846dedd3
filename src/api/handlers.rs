//! HTTP request handlers

use super::assets::serve_static;
use super::cookie::{clear_session, session_id, set_session};
use super::types::{
    ErrorResponse, SearchForm, SearchRequest, SearchResponse, SessionResponse, VersionResponse,
};
use super::AppState;
use crate::render::render_page;
use crate::session::{DispatchOutcome, SessionState, SkipReason};
use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::headers::Cookie;
use axum_extra::TypedHeader;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // The single page
        .route("/", get(index))
        // Query box submission
        .route("/search", post(search_form))
        .route("/session/end", post(end_session))
        // JSON API
        .route("/api/search", post(search_json))
        .route("/api/session", get(get_session))
        // Static assets
        .route("/assets/*path", get(serve_static))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

/// Render the page. A visitor without a live session sees the empty page;
/// the session itself is created by the first search.
async fn index(
    State(state): State<AppState>,
    cookie: Option<TypedHeader<Cookie>>,
) -> Response {
    let Some(id) = session_id(cookie.as_ref()) else {
        return Html(render_page(&SessionState::new())).into_response();
    };
    let Some(session) = state.sessions.get(id).await else {
        return Html(render_page(&SessionState::new())).into_response();
    };

    let html = render_page(&*session.lock().await);
    ([(SET_COOKIE, set_session(id))], Html(html)).into_response()
}

async fn search_form(
    State(state): State<AppState>,
    cookie: Option<TypedHeader<Cookie>>,
    Form(form): Form<SearchForm>,
) -> Response {
    let (id, session) = state
        .sessions
        .get_or_create(session_id(cookie.as_ref()))
        .await;

    // Held across the request so one session runs one search at a time
    let mut session = session.lock().await;
    let outcome = state.dispatcher.dispatch(&mut session, &form.user_query).await;
    drop(session);
    log_outcome(&outcome);

    // Post/redirect/get: a browser refresh re-renders instead of re-posting
    ([(SET_COOKIE, set_session(id))], Redirect::to("/")).into_response()
}

async fn end_session(
    State(state): State<AppState>,
    cookie: Option<TypedHeader<Cookie>>,
) -> Response {
    if let Some(id) = session_id(cookie.as_ref()) {
        state.sessions.end(id).await;
    }
    let active = state.sessions.len().await;
    tracing::debug!(active, "Session end requested");

    ([(SET_COOKIE, clear_session())], Redirect::to("/")).into_response()
}

// ============================================================
// JSON API
// ============================================================

async fn search_json(
    State(state): State<AppState>,
    cookie: Option<TypedHeader<Cookie>>,
    Json(req): Json<SearchRequest>,
) -> Response {
    let (id, session) = state
        .sessions
        .get_or_create(session_id(cookie.as_ref()))
        .await;

    let mut session = session.lock().await;
    let outcome = state.dispatcher.dispatch(&mut session, &req.query).await;
    log_outcome(&outcome);
    let body = SearchResponse {
        outcome,
        session: session.clone(),
    };
    drop(session);

    ([(SET_COOKIE, set_session(id))], Json(body)).into_response()
}

async fn get_session(
    State(state): State<AppState>,
    cookie: Option<TypedHeader<Cookie>>,
) -> Result<Json<SessionResponse>, AppError> {
    let id = session_id(cookie.as_ref())
        .ok_or_else(|| AppError::NotFound("No session cookie".to_string()))?;
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Unknown session {id}")))?;

    let snapshot = session.lock().await.clone();
    Ok(Json(SessionResponse { session: snapshot }))
}

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn log_outcome(outcome: &DispatchOutcome) {
    tracing::debug!(dispatched = outcome.dispatched(), "Submission handled");
    match outcome {
        DispatchOutcome::Skipped {
            reason: SkipReason::Empty,
        } => tracing::debug!("Empty submission skipped"),
        DispatchOutcome::Skipped {
            reason: SkipReason::Duplicate,
        } => tracing::debug!("Repeated submission skipped"),
        DispatchOutcome::Failed { kind, .. } => {
            tracing::warn!(kind = kind.label(), "Search ended with an error turn");
        }
        DispatchOutcome::Found { references } | DispatchOutcome::NoArticles { references } => {
            tracing::info!(
                references = *references,
                no_articles = matches!(outcome, DispatchOutcome::NoArticles { .. }),
                "Search completed"
            );
        }
    }
}

// ============================================================
// Errors
// ============================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
