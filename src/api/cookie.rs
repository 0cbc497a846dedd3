//! Session cookie handling

use axum_extra::headers::Cookie;
use axum_extra::TypedHeader;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "pubmed_session";

/// Session id carried by the request, if any and well-formed
pub fn session_id(cookie: Option<&TypedHeader<Cookie>>) -> Option<Uuid> {
    cookie
        .and_then(|TypedHeader(c)| c.get(SESSION_COOKIE))
        .and_then(|raw| Uuid::parse_str(raw).ok())
}

/// `Set-Cookie` value binding the browser to `id`
pub fn set_session(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
