//! Member authentication gate for protected routes.
//!
//! Evaluated per request: reads the stored session from the client-state
//! store (no network call, no freshness check against the backend) and
//! redirects to the login page when no valid session is presented. Token
//! comparison is constant-time to mitigate timing attacks.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use subtle::ConstantTimeEq;

use crate::AppState;

/// Header carrying the session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Gate layer applied to member-only routes.
///
/// Absent session -> redirect to `/login`. Present session -> the request
/// must carry the matching token in `x-session-token` or as a bearer token.
pub async fn member_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(session) = state.portal.stored_session().await else {
        return Redirect::to("/login").into_response();
    };

    // Prefer the dedicated header, fall back to Authorization: Bearer
    let provided = request
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .or_else(|| {
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
                .map(|s| s.to_string())
        });

    match provided {
        Some(token) if constant_time_compare(&token, &session.token) => next.run(request).await,
        _ => Redirect::to("/login").into_response(),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
