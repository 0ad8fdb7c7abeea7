//! Public page handlers.
//!
//! Page rendering lives in the frontend; these handlers serve the thin
//! payloads the public pages are built from. Unmatched paths fall back to
//! the home payload.

use serde::Serialize;

use super::{success, ApiResult};

/// Payload for a public marketing page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePayload {
    pub page: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

/// GET / - Home page payload. Also serves as the fallback for unmatched
/// paths.
pub async fn home() -> ApiResult<PagePayload> {
    success(PagePayload {
        page: "home",
        title: "ClinicalRxQ",
        body: "Turnkey clinical pharmacy programs, training, and documentation for community pharmacy teams.",
    })
}

/// GET /login - Login page payload.
pub async fn login_page() -> ApiResult<PagePayload> {
    success(PagePayload {
        page: "login",
        title: "Member Login",
        body: "Sign in with your member email and password to access your programs.",
    })
}

/// GET /join and /enroll - Enrollment page payload.
pub async fn join() -> ApiResult<PagePayload> {
    success(PagePayload {
        page: "join",
        title: "Join ClinicalRxQ",
        body: "Enroll your pharmacy to unlock the full program and resource library.",
    })
}

/// GET /contact - Contact page payload.
pub async fn contact() -> ApiResult<PagePayload> {
    success(PagePayload {
        page: "contact",
        title: "Contact",
        body: "Questions about membership or programs? Reach out to the ClinicalRxQ team.",
    })
}
