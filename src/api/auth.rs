//! Login and logout handlers.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::models::{AuthSession, LoginRequest};
use crate::AppState;

/// POST /login - Authenticate a member and persist the session.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<AuthSession> {
    let session = state.portal.login(&request.email, &request.password).await?;
    success(session)
}

/// POST /logout - Clear the persisted session. Never fails.
pub async fn logout(State(state): State<AppState>) -> ApiResult<()> {
    state.portal.logout().await;
    success(())
}
