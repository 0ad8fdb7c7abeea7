//! Member dashboard handler.

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::PortalError;
use crate::models::{Announcement, MemberAccount, QuickAccessItem, RecentActivity};
use crate::AppState;

/// Everything the dashboard page renders in one payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub member: MemberAccount,
    pub quick_access: Vec<QuickAccessItem>,
    pub recent_activity: Vec<RecentActivity>,
    pub announcements: Vec<Announcement>,
}

/// GET /dashboard - Member dashboard.
///
/// The gate guarantees a session; the extras are placeholders that stay
/// empty until server sources are wired.
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<DashboardPayload> {
    let session = state
        .portal
        .stored_session()
        .await
        .ok_or_else(|| PortalError::Unauthorized("No active session".to_string()))?;

    success(DashboardPayload {
        member: session.member,
        quick_access: state.portal.quick_access().await,
        recent_activity: state.portal.recent_activity().await,
        announcements: state.portal.announcements().await,
    })
}
