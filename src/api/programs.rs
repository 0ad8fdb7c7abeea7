//! Clinical program handlers.

use axum::extract::{Path, State};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::PortalError;
use crate::models::{ClinicalProgram, ProgramSlug, ResourceItem};
use crate::AppState;

/// GET /programs - List all clinical programs.
pub async fn list_programs(State(state): State<AppState>) -> ApiResult<Vec<ClinicalProgram>> {
    let programs = state.portal.programs().await?;
    success(programs)
}

/// Program page payload: the program record (when the backend knows it) and
/// its documentation forms.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<ClinicalProgram>,
    pub resources: Vec<ResourceItem>,
}

/// GET /programs/{slug} - One program and its documentation forms.
pub async fn program_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<ProgramPagePayload> {
    let slug = ProgramSlug::from_str(&slug)
        .ok_or_else(|| PortalError::NotFound(format!("Program {} not found", slug)))?;

    let resources = state.portal.program_resources(slug).await?;
    let program = state
        .portal
        .programs()
        .await?
        .into_iter()
        .find(|p| p.slug == slug);

    success(ProgramPagePayload { program, resources })
}
