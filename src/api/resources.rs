//! Resource library and bookmark handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::models::{
    ProgramArea, ResourceFilters, ResourceItem, ResourceSortKey, ResourceType, SortOrder,
};
use crate::AppState;

/// Library query parameters.
///
/// Tags arrive as a single comma-separated value; everything else maps
/// directly onto `ResourceFilters`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryQuery {
    #[serde(default)]
    pub program: Option<ProgramArea>,
    #[serde(default, rename = "type")]
    pub resource_type: Option<ResourceType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub bookmarked: Option<bool>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub sort_by: Option<ResourceSortKey>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

impl LibraryQuery {
    fn into_filters(self) -> ResourceFilters {
        let tags = self.tags.map(|raw| {
            raw.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
        });

        ResourceFilters {
            program: self.program,
            resource_type: self.resource_type,
            category: self.category,
            tags,
            search: self.search,
            bookmarked: self.bookmarked,
            limit: self.limit,
            offset: self.offset,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }
}

/// GET /library and /resources - Filtered resource library.
///
/// `bookmarked=true` routes through the local bookmark annotation path
/// instead of the plain backend query.
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<LibraryQuery>,
) -> ApiResult<Vec<ResourceItem>> {
    if query.bookmarked == Some(true) {
        let resources = state.portal.bookmarked_resources().await?;
        return success(resources);
    }

    let filters = query.into_filters();
    let resources = state.portal.resources(&filters).await?;
    success(resources)
}

/// GET /resources/{id} - A single resource.
pub async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ResourceItem> {
    let resource = state.portal.resource_by_id(&id).await?;
    success(resource)
}

/// Request body for the bookmark toggle. An absent body (or value) negates
/// the current membership.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBookmarkRequest {
    #[serde(default)]
    pub value: Option<bool>,
}

/// Resulting bookmark membership.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkStatus {
    pub resource_id: String,
    pub bookmarked: bool,
}

/// POST /resources/{id}/bookmark - Toggle or set bookmark membership.
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<ToggleBookmarkRequest>>,
) -> ApiResult<BookmarkStatus> {
    let explicit = body.and_then(|Json(request)| request.value);
    let bookmarked = state.portal.toggle_bookmark(&id, explicit).await?;

    success(BookmarkStatus {
        resource_id: id,
        bookmarked,
    })
}
