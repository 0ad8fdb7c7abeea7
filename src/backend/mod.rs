//! Remote tabular-data backend seam.
//!
//! The portal treats its content service as an external collaborator behind
//! the `PortalBackend` trait: member authentication plus read-only program
//! and resource queries. The live implementation talks to Airtable; tests
//! inject a mock.

mod airtable;

pub use airtable::*;

use async_trait::async_trait;
use std::cmp::Ordering;

use crate::errors::PortalError;
use crate::models::{
    ClinicalProgram, MemberAccount, ProgramSlug, ResourceFilters, ResourceItem, ResourceSortKey,
    SortOrder,
};

/// Operations the portal consumes from the tabular-data service of record.
#[async_trait]
pub trait PortalBackend: Send + Sync {
    /// Authenticate a member by email and password. Fails with
    /// `INVALID_CREDENTIALS` when the pair does not match a member record.
    async fn authenticate_member(
        &self,
        email: &str,
        password: &str,
    ) -> Result<MemberAccount, PortalError>;

    /// All clinical programs.
    async fn clinical_programs(&self) -> Result<Vec<ClinicalProgram>, PortalError>;

    /// Documentation forms belonging to one program.
    async fn program_documentation_forms(
        &self,
        slug: ProgramSlug,
    ) -> Result<Vec<ResourceItem>, PortalError>;

    /// Library resources matching the given filters.
    async fn resources(&self, filters: &ResourceFilters)
        -> Result<Vec<ResourceItem>, PortalError>;

    /// A single resource by id. Fails with `NOT_FOUND` when absent.
    async fn resource_by_id(&self, id: &str) -> Result<ResourceItem, PortalError>;
}

/// Apply library filters, sorting, and pagination to a resource list.
///
/// Shared by backend implementations so query semantics cannot drift between
/// the live adapter and the test mock.
pub fn apply_filters(items: Vec<ResourceItem>, filters: &ResourceFilters) -> Vec<ResourceItem> {
    let needle = filters.search.as_ref().map(|s| s.to_lowercase());

    let mut out: Vec<ResourceItem> = items
        .into_iter()
        .filter(|r| filters.program.is_none_or(|p| r.program == Some(p)))
        .filter(|r| filters.resource_type.is_none_or(|t| r.resource_type == t))
        .filter(|r| {
            filters.category.as_ref().is_none_or(|c| {
                r.category
                    .as_ref()
                    .is_some_and(|rc| rc.eq_ignore_ascii_case(c))
            })
        })
        .filter(|r| {
            filters.tags.as_ref().is_none_or(|wanted| {
                r.tags.as_ref().is_some_and(|have| {
                    wanted
                        .iter()
                        .any(|w| have.iter().any(|h| h.eq_ignore_ascii_case(w)))
                })
            })
        })
        .filter(|r| {
            needle.as_ref().is_none_or(|q| {
                r.name.to_lowercase().contains(q)
                    || r.category
                        .as_ref()
                        .is_some_and(|c| c.to_lowercase().contains(q))
                    || r.tags
                        .as_ref()
                        .is_some_and(|tags| tags.iter().any(|t| t.to_lowercase().contains(q)))
            })
        })
        .filter(|r| filters.bookmarked.is_none_or(|b| r.bookmarked == b))
        .collect();

    if let Some(key) = filters.sort_by {
        out.sort_by(|a, b| compare_resources(a, b, key));
        if filters.sort_order == Some(SortOrder::Desc) {
            out.reverse();
        }
    }

    let offset = filters.offset.unwrap_or(0);
    let out: Vec<ResourceItem> = out.into_iter().skip(offset).collect();
    match filters.limit {
        Some(limit) => out.into_iter().take(limit).collect(),
        None => out,
    }
}

fn compare_resources(a: &ResourceItem, b: &ResourceItem, key: ResourceSortKey) -> Ordering {
    match key {
        ResourceSortKey::Name => a.name.cmp(&b.name),
        // RFC 3339 strings order correctly lexicographically
        ResourceSortKey::LastUpdated => a.last_updated.cmp(&b.last_updated),
        ResourceSortKey::DownloadCount => a.download_count.cmp(&b.download_count),
        ResourceSortKey::Category => a.category.cmp(&b.category),
    }
}
