//! Clinical program models used for navigation and page headers.

use serde::{Deserialize, Serialize};

/// Clinical program identifiers (slugs) used across routing and filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgramSlug {
    Tmm,
    Mtmtft,
    Tnt,
    A1c,
    Oc,
}

impl ProgramSlug {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramSlug::Tmm => "tmm",
            ProgramSlug::Mtmtft => "mtmtft",
            ProgramSlug::Tnt => "tnt",
            ProgramSlug::A1c => "a1c",
            ProgramSlug::Oc => "oc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tmm" => Some(ProgramSlug::Tmm),
            "mtmtft" => Some(ProgramSlug::Mtmtft),
            "tnt" => Some(ProgramSlug::Tnt),
            "a1c" => Some(ProgramSlug::A1c),
            "oc" => Some(ProgramSlug::Oc),
            _ => None,
        }
    }
}

/// Program association carried on a resource: a specific program or the
/// shared `general` bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgramArea {
    Tmm,
    Mtmtft,
    Tnt,
    A1c,
    Oc,
    General,
}

impl ProgramArea {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "general" => Some(ProgramArea::General),
            other => ProgramSlug::from_str(other).map(ProgramArea::from),
        }
    }

    /// Whether this area belongs to the given program.
    pub fn matches(&self, slug: ProgramSlug) -> bool {
        *self == ProgramArea::from(slug)
    }
}

impl From<ProgramSlug> for ProgramArea {
    fn from(slug: ProgramSlug) -> Self {
        match slug {
            ProgramSlug::Tmm => ProgramArea::Tmm,
            ProgramSlug::Mtmtft => ProgramArea::Mtmtft,
            ProgramSlug::Tnt => ProgramArea::Tnt,
            ProgramSlug::A1c => ProgramArea::A1c,
            ProgramSlug::Oc => ProgramArea::Oc,
        }
    }
}

/// A clinical program as shown in navigation and program pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalProgram {
    pub slug: ProgramSlug,
    pub name: String,
    pub description: String,
    /// Icon name rendered by the frontend.
    pub icon: String,
    pub resource_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_count: Option<i64>,
}
