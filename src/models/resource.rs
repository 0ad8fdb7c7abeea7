//! Resource library models matching the frontend contract.

use serde::{Deserialize, Serialize};

use super::ProgramArea;

/// Resource type classification used for filters and badges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResourceType {
    #[serde(rename = "Documentation Forms")]
    DocumentationForms,
    #[serde(rename = "Clinical Resources")]
    ClinicalResources,
    #[serde(rename = "Patient Handouts")]
    PatientHandouts,
    #[serde(rename = "Protocols")]
    Protocols,
    #[serde(rename = "Training Materials")]
    TrainingMaterials,
    #[serde(rename = "Medical Billing")]
    MedicalBilling,
    #[serde(rename = "Additional Resources")]
    AdditionalResources,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::DocumentationForms => "Documentation Forms",
            ResourceType::ClinicalResources => "Clinical Resources",
            ResourceType::PatientHandouts => "Patient Handouts",
            ResourceType::Protocols => "Protocols",
            ResourceType::TrainingMaterials => "Training Materials",
            ResourceType::MedicalBilling => "Medical Billing",
            ResourceType::AdditionalResources => "Additional Resources",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Documentation Forms" => Some(ResourceType::DocumentationForms),
            "Clinical Resources" => Some(ResourceType::ClinicalResources),
            "Patient Handouts" => Some(ResourceType::PatientHandouts),
            "Protocols" => Some(ResourceType::Protocols),
            "Training Materials" => Some(ResourceType::TrainingMaterials),
            "Medical Billing" => Some(ResourceType::MedicalBilling),
            "Additional Resources" => Some(ResourceType::AdditionalResources),
            _ => None,
        }
    }
}

/// A library resource (form, handout, protocol, recording, ...).
///
/// The `bookmarked` flag is derived at read time from the local bookmark set
/// and is never persisted on the record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<ProgramArea>,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_count: Option<i64>,
    #[serde(default)]
    pub bookmarked: bool,
}

/// Sort key for library queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResourceSortKey {
    Name,
    LastUpdated,
    DownloadCount,
    Category,
}

/// Sort direction for library queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Resource filters for library queries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilters {
    #[serde(default)]
    pub program: Option<ProgramArea>,
    #[serde(default, rename = "type")]
    pub resource_type: Option<ResourceType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
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
