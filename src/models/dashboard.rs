//! Dashboard extras: quick access cards, announcements, activity feed.

use serde::{Deserialize, Serialize};

use super::ProgramArea;

/// Call-to-action variant on a quick access card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuickAccessCta {
    Download,
    Watch,
}

/// Dashboard quick access card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAccessItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub cta: QuickAccessCta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// Announcement category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementType {
    Update,
    Webinar,
    Regulatory,
}

/// A portal announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub announcement_type: Option<AnnouncementType>,
}

/// Activity feed entry for recently accessed resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: String,
    pub resource_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<ProgramArea>,
    pub accessed_at: String,
}
