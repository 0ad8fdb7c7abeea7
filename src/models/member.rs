//! Member account and session models matching the frontend contract.

use serde::{Deserialize, Serialize};

/// Subscription standing of a member pharmacy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Expiring,
    Trial,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Expiring => "Expiring",
            SubscriptionStatus::Trial => "Trial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(SubscriptionStatus::Active),
            "Expiring" => Some(SubscriptionStatus::Expiring),
            "Trial" => Some(SubscriptionStatus::Trial),
            _ => None,
        }
    }
}

/// The authenticated member account (pharmacy/team).
///
/// Created on successful authentication and held as an immutable snapshot
/// until the next login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAccount {
    pub id: String,
    pub pharmacy_name: String,
    pub email: String,
    pub subscription_status: SubscriptionStatus,
    /// RFC 3339 timestamp of the most recent login.
    pub last_login: String,
}

/// Pairing of an opaque session token and the member it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub member: MemberAccount,
}

/// Request body for member login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
