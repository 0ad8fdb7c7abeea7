//! Session, login-attempt, and bookmark persistence.
//!
//! Four logical records live under distinct keys in the key-value store. The
//! member record and bookmark set are stored as JSON, the attempt counter as
//! a decimal string. A payload that fails to deserialize is logged and read
//! as absent rather than propagated.

use std::sync::Arc;

use crate::errors::PortalError;
use crate::models::{AuthSession, MemberAccount};

use super::KeyValueStore;

const KEY_TOKEN: &str = "crxq_token";
const KEY_MEMBER: &str = "crxq_member";
const KEY_LOGIN_ATTEMPTS: &str = "crxq_login_attempts";
const KEY_BOOKMARKS: &str = "crxq_bookmarks";

/// Durable session state over an injected key-value store.
///
/// There is no cross-operation locking: concurrent read-modify-write of the
/// bookmark set resolves last-writer-wins.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a session as two writes (token, then member record).
    ///
    /// There is no rollback if the second write fails; `load_session` treats
    /// a half-written session as no session.
    pub async fn save_session(
        &self,
        token: &str,
        member: &MemberAccount,
    ) -> Result<(), PortalError> {
        let member_json = serde_json::to_string(member)
            .map_err(|e| PortalError::Storage(format!("Failed to serialize member: {}", e)))?;
        self.store.set(KEY_TOKEN, token).await?;
        self.store.set(KEY_MEMBER, &member_json).await?;
        Ok(())
    }

    /// Load the stored session, or None if either key is absent or the
    /// member payload is unreadable.
    pub async fn load_session(&self) -> Option<AuthSession> {
        let token = match self.store.get(KEY_TOKEN).await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored token: {}", e);
                return None;
            }
        };

        let member_json = match self.store.get(KEY_MEMBER).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored member: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<MemberAccount>(&member_json) {
            Ok(member) => Some(AuthSession { token, member }),
            Err(e) => {
                tracing::warn!("Stored member record is unreadable, treating as no session: {}", e);
                None
            }
        }
    }

    /// Remove both session keys.
    pub async fn clear_session(&self) -> Result<(), PortalError> {
        self.store.remove(KEY_TOKEN).await?;
        self.store.remove(KEY_MEMBER).await?;
        Ok(())
    }

    /// Current consecutive failed-login count; unreadable values count as 0.
    pub async fn attempt_count(&self) -> u32 {
        match self.store.get(KEY_LOGIN_ATTEMPTS).await {
            Ok(Some(raw)) => raw.parse().unwrap_or(0),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!("Failed to read login-attempt counter: {}", e);
                0
            }
        }
    }

    pub async fn set_attempt_count(&self, count: u32) -> Result<(), PortalError> {
        self.store.set(KEY_LOGIN_ATTEMPTS, &count.to_string()).await
    }

    pub async fn reset_attempt_count(&self) -> Result<(), PortalError> {
        self.store.set(KEY_LOGIN_ATTEMPTS, "0").await
    }

    /// Bookmarked resource ids in insertion order; corrupt payloads read as
    /// empty.
    pub async fn bookmarks(&self) -> Vec<String> {
        match self.store.get(KEY_BOOKMARKS).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!("Stored bookmark set is unreadable, treating as empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read bookmark set: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the full bookmark set.
    pub async fn set_bookmarks(&self, ids: &[String]) -> Result<(), PortalError> {
        let json = serde_json::to_string(ids)
            .map_err(|e| PortalError::Storage(format!("Failed to serialize bookmarks: {}", e)))?;
        self.store.set(KEY_BOOKMARKS, &json).await
    }
}
