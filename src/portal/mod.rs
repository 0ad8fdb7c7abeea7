//! Data access facade.
//!
//! Single entry point for all member-facing data operations. Centralizes the
//! "is Airtable configured" guard and the login rate limit, then delegates to
//! the backend seam. Remote reads fail closed when the credential is absent
//! rather than falling back to fabricated content.

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::PortalBackend;
use crate::errors::PortalError;
use crate::models::{
    Announcement, AuthSession, ClinicalProgram, ProgramSlug, QuickAccessItem, RecentActivity,
    ResourceFilters, ResourceItem,
};
use crate::store::SessionStore;

/// Consecutive failed logins after which further attempts are rejected
/// without contacting the backend. The counter never decays with time.
pub const MAX_LOGIN_ATTEMPTS: u32 = 5;

/// The portal facade consumed by every route handler.
#[derive(Clone)]
pub struct Portal {
    backend: Option<Arc<dyn PortalBackend>>,
    sessions: SessionStore,
}

impl Portal {
    /// Build a facade. `backend` is None when the Airtable credential is
    /// absent, which puts every remote operation into fail-closed mode.
    pub fn new(backend: Option<Arc<dyn PortalBackend>>, sessions: SessionStore) -> Self {
        Self { backend, sessions }
    }

    /// Configuration guard, evaluated at the start of every remote-backed
    /// operation.
    fn backend(&self) -> Result<&Arc<dyn PortalBackend>, PortalError> {
        self.backend.as_ref().ok_or_else(PortalError::unconfigured)
    }

    /// Authenticate a member and persist the resulting session.
    ///
    /// The attempt counter is checked before anything else: once it reaches
    /// the limit, the backend is never contacted again until a successful
    /// login or explicit reset. A backend failure increments the counter and
    /// rethrows the original error unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, PortalError> {
        let attempts = self.sessions.attempt_count().await;
        if attempts >= MAX_LOGIN_ATTEMPTS {
            return Err(PortalError::RateLimited(
                "Too many attempts. Please try again later.".to_string(),
            ));
        }

        let backend = self.backend()?;

        match backend.authenticate_member(email, password).await {
            Ok(member) => {
                let token = Uuid::new_v4().to_string();
                self.sessions.save_session(&token, &member).await?;
                self.sessions.reset_attempt_count().await?;
                tracing::info!(member_id = %member.id, "Member logged in");
                Ok(AuthSession { token, member })
            }
            Err(err) => {
                if let Err(store_err) = self.sessions.set_attempt_count(attempts + 1).await {
                    tracing::warn!("Failed to persist login-attempt counter: {}", store_err);
                }
                Err(err)
            }
        }
    }

    /// Clear the persisted session unconditionally. Never fails; storage
    /// errors are logged and swallowed.
    pub async fn logout(&self) {
        if let Err(err) = self.sessions.clear_session().await {
            tracing::warn!("Failed to clear session on logout: {}", err);
        }
    }

    /// Read-through to the stored session; no network round trip.
    pub async fn stored_session(&self) -> Option<AuthSession> {
        self.sessions.load_session().await
    }

    pub async fn programs(&self) -> Result<Vec<ClinicalProgram>, PortalError> {
        self.backend()?.clinical_programs().await
    }

    pub async fn program_resources(
        &self,
        slug: ProgramSlug,
    ) -> Result<Vec<ResourceItem>, PortalError> {
        self.backend()?.program_documentation_forms(slug).await
    }

    pub async fn resources(
        &self,
        filters: &ResourceFilters,
    ) -> Result<Vec<ResourceItem>, PortalError> {
        self.backend()?.resources(filters).await
    }

    pub async fn resource_by_id(&self, id: &str) -> Result<ResourceItem, PortalError> {
        self.backend()?.resource_by_id(id).await
    }

    /// The full resource list annotated against the local bookmark set and
    /// narrowed to bookmarked entries, preserving source order.
    pub async fn bookmarked_resources(&self) -> Result<Vec<ResourceItem>, PortalError> {
        let backend = self.backend()?;
        let bookmarks = self.sessions.bookmarks().await;
        let list = backend.resources(&ResourceFilters::default()).await?;

        Ok(list
            .into_iter()
            .map(|mut r| {
                r.bookmarked = bookmarks.contains(&r.id) || r.bookmarked;
                r
            })
            .filter(|r| r.bookmarked)
            .collect())
    }

    /// Toggle (or explicitly set) local bookmark membership for a resource.
    /// Returns the resulting membership. Purely local; read-modify-write
    /// with last-writer-wins under concurrency.
    pub async fn toggle_bookmark(
        &self,
        resource_id: &str,
        explicit: Option<bool>,
    ) -> Result<bool, PortalError> {
        let mut bookmarks = self.sessions.bookmarks().await;
        let present = bookmarks.iter().any(|id| id == resource_id);
        let should = explicit.unwrap_or(!present);

        if should && !present {
            bookmarks.push(resource_id.to_string());
        } else if !should {
            bookmarks.retain(|id| id != resource_id);
        }

        self.sessions.set_bookmarks(&bookmarks).await?;
        Ok(should)
    }

    /// Placeholder: no server source is wired yet. Must never fabricate data.
    pub async fn quick_access(&self) -> Vec<QuickAccessItem> {
        Vec::new()
    }

    /// Placeholder: no server source is wired yet. Must never fabricate data.
    pub async fn recent_activity(&self) -> Vec<RecentActivity> {
        Vec::new()
    }

    /// Placeholder: no server source is wired yet. Must never fabricate data.
    pub async fn announcements(&self) -> Vec<Announcement> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::models::{MemberAccount, ProgramArea, ResourceType, SubscriptionStatus};
    use crate::store::MemoryStore;

    /// Backend stub: rejects or accepts every login, serves a fixed resource
    /// list, and counts authentication calls.
    struct StubBackend {
        accept_login: bool,
        resources: Vec<ResourceItem>,
        auth_calls: AtomicUsize,
    }

    impl StubBackend {
        fn new(accept_login: bool) -> Self {
            Self {
                accept_login,
                resources: Vec::new(),
                auth_calls: AtomicUsize::new(0),
            }
        }

        fn with_resources(resources: Vec<ResourceItem>) -> Self {
            Self {
                accept_login: true,
                resources,
                auth_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PortalBackend for StubBackend {
        async fn authenticate_member(
            &self,
            email: &str,
            _password: &str,
        ) -> Result<MemberAccount, PortalError> {
            self.auth_calls.fetch_add(1, Ordering::SeqCst);
            if self.accept_login {
                Ok(MemberAccount {
                    id: "rec1".to_string(),
                    pharmacy_name: "Corner Drug Co".to_string(),
                    email: email.to_string(),
                    subscription_status: SubscriptionStatus::Active,
                    last_login: "2025-01-15T10:30:00+00:00".to_string(),
                })
            } else {
                Err(PortalError::InvalidCredentials(
                    "Invalid email or password".to_string(),
                ))
            }
        }

        async fn clinical_programs(&self) -> Result<Vec<ClinicalProgram>, PortalError> {
            Ok(Vec::new())
        }

        async fn program_documentation_forms(
            &self,
            _slug: ProgramSlug,
        ) -> Result<Vec<ResourceItem>, PortalError> {
            Ok(Vec::new())
        }

        async fn resources(
            &self,
            filters: &ResourceFilters,
        ) -> Result<Vec<ResourceItem>, PortalError> {
            Ok(crate::backend::apply_filters(
                self.resources.clone(),
                filters,
            ))
        }

        async fn resource_by_id(&self, id: &str) -> Result<ResourceItem, PortalError> {
            self.resources
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| PortalError::NotFound(format!("Resource {} not found", id)))
        }
    }

    fn resource(id: &str, name: &str) -> ResourceItem {
        ResourceItem {
            id: id.to_string(),
            name: name.to_string(),
            program: Some(ProgramArea::General),
            resource_type: ResourceType::ClinicalResources,
            category: None,
            tags: None,
            file_url: None,
            size_mb: None,
            last_updated: None,
            download_count: None,
            bookmarked: false,
        }
    }

    fn portal_with(backend: Arc<StubBackend>) -> Portal {
        Portal::new(
            Some(backend),
            SessionStore::new(Arc::new(MemoryStore::new())),
        )
    }

    fn unconfigured_portal() -> Portal {
        Portal::new(None, SessionStore::new(Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn test_sixth_attempt_rate_limited_without_backend_contact() {
        let backend = Arc::new(StubBackend::new(false));
        let portal = portal_with(backend.clone());

        for _ in 0..5 {
            let err = portal.login("a@b.com", "x").await.unwrap_err();
            assert!(matches!(err, PortalError::InvalidCredentials(_)));
        }
        assert_eq!(backend.auth_calls.load(Ordering::SeqCst), 5);

        let err = portal.login("a@b.com", "anything").await.unwrap_err();
        assert!(matches!(err, PortalError::RateLimited(_)));
        assert_eq!(err.status_code().as_u16(), 429);
        // Backend never invoked for the rejected attempt
        assert_eq!(backend.auth_calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_successful_login_resets_attempt_counter() {
        let rejecting = Arc::new(StubBackend::new(false));
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        let portal = Portal::new(Some(rejecting), sessions.clone());

        for _ in 0..4 {
            let _ = portal.login("a@b.com", "wrong").await;
        }
        assert_eq!(sessions.attempt_count().await, 4);

        let accepting = Arc::new(StubBackend::new(true));
        let portal = Portal::new(Some(accepting), sessions.clone());
        let session = portal.login("a@b.com", "right").await.unwrap();
        assert!(!session.token.is_empty());
        assert_eq!(sessions.attempt_count().await, 0);
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let portal = portal_with(Arc::new(StubBackend::new(true)));
        let session = portal.login("a@b.com", "pw").await.unwrap();

        let stored = portal.stored_session().await.unwrap();
        assert_eq!(stored.token, session.token);
        assert_eq!(stored.member.id, session.member.id);
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_never_fails() {
        let portal = portal_with(Arc::new(StubBackend::new(true)));
        portal.login("a@b.com", "pw").await.unwrap();
        portal.logout().await;
        assert!(portal.stored_session().await.is_none());

        // Logging out with nothing stored is still fine
        portal.logout().await;
    }

    #[tokio::test]
    async fn test_unconfigured_operations_fail_closed() {
        let portal = unconfigured_portal();

        let err = portal.programs().await.unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
        assert_eq!(err.status_code().as_u16(), 500);

        assert!(matches!(
            portal.resources(&ResourceFilters::default()).await,
            Err(PortalError::Config(_))
        ));
        assert!(matches!(
            portal.program_resources(ProgramSlug::Tmm).await,
            Err(PortalError::Config(_))
        ));
        assert!(matches!(
            portal.resource_by_id("r1").await,
            Err(PortalError::Config(_))
        ));
        assert!(matches!(
            portal.bookmarked_resources().await,
            Err(PortalError::Config(_))
        ));
        assert!(matches!(
            portal.login("a@b.com", "pw").await,
            Err(PortalError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_local_operations_still_work() {
        let portal = unconfigured_portal();

        assert!(portal.stored_session().await.is_none());
        portal.logout().await;
        assert!(portal.quick_access().await.is_empty());
        assert!(portal.recent_activity().await.is_empty());
        assert!(portal.announcements().await.is_empty());
        // Bookmark toggles are purely local
        assert!(portal.toggle_bookmark("r1", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_double_toggle_restores_original_membership() {
        let portal = portal_with(Arc::new(StubBackend::new(true)));

        assert!(portal.toggle_bookmark("r1", None).await.unwrap());
        assert!(!portal.toggle_bookmark("r1", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_explicit_toggle_is_idempotent() {
        let portal = portal_with(Arc::new(StubBackend::new(true)));

        for _ in 0..3 {
            assert!(portal.toggle_bookmark("r1", Some(true)).await.unwrap());
        }
        for _ in 0..3 {
            assert!(!portal.toggle_bookmark("r1", Some(false)).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_bookmarked_resources_is_source_ordered_subset() {
        let backend = Arc::new(StubBackend::with_resources(vec![
            resource("r1", "Alpha"),
            resource("r2", "Beta"),
            resource("r3", "Gamma"),
            resource("r4", "Delta"),
        ]));
        let portal = portal_with(backend);

        // Bookmark out of source order
        portal.toggle_bookmark("r3", Some(true)).await.unwrap();
        portal.toggle_bookmark("r1", Some(true)).await.unwrap();

        let bookmarked = portal.bookmarked_resources().await.unwrap();
        let ids: Vec<_> = bookmarked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
        assert!(bookmarked.iter().all(|r| r.bookmarked));
    }
}
