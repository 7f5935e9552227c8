//! # Accounts — register, login, logout, restore
//!
//! The user catalog is the seed users followed by the registered-users
//! collection. Every session transition returns a new [`Session`] value and
//! keeps the persisted identity record in step with it:
//!
//! | Method | Persisted record |
//! |--------|------------------|
//! | [`restore`](Portal::restore) | read; erased when malformed or when its user no longer exists |
//! | [`login`](Portal::login) | written on success, untouched on failure |
//! | [`logout`](Portal::logout) | erased |
//! | [`register`](Portal::register) | untouched (registration does not sign in) |
//!
//! Passwords are only checked for presence. They are neither verified nor
//! stored.

use store::{KeyValueStore, StoreError};

use super::Session;
use crate::clock;
use crate::error::PortalError;
use crate::models::{Role, User};
use crate::Portal;

/// Sign-up form input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl<S: KeyValueStore> Portal<S> {
    /// Seed users followed by registered users.
    pub async fn users(&self) -> Result<Vec<User>, PortalError> {
        let mut users = self.seed.users.clone();
        users.extend(self.registered_users().load().await?);
        Ok(users)
    }

    async fn find_user(&self, predicate: impl Fn(&User) -> bool) -> Result<Option<User>, PortalError> {
        Ok(self.users().await?.into_iter().find(|u| predicate(u)))
    }

    /// Rebuild the session persisted by a previous run.
    ///
    /// The stored identity is trusted only if its user id still exists in the
    /// catalog; the catalog's copy of the user becomes the session.
    pub async fn restore(&self) -> Result<Session, PortalError> {
        let record = match self.session_record().read().await {
            Ok(record) => record,
            Err(StoreError::Decode { key, source }) => {
                tracing::warn!("Discarding malformed session record {}: {}", key, source);
                self.session_record().clear().await;
                return Ok(Session::anonymous());
            }
            Err(e) => return Err(e.into()),
        };
        let Some(stored) = record else {
            return Ok(Session::anonymous());
        };

        match self.find_user(|u| u.id == stored.id).await? {
            Some(user) => {
                tracing::debug!("Restored session for {}", user.username);
                Ok(Session::authenticated(user))
            }
            None => {
                tracing::warn!("Discarding stale session for unknown user {}", stored.id);
                self.session_record().clear().await;
                Ok(Session::anonymous())
            }
        }
    }

    /// Sign in by exact email match. The password only has to be non-empty.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, PortalError> {
        if password.is_empty() {
            return Err(PortalError::InvalidCredentials);
        }
        let Some(user) = self.find_user(|u| u.email == email).await? else {
            tracing::debug!("Login failed: no user with that email");
            return Err(PortalError::InvalidCredentials);
        };

        self.session_record().write(&user).await?;
        tracing::info!("User {} logged in as {}", user.username, user.role);
        Ok(Session::authenticated(user))
    }

    /// Sign out and erase the persisted identity.
    pub async fn logout(&self) -> Session {
        self.session_record().clear().await;
        tracing::info!("Logged out");
        Session::anonymous()
    }

    /// Create an account. Does not sign the new user in.
    pub async fn register(&self, registration: Registration) -> Result<User, PortalError> {
        let Registration {
            username,
            email,
            password,
            role,
        } = registration;

        if username.trim().is_empty() {
            return Err(PortalError::MissingField("Username"));
        }
        if email.trim().is_empty() {
            return Err(PortalError::MissingField("Email"));
        }
        if password.is_empty() {
            return Err(PortalError::MissingField("Password"));
        }
        if self.find_user(|u| u.email == email).await?.is_some() {
            return Err(PortalError::DuplicateEmail);
        }

        let user = User {
            id: clock::new_id("user"),
            username,
            email,
            role,
            created_at: clock::now(),
        };
        let user = self.registered_users().append(user).await?;
        tracing::info!("Registered {} ({})", user.username, user.role);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::portal;
    use store::MemoryStore;

    fn registration(email: &str, role: Role) -> Registration {
        Registration {
            username: "alex".to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_then_login_as_citizen() {
        let portal = portal();

        let user = portal.register(registration("a@x.com", Role::Citizen)).await.unwrap();
        assert!(user.id.starts_with("user-"));

        // Registration does not sign in
        assert_eq!(portal.restore().await.unwrap(), Session::anonymous());

        let session = portal.login("a@x.com", "hunter2").await.unwrap();
        assert_eq!(session.user(), Some(&user));

        let caps = session.capabilities();
        assert!(caps.is_citizen);
        assert!(caps.can_post_incident);
        assert!(!caps.can_manage_content);
    }

    #[tokio::test]
    async fn test_duplicate_email_leaves_users_unchanged() {
        let portal = portal();
        portal.register(registration("a@x.com", Role::Citizen)).await.unwrap();
        let before = portal.store().get(&portal.keys().users).await.unwrap();

        let err = portal
            .register(registration("a@x.com", Role::Supe))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::DuplicateEmail));

        // Seed emails count too
        let seed_email = portal.seed().users[0].email.clone();
        let err = portal
            .register(registration(&seed_email, Role::Citizen))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::DuplicateEmail));

        assert_eq!(portal.store().get(&portal.keys().users).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let portal = portal();
        let mut blank = registration("b@x.com", Role::Citizen);
        blank.username = "  ".to_string();
        assert!(matches!(
            portal.register(blank).await,
            Err(PortalError::MissingField("Username"))
        ));

        let mut blank = registration("b@x.com", Role::Citizen);
        blank.email = String::new();
        assert!(matches!(
            portal.register(blank).await,
            Err(PortalError::MissingField("Email"))
        ));

        let mut blank = registration("b@x.com", Role::Citizen);
        blank.password = String::new();
        assert!(matches!(
            portal.register(blank).await,
            Err(PortalError::MissingField("Password"))
        ));
        assert!(portal.store().get(&portal.keys().users).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_role_matches_catalog() {
        let portal = portal();
        for user in portal.seed().users.clone() {
            let session = portal.login(&user.email, "pw").await.unwrap();
            assert_eq!(session.role(), Some(user.role));

            let caps = session.capabilities();
            assert_eq!(caps.is_admin, user.role == Role::Admin);
            assert_eq!(caps.is_supe, user.role == Role::Supe);
            assert_eq!(caps.is_citizen, user.role == Role::Citizen);
            assert_eq!(caps.can_manage_content, user.role == Role::Admin);
            assert!(caps.can_like_content && caps.can_comment && caps.can_post_incident);
        }
    }

    #[tokio::test]
    async fn test_invalid_credentials_keep_previous_session() {
        let portal = portal();
        let email = portal.seed().users[1].email.clone();
        let session = portal.login(&email, "pw").await.unwrap();

        assert!(matches!(
            portal.login("nobody@x.com", "pw").await,
            Err(PortalError::InvalidCredentials)
        ));
        assert!(matches!(
            portal.login(&email, "").await,
            Err(PortalError::InvalidCredentials)
        ));

        // Persisted identity still belongs to the first login
        assert_eq!(portal.restore().await.unwrap(), session);
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let portal = portal();
        let email = portal.seed().users[0].email.to_uppercase();
        assert!(matches!(
            portal.login(&email, "pw").await,
            Err(PortalError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_restore_across_portals_and_logout() {
        let store = MemoryStore::new();
        let first = Portal::with_bundled_seed(store.clone()).unwrap();
        first.register(registration("c@x.com", Role::Supe)).await.unwrap();
        let session = first.login("c@x.com", "pw").await.unwrap();

        let second = Portal::with_bundled_seed(store.clone()).unwrap();
        let restored = second.restore().await.unwrap();
        assert_eq!(restored, session);
        assert!(restored.capabilities().is_supe);

        assert_eq!(second.logout().await, Session::anonymous());
        assert_eq!(first.restore().await.unwrap(), Session::anonymous());
        assert!(store.get(&first.keys().session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restore_discards_stale_identity() {
        let portal = portal();
        portal.register(registration("d@x.com", Role::Citizen)).await.unwrap();
        portal.login("d@x.com", "pw").await.unwrap();

        // Registered users wiped behind the portal's back
        portal.store().remove(&portal.keys().users).await;

        assert_eq!(portal.restore().await.unwrap(), Session::anonymous());
        assert!(portal.store().get(&portal.keys().session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_restore_discards_malformed_identity() {
        let portal = portal();
        portal
            .store()
            .set(&portal.keys().session, "{\"id\":".to_string())
            .await;

        assert_eq!(portal.restore().await.unwrap(), Session::anonymous());
        assert!(portal.store().get(&portal.keys().session).await.unwrap().is_none());
    }
}
