//! # Session service
//!
//! [`SessionService`] owns the answer to "who is logged in". It is built explicitly
//! from a [`TokenStore`] (shared with the [`ApiClient`], which reads the same token
//! for every protected request) and has a defined lifecycle:
//!
//! 1. [`init`](SessionService::init) re-derives the member from a persisted token,
//!    dropping it if it is expired or unreadable.
//! 2. [`login`](SessionService::login) or [`complete_signup`](SessionService::complete_signup)
//!    persist a fresh token and decode it.
//! 3. [`logout`](SessionService::logout) removes the token.
//! 4. [`teardown`](SessionService::teardown) forgets the in-memory member but leaves the
//!    persisted token for the next `init`.
//!
//! Observers call [`subscribe`](SessionService::subscribe) and get a
//! `tokio::sync::watch` receiver that changes whenever the member does.
//!
//! The member is `Some` exactly when a decodable, unexpired token is stored. Every
//! path that would break that (decode failure, expiry) also clears the token.

use std::sync::Arc;

use store::{StoreError, TokenStore};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::LoginRequest;
use crate::token::{decode_claims, now_secs, TokenClaims, TokenError};

/// The logged-in member as described by the token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMember {
    /// The member's email (`sub` claim).
    pub username: String,
    pub roles: Vec<String>,
    /// Unix seconds, when the token carries an expiry.
    pub expires_at: Option<i64>,
}

impl From<TokenClaims> for SessionMember {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.sub,
            roles: claims.scopes,
            expires_at: claims.exp,
        }
    }
}

impl SessionMember {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The server refused the credentials, or could not be reached.
    #[error(transparent)]
    Auth(#[from] ApiError),
    #[error("no access token stored")]
    MissingToken,
    #[error("invalid access token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("access token expired")]
    Expired,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

struct Inner {
    store: Arc<dyn TokenStore>,
    token_key: String,
    member: watch::Sender<Option<SessionMember>>,
}

/// Owns the current session. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionService {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("token_key", &self.inner.token_key)
            .field("member", &*self.inner.member.borrow())
            .finish()
    }
}

impl PartialEq for SessionService {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SessionService {
    pub fn new(store: Arc<dyn TokenStore>, token_key: &str) -> Self {
        let (member, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                store,
                token_key: token_key.to_string(),
                member,
            }),
        }
    }

    /// Session sharing the client's token store and key.
    pub fn for_client(api: &ApiClient) -> Self {
        Self::new(api.token_store(), &api.config().token_key)
    }

    /// Restore the session from the persisted token, if any.
    pub fn init(&self) -> Option<SessionMember> {
        match self.set_member_from_token() {
            Ok(member) => {
                info!("Restored session for {}", member.username);
                Some(member)
            }
            Err(SessionError::MissingToken) => None,
            Err(e) => {
                warn!("Discarding stored session: {}", e);
                None
            }
        }
    }

    /// The current member. An expired session is ended first.
    pub fn member(&self) -> Option<SessionMember> {
        self.expire_if_due();
        self.inner.member.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.member().is_some()
    }

    /// End the session if its token has passed its expiry. Returns whether it did.
    pub fn expire_if_due(&self) -> bool {
        let expired = self
            .inner
            .member
            .borrow()
            .as_ref()
            .and_then(|m| m.expires_at)
            .is_some_and(|exp| exp <= now_secs());
        if !expired {
            return false;
        }
        info!("Session expired");
        if let Err(e) = self.clear() {
            warn!("Failed to remove expired token: {}", e);
        }
        true
    }

    /// End the session when the server has rejected its token.
    /// Returns whether `err` was such a rejection.
    pub fn end_if_unauthorized(&self, err: &ApiError) -> bool {
        if !err.is_unauthorized() {
            return false;
        }
        warn!("Server rejected the session token: {}", err);
        if let Err(e) = self.clear() {
            warn!("Failed to remove rejected token: {}", e);
        }
        true
    }

    /// The persisted bearer token.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.inner.store.get(&self.inner.token_key)?)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionMember>> {
        self.inner.member.subscribe()
    }

    fn publish(&self, member: Option<SessionMember>) {
        self.inner.member.send_if_modified(|current| {
            if *current == member {
                false
            } else {
                *current = member;
                true
            }
        });
    }

    fn clear(&self) -> Result<(), SessionError> {
        let removed = self.inner.store.remove(&self.inner.token_key);
        self.publish(None);
        Ok(removed?)
    }

    /// Log in and start a session. On failure the session is left untouched.
    pub async fn login(
        &self,
        api: &ApiClient,
        credentials: &LoginRequest,
    ) -> Result<SessionMember, SessionError> {
        let auth = api.login(credentials).await?;
        self.inner.store.set(&self.inner.token_key, &auth.token)?;
        let member = self.set_member_from_token()?;
        info!("Logged in as {}", member.username);
        Ok(member)
    }

    /// Start a session from the token returned when a member signs up.
    pub fn complete_signup(&self, token: &str) -> Result<SessionMember, SessionError> {
        let token = crate::token::strip_bearer(token);
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }
        self.inner.store.set(&self.inner.token_key, token)?;
        self.set_member_from_token()
    }

    /// Re-derive the member from whatever token is currently persisted.
    pub fn set_member_from_token(&self) -> Result<SessionMember, SessionError> {
        let Some(token) = self.token()?.filter(|t| !t.is_empty()) else {
            self.publish(None);
            return Err(SessionError::MissingToken);
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(e) => {
                self.clear()?;
                return Err(e.into());
            }
        };
        if claims.is_expired_at(now_secs()) {
            debug!("Stored token for {} has expired", claims.sub);
            self.clear()?;
            return Err(SessionError::Expired);
        }

        let member = SessionMember::from(claims);
        self.publish(Some(member.clone()));
        Ok(member)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        if let Some(member) = self.member() {
            info!("Logging out {}", member.username);
        }
        self.clear()
    }

    /// Forget the in-memory member without touching the persisted token.
    pub fn teardown(&self) {
        self.publish(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::models::{Gender, MemberRegistrationRequest};
    use crate::testing::FakeServer;
    use crate::token::test_token;
    use store::{MemoryStore, ACCESS_TOKEN_KEY};

    async fn setup() -> (FakeServer, ApiClient, MemoryStore, SessionService) {
        let server = FakeServer::start().await;
        let store = MemoryStore::new();
        let api = ApiClient::new(
            ClientConfig::default().with_base_url(&server.base_url),
            Arc::new(store.clone()),
        );
        api.create_member(&MemberRegistrationRequest {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            age: 30,
            password: "password".to_string(),
            gender: Gender::Female,
        })
        .await
        .unwrap();
        let session = SessionService::for_client(&api);
        (server, api, store, session)
    }

    fn credentials(password: &str) -> LoginRequest {
        LoginRequest {
            username: "jane@x.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_token_and_member() {
        let (_server, api, store, session) = setup().await;
        assert!(session.init().is_none());

        let member = session.login(&api, &credentials("password")).await.unwrap();
        assert_eq!(member.username, "jane@x.com");
        assert!(member.has_role("ROLE_USER"));
        assert_eq!(session.member(), Some(member));
        assert!(store.get(ACCESS_TOKEN_KEY).unwrap().is_some());

        // Protected calls now succeed with the persisted token
        assert_eq!(api.list_members().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password_leaves_session_empty() {
        let (_server, api, store, session) = setup().await;

        let err = session.login(&api, &credentials("nope")).await.unwrap_err();
        match &err {
            SessionError::Auth(api_err) => {
                assert!(api_err.is_unauthorized());
                assert_eq!(api_err.message(), "invalid credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "invalid credentials");
        assert!(session.member().is_none());
        assert!(store.get(ACCESS_TOKEN_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let (_server, api, store, session) = setup().await;
        session.login(&api, &credentials("password")).await.unwrap();

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(store.get(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert!(api.list_members().await.unwrap_err().is_unauthorized());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let (_server, api, _store, session) = setup().await;
        let mut rx = session.subscribe();

        session.login(&api, &credentials("password")).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().username, "jane@x.com");

        session.logout().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_complete_signup() {
        let store = MemoryStore::new();
        let session = SessionService::new(Arc::new(store.clone()), ACCESS_TOKEN_KEY);
        let token = test_token("new@x.com", &["ROLE_USER"], Some(now_secs() + 60));

        let member = session.complete_signup(&token).unwrap();
        assert_eq!(member.username, "new@x.com");
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), Some(token));

        assert_eq!(session.complete_signup(""), Err(SessionError::MissingToken));
    }

    #[test]
    fn test_init_restores_valid_token() {
        let token = test_token("jane@x.com", &[], Some(now_secs() + 60));
        let session = SessionService::new(Arc::new(MemoryStore::with_token(&token)), ACCESS_TOKEN_KEY);
        assert_eq!(session.init().unwrap().username, "jane@x.com");
    }

    #[test]
    fn test_init_discards_expired_token() {
        let store = MemoryStore::with_token(&test_token("jane@x.com", &[], Some(1)));
        let session = SessionService::new(Arc::new(store.clone()), ACCESS_TOKEN_KEY);

        assert!(session.init().is_none());
        assert!(store.get(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert_eq!(session.set_member_from_token(), Err(SessionError::MissingToken));
    }

    #[test]
    fn test_init_discards_garbage_token() {
        let store = MemoryStore::with_token("garbage");
        let session = SessionService::new(Arc::new(store.clone()), ACCESS_TOKEN_KEY);

        assert!(session.init().is_none());
        assert!(store.get(ACCESS_TOKEN_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_expiring_mid_session_ends_it() {
        let token = test_token("jane@x.com", &[], Some(now_secs() + 1));
        let store = MemoryStore::with_token(&token);
        let session = SessionService::new(Arc::new(store.clone()), ACCESS_TOKEN_KEY);
        assert!(session.init().is_some());
        let mut rx = session.subscribe();

        tokio::time::sleep(std::time::Duration::from_secs(2)).await;

        assert!(!session.is_authenticated());
        assert!(session.member().is_none());
        assert!(store.get(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert!(rx.borrow_and_update().is_none());
        assert!(!session.expire_if_due());
    }

    #[tokio::test]
    async fn test_rejected_token_ends_session() {
        let (_server, api, store, session) = setup().await;
        session.login(&api, &credentials("password")).await.unwrap();

        let not_found = ApiError::NotFound {
            message: "member with id [9] not found".to_string(),
        };
        assert!(!session.end_if_unauthorized(&not_found));
        assert!(session.is_authenticated());

        store.set(ACCESS_TOKEN_KEY, "garbage").unwrap();
        let err = api.list_members().await.unwrap_err();
        assert!(session.end_if_unauthorized(&err));
        assert!(!session.is_authenticated());
        assert!(store.get(ACCESS_TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_teardown_keeps_persisted_token() {
        let token = test_token("jane@x.com", &[], None);
        let store = MemoryStore::with_token(&token);
        let session = SessionService::new(Arc::new(store.clone()), ACCESS_TOKEN_KEY);
        session.init().unwrap();

        session.teardown();
        assert!(session.member().is_none());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), Some(token));

        // A fresh service picks the session back up
        let again = SessionService::new(Arc::new(store), ACCESS_TOKEN_KEY);
        assert!(again.init().is_some());
    }
}
