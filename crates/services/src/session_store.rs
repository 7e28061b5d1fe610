use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gateway::{ApiError, SignupRequest};
use tracing::{info, warn};
use tutor_core::model::{Session, SessionId};

use crate::Clock;
use crate::api_gateway::ApiGateway;
use crate::error::AuthError;

/// Owns the client's single `Session`.
///
/// The session is always replaced as a whole, and every replacement mints a
/// new `SessionId`. State tagged with an older id (completed sets, pending
/// marks, in-flight responses) is treated as belonging to a session that no
/// longer exists.
pub struct SessionStore {
    clock: Clock,
    gateway: Arc<ApiGateway>,
    current: Mutex<Session>,
}

impl SessionStore {
    #[must_use]
    pub fn new(clock: Clock, gateway: Arc<ApiGateway>) -> Self {
        Self {
            clock,
            gateway,
            current: Mutex::new(Session::unauthenticated()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.lock().clone()
    }

    #[must_use]
    pub fn current_id(&self) -> SessionId {
        self.lock().id()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    /// Authenticate and install a new session.
    ///
    /// On failure the current session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for rejected credentials, or
    /// `AuthError::Api` for transport/server failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let grant = self
            .gateway
            .login(email, password)
            .await
            .map_err(AuthError::from_login)?;

        let session = Session::authenticated(grant.token, grant.role, self.clock.now());
        *self.lock() = session.clone();
        info!(session = %session.id(), role = ?session.role(), "logged in");
        Ok(session)
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateAccount`, `AuthError::BadAdminCode`,
    /// `AuthError::Rejected`, or `AuthError::Api`.
    pub async fn signup(&self, request: &SignupRequest) -> Result<String, AuthError> {
        let message = self
            .gateway
            .signup(request)
            .await
            .map_err(AuthError::from_signup)?;
        info!("account created");
        Ok(message)
    }

    /// Full reset: installs a fresh unauthenticated session.
    pub fn logout(&self) {
        let mut guard = self.lock();
        let previous = guard.id();
        *guard = Session::unauthenticated();
        info!(session = %previous, "logged out");
    }

    /// Drop `session` if it is still the current one. Returns whether it was.
    pub fn expire(&self, session: SessionId) -> bool {
        let mut guard = self.lock();
        if guard.id() != session {
            return false;
        }
        *guard = Session::unauthenticated();
        warn!(session = %session, "session token rejected by server");
        true
    }

    /// Pass `result` through, expiring `session` when the server rejected its token.
    ///
    /// # Errors
    ///
    /// Returns the original error unchanged.
    pub fn observe<T>(&self, session: SessionId, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::Unauthorized) = &result {
            self.expire(session);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway::InMemoryApi;
    use tutor_core::model::Role;
    use tutor_core::time::{fixed_clock, fixed_now};

    fn store(api: &InMemoryApi) -> SessionStore {
        SessionStore::new(
            fixed_clock(),
            Arc::new(ApiGateway::new(Arc::new(api.clone()))),
        )
    }

    #[tokio::test]
    async fn login_installs_token_and_role_together() {
        let api = InMemoryApi::new();
        api.add_account("ann@example.com", "pw", Role::Admin);
        let store = store(&api);
        let before = store.current_id();

        let session = store.login("ann@example.com", "pw").await.unwrap();

        assert_eq!(store.current(), session);
        assert_ne!(session.id(), before);
        assert!(session.token().is_some());
        assert_eq!(session.role(), Role::Admin);
        assert_eq!(session.established_at(), Some(fixed_now()));
    }

    #[tokio::test]
    async fn failed_login_keeps_existing_session() {
        let api = InMemoryApi::new();
        api.add_account("ann@example.com", "pw", Role::User);
        let store = store(&api);
        let session = store.login("ann@example.com", "pw").await.unwrap();

        let err = store.login("ann@example.com", "wrong").await.unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(store.current(), session);
    }

    #[tokio::test]
    async fn logout_mints_a_new_unauthenticated_session() {
        let api = InMemoryApi::new();
        api.add_account("ann@example.com", "pw", Role::User);
        let store = store(&api);
        let session = store.login("ann@example.com", "pw").await.unwrap();

        store.logout();

        assert!(!store.is_authenticated());
        assert_ne!(store.current_id(), session.id());
        assert_eq!(store.current().role(), Role::Unauthenticated);
    }

    #[tokio::test]
    async fn unauthorized_expires_only_the_session_it_belongs_to() {
        let api = InMemoryApi::new();
        api.add_account("ann@example.com", "pw", Role::User);
        let store = store(&api);
        let old = store.login("ann@example.com", "pw").await.unwrap();
        let new = store.login("ann@example.com", "pw").await.unwrap();

        let result: Result<(), ApiError> = store.observe(old.id(), Err(ApiError::Unauthorized));
        assert_eq!(result, Err(ApiError::Unauthorized));
        assert_eq!(store.current(), new);

        let _ = store.observe::<()>(new.id(), Err(ApiError::Unauthorized));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn signup_errors_are_distinct() {
        let api = InMemoryApi::new().with_admin_code("letmein");
        api.add_account("ann@example.com", "pw", Role::User);
        let store = store(&api);

        let dup = SignupRequest::new("ann@example.com", "pw", "ann", "1", None);
        assert_eq!(store.signup(&dup).await, Err(AuthError::DuplicateAccount));

        let bad = SignupRequest::new("bo@example.com", "pw", "bo", "1", Some("guess".into()));
        assert_eq!(store.signup(&bad).await, Err(AuthError::BadAdminCode));

        let ok = SignupRequest::new("bo@example.com", "pw", "bo", "1", None);
        assert_eq!(
            store.signup(&ok).await.as_deref(),
            Ok("User created successfully")
        );
        assert!(!store.is_authenticated());
    }
}
