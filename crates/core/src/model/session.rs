use chrono::{DateTime, Utc};
use std::fmt;

use crate::model::ids::SessionId;

/// Bearer token issued by the server on login.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Unauthenticated,
    User,
    Admin,
}

impl Role {
    /// Maps the optional role claim of a login response.
    #[must_use]
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim.map(str::trim) {
            Some(role) if role.eq_ignore_ascii_case("admin") => Self::Admin,
            _ => Self::User,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unauthenticated => "Guest",
            Self::User => "User",
            Self::Admin => "Admin",
        }
    }
}

/// The client's single authentication state.
///
/// Token and role are only ever set together; a session either has both
/// (authenticated) or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    token: Option<AuthToken>,
    role: Role,
    established_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A fresh, logged-out session.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self {
            id: SessionId::generate(),
            token: None,
            role: Role::Unauthenticated,
            established_at: None,
        }
    }

    /// A fresh authenticated session. `Role::Unauthenticated` is lifted to `User`.
    #[must_use]
    pub fn authenticated(token: AuthToken, role: Role, established_at: DateTime<Utc>) -> Self {
        let role = match role {
            Role::Unauthenticated => Role::User,
            other => other,
        };
        Self {
            id: SessionId::generate(),
            token: Some(token),
            role,
            established_at: Some(established_at),
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn established_at(&self) -> Option<DateTime<Utc>> {
        self.established_at
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn unauthenticated_session_has_no_token_or_role() {
        let session = Session::unauthenticated();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), Role::Unauthenticated);
        assert!(session.established_at().is_none());
    }

    #[test]
    fn authenticated_session_never_reports_guest_role() {
        let session =
            Session::authenticated(AuthToken::new("t"), Role::Unauthenticated, fixed_now());
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Role::User);
    }

    #[test]
    fn role_claim_mapping() {
        assert_eq!(Role::from_claim(Some("Admin")), Role::Admin);
        assert_eq!(Role::from_claim(Some("user")), Role::User);
        assert_eq!(Role::from_claim(None), Role::User);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
    }
}
