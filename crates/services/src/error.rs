//! Shared error types for the services crate.

use thiserror::Error;

use gateway::{ApiError, ConfigError};
use tutor_core::model::QuestionId;

/// Errors emitted by `SessionStore` login and signup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    DuplicateAccount,
    #[error("the admin code is not valid")]
    BadAdminCode,
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    pub(crate) fn from_login(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized | ApiError::Rejected { status: 401 | 403, .. } => {
                Self::InvalidCredentials
            }
            ApiError::Rejected { message, .. } => Self::Rejected(message),
            other => Self::Api(other),
        }
    }

    pub(crate) fn from_signup(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status: 409, .. } => Self::DuplicateAccount,
            ApiError::Rejected { status: 403, .. } => Self::BadAdminCode,
            ApiError::Rejected { message, .. } => {
                let lower = message.to_ascii_lowercase();
                if lower.contains("admin") {
                    Self::BadAdminCode
                } else if lower.contains("exist") {
                    Self::DuplicateAccount
                } else {
                    Self::Rejected(message)
                }
            }
            other => Self::Api(other),
        }
    }
}

/// Errors emitted by `CompletionWorkflow`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkflowError {
    #[error("question {0} is already completed")]
    AlreadyCompleted(QuestionId),
    #[error("question {0} is already being saved")]
    DuplicatePending(QuestionId),
    #[error("failed to mark question {question_id} as completed: {source}")]
    Failed {
        question_id: QuestionId,
        #[source]
        source: ApiError,
    },
}

/// Errors emitted while bootstrapping services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16, message: &str) -> ApiError {
        ApiError::Rejected {
            status,
            message: message.into(),
        }
    }

    #[test]
    fn login_failures_map_to_invalid_credentials() {
        assert_eq!(
            AuthError::from_login(ApiError::Unauthorized),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::from_login(rejected(400, "Missing email")),
            AuthError::Rejected("Missing email".into())
        );
        assert_eq!(
            AuthError::from_login(ApiError::Server { status: 500 }),
            AuthError::Api(ApiError::Server { status: 500 })
        );
    }

    #[test]
    fn signup_failures_are_distinct() {
        assert_eq!(
            AuthError::from_signup(rejected(409, "taken")),
            AuthError::DuplicateAccount
        );
        assert_eq!(
            AuthError::from_signup(rejected(400, "Invalid admin code")),
            AuthError::BadAdminCode
        );
        assert_eq!(
            AuthError::from_signup(rejected(400, "User already exists")),
            AuthError::DuplicateAccount
        );
        assert_eq!(
            AuthError::from_signup(rejected(400, "Phone required")),
            AuthError::Rejected("Phone required".into())
        );
    }
}
