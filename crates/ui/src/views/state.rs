use dioxus::prelude::*;
use services::{ApiError, AuthError, CallerError, WorkflowError};
use thiserror::Error;

/// UI-facing failure categories.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ViewError {
    #[error("session expired")]
    SessionExpired,
    #[error("server unreachable")]
    Offline,
    #[error("server error")]
    Server,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Rejected(String),
    #[error("unknown")]
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized
            | ApiError::Caller(CallerError::MissingToken | CallerError::StaleSession) => {
                Self::SessionExpired
            }
            ApiError::NotFound => Self::NotFound,
            ApiError::Rejected { message, .. } => Self::Rejected(message.clone()),
            ApiError::Server { .. } | ApiError::Decode(_) => Self::Server,
            ApiError::NetworkUnreachable(_) => Self::Offline,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn from_auth(err: &AuthError) -> Self {
        match err {
            AuthError::Api(api) => Self::from_api(api),
            other => Self::Rejected(capitalize(&other.to_string())),
        }
    }

    #[must_use]
    pub fn from_workflow(err: &WorkflowError) -> Self {
        match err {
            WorkflowError::Failed { source, .. } => Self::from_api(source),
            other => Self::Rejected(capitalize(&other.to_string())),
        }
    }

    /// Whether the UI should fall back to the login screen.
    #[must_use]
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::SessionExpired => "Your session has expired. Please log in again.".into(),
            Self::Offline => "Cannot reach the tutor server. Check your connection.".into(),
            Self::Server => "The server had a problem. Please try again.".into(),
            Self::NotFound => "That item no longer exists.".into(),
            Self::Rejected(message) => message.clone(),
            Self::Unknown => "Something went wrong. Please try again.".into(),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::QuestionId;

    #[test]
    fn token_problems_end_the_session() {
        for err in [
            ApiError::Unauthorized,
            ApiError::Caller(CallerError::MissingToken),
            ApiError::Caller(CallerError::StaleSession),
        ] {
            assert!(ViewError::from_api(&err).ends_session(), "{err:?}");
        }
        assert!(!ViewError::from_api(&ApiError::Server { status: 502 }).ends_session());
    }

    #[test]
    fn auth_errors_keep_their_wording() {
        let err = ViewError::from_auth(&AuthError::InvalidCredentials);
        assert_eq!(err.message(), "Invalid email or password");

        let offline = ViewError::from_auth(&AuthError::Api(ApiError::NetworkUnreachable(
            "refused".into(),
        )));
        assert_eq!(offline, ViewError::Offline);
    }

    #[test]
    fn failed_mark_maps_through_its_source() {
        let err = WorkflowError::Failed {
            question_id: QuestionId::new(7),
            source: ApiError::Unauthorized,
        };
        assert_eq!(ViewError::from_workflow(&err), ViewError::SessionExpired);

        let dup = ViewError::from_workflow(&WorkflowError::DuplicatePending(QuestionId::new(7)));
        assert_eq!(dup.message(), "Question 7 is already being saved");
    }
}
