use std::sync::Arc;

use gateway::{ApiError, CallerError, LoginGrant, LoginRequest, RemoteApi, SignupRequest};
use tracing::debug;
use tutor_core::model::{
    Article, ArticleId, AuthToken, ProgressEntry, Question, QuestionId, Session,
};

/// The client's only channel to the tutor API.
///
/// Authenticated operations read the bearer token from the given session
/// snapshot and fail fast with `CallerError::MissingToken` when there is none.
/// Every call is a single attempt.
#[derive(Clone)]
pub struct ApiGateway {
    remote: Arc<dyn RemoteApi>,
}

impl ApiGateway {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteApi>) -> Self {
        Self { remote }
    }

    /// # Errors
    ///
    /// Returns `ApiError` for any non-success response.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, ApiError> {
        let request = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.remote.login(&request).await
    }

    /// # Errors
    ///
    /// Returns `ApiError` for any non-success response.
    pub async fn signup(&self, request: &SignupRequest) -> Result<String, ApiError> {
        self.remote.signup(request).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Caller` without a token, or the remote failure.
    pub async fn fetch_articles(&self, session: &Session) -> Result<Vec<Article>, ApiError> {
        let token = bearer(session)?;
        self.remote.articles(token).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Caller` without a token, or the remote failure.
    pub async fn fetch_questions(
        &self,
        session: &Session,
        article_id: ArticleId,
    ) -> Result<Vec<Question>, ApiError> {
        let token = bearer(session)?;
        self.remote.questions(token, article_id).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Caller` without a token, or the remote failure.
    pub async fn fetch_progress(&self, session: &Session) -> Result<Vec<ProgressEntry>, ApiError> {
        let token = bearer(session)?;
        self.remote.progress(token).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Caller` without a token, or the remote failure.
    pub async fn mark_complete(
        &self,
        session: &Session,
        question_id: QuestionId,
    ) -> Result<(), ApiError> {
        let token = bearer(session)?;
        self.remote.mark_read(token, question_id).await
    }
}

fn bearer(session: &Session) -> Result<&AuthToken, ApiError> {
    session.token().ok_or_else(|| {
        debug!(session = %session.id(), "authenticated call without a token");
        ApiError::Caller(CallerError::MissingToken)
    })
}
