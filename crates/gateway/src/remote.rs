use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tutor_core::model::{
    Article, ArticleId, AuthToken, ProgressEntry, Question, QuestionId, Role,
};

use crate::error::ApiError;

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /signup`. A blank admin code is left out of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_code: Option<String>,
}

impl SignupRequest {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        username: impl Into<String>,
        phone: impl Into<String>,
        admin_code: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            username: username.into(),
            phone: phone.into(),
            admin_code: admin_code.filter(|code| !code.trim().is_empty()),
        }
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: AuthToken,
    pub role: Role,
}

/// Question as listed by `GET /articles/{id}/questions`.
///
/// The wire shape has no article reference; it is attached from the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub title: String,
    pub link: String,
    pub difficulty: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn into_question(self, article_id: ArticleId) -> Question {
        Question::new(self.id, self.title, self.link, self.difficulty, article_id)
    }
}

/// Wire contract of the tutor API.
///
/// Implementations perform exactly one attempt per call. Authenticated
/// operations take the bearer token explicitly; deciding which token to use
/// is the caller's job.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Register a new account and return the server's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for duplicate accounts or bad admin codes.
    async fn signup(&self, request: &SignupRequest) -> Result<String, ApiError>;

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` or `ApiError::Rejected` on bad credentials.
    async fn login(&self, request: &LoginRequest) -> Result<LoginGrant, ApiError>;

    /// List all articles in server order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport, auth, or server failures.
    async fn articles(&self, token: &AuthToken) -> Result<Vec<Article>, ApiError>;

    /// List the questions linked to an article in server order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown articles, or other `ApiError`s.
    async fn questions(
        &self,
        token: &AuthToken,
        article_id: ArticleId,
    ) -> Result<Vec<Question>, ApiError>;

    /// The caller's completed questions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport, auth, or server failures.
    async fn progress(&self, token: &AuthToken) -> Result<Vec<ProgressEntry>, ApiError>;

    /// Record a question as completed for the caller.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for any non-success response.
    async fn mark_read(&self, token: &AuthToken, question_id: QuestionId) -> Result<(), ApiError>;
}
