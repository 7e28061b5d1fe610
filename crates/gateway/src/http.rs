use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use tutor_core::model::{
    Article, ArticleId, AuthToken, ProgressEntry, Question, QuestionId, Role,
};
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::remote::{LoginGrant, LoginRequest, QuestionRecord, RemoteApi, SignupRequest};

/// `RemoteApi` over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns `ApiError::NetworkUnreachable` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::NetworkUnreachable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| ApiError::Decode(format!("bad endpoint {path}: {e}")))
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        debug!(path, "api request");
        let response = request.send().await.map_err(|e| {
            warn!(path, error = %e, "api request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify_status(status, &body);
        debug!(path, status = status.as_u16(), error = %err, "api request rejected");
        Err(err)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &AuthToken,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let request = self.client.get(url).bearer_auth(token.as_str());
        let response = self.send(path, request).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RemoteApi for HttpApi {
    async fn signup(&self, request: &SignupRequest) -> Result<String, ApiError> {
        let url = self.endpoint("signup")?;
        let response = self
            .send("signup", self.client.post(url).json(request))
            .await?;
        let body: MessageResponse = response.json().await?;
        Ok(body.message)
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginGrant, ApiError> {
        let url = self.endpoint("login")?;
        let response = self.send("login", self.client.post(url).json(request)).await?;
        let body: LoginResponse = response.json().await?;
        Ok(LoginGrant {
            token: AuthToken::new(body.token),
            role: Role::from_claim(body.role.as_deref()),
        })
    }

    async fn articles(&self, token: &AuthToken) -> Result<Vec<Article>, ApiError> {
        self.get_json("articles", token).await
    }

    async fn questions(
        &self,
        token: &AuthToken,
        article_id: ArticleId,
    ) -> Result<Vec<Question>, ApiError> {
        let path = format!("articles/{article_id}/questions");
        let body: QuestionsResponse = self.get_json(&path, token).await?;
        Ok(body
            .related_questions
            .into_iter()
            .map(|record| record.into_question(article_id))
            .collect())
    }

    async fn progress(&self, token: &AuthToken) -> Result<Vec<ProgressEntry>, ApiError> {
        self.get_json("user/progress", token).await
    }

    async fn mark_read(&self, token: &AuthToken, question_id: QuestionId) -> Result<(), ApiError> {
        let path = format!("questions/{question_id}/mark-read");
        let url = self.endpoint(&path)?;
        let request = self.client.post(url).bearer_auth(token.as_str());
        self.send(&path, request).await?;
        Ok(())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::NetworkUnreachable(err.to_string())
        }
    }
}

/// Map a non-success status and its body to an `ApiError`.
#[must_use]
pub fn classify_status(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        s if s.is_client_error() => ApiError::Rejected {
            status: s.as_u16(),
            message: error_message(body)
                .or_else(|| s.canonical_reason().map(str::to_owned))
                .unwrap_or_else(|| "request rejected".to_owned()),
        },
        s => ApiError::Server { status: s.as_u16() },
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    related_questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}
