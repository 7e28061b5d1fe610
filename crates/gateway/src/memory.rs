use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tutor_core::model::{
    Article, ArticleId, AuthToken, ProgressEntry, Question, QuestionId, Role,
};

use crate::error::ApiError;
use crate::remote::{LoginGrant, LoginRequest, RemoteApi, SignupRequest};

#[derive(Debug, Clone)]
struct Account {
    password: String,
    role: Role,
}

#[derive(Debug, Default)]
struct MemoryState {
    admin_code: Option<String>,
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    next_token: u64,
    articles: Vec<Article>,
    questions: HashMap<ArticleId, Vec<Question>>,
    progress: HashMap<String, Vec<QuestionId>>,
    broken_articles: HashSet<ArticleId>,
    failing_marks: HashSet<QuestionId>,
    calls: usize,
    mark_calls: usize,
}

impl MemoryState {
    fn email_for(&self, token: &AuthToken) -> Result<String, ApiError> {
        self.tokens
            .get(token.as_str())
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }

    fn question_exists(&self, id: QuestionId) -> bool {
        self.questions
            .values()
            .any(|list| list.iter().any(|q| q.id() == id))
    }
}

/// Scriptable in-memory tutor server for tests and offline demos.
///
/// Clones share state, so a test can keep a handle while services own another.
#[derive(Clone, Default)]
pub struct InMemoryApi {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept this code on signup to create admin accounts.
    #[must_use]
    pub fn with_admin_code(self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.with_state(|state| state.admin_code = Some(code));
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, ApiError> {
        self.state.lock().map_err(|e| {
            tracing::error!(error = %e, "in-memory api state poisoned");
            ApiError::Server { status: 500 }
        })
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
        match self.state.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn add_account(&self, email: &str, password: &str, role: Role) {
        self.with_state(|state| {
            state.accounts.insert(
                email.to_owned(),
                Account {
                    password: password.to_owned(),
                    role,
                },
            );
        });
    }

    /// Append an article; listing order is insertion order.
    pub fn add_article(&self, article: Article) {
        self.with_state(|state| state.articles.push(article));
    }

    /// Append a question under its article; listing order is insertion order.
    pub fn add_question(&self, question: Question) {
        self.with_state(|state| {
            state
                .questions
                .entry(question.article_id())
                .or_default()
                .push(question);
        });
    }

    pub fn set_progress(&self, email: &str, completed: &[QuestionId]) {
        self.with_state(|state| {
            state.progress.insert(email.to_owned(), completed.to_vec());
        });
    }

    #[must_use]
    pub fn progress_of(&self, email: &str) -> Vec<QuestionId> {
        self.with_state(|state| state.progress.get(email).cloned().unwrap_or_default())
    }

    /// Make `GET /articles/{id}/questions` fail with a server error.
    pub fn break_questions(&self, article_id: ArticleId) {
        self.with_state(|state| {
            state.broken_articles.insert(article_id);
        });
    }

    /// Make `POST /questions/{id}/mark-read` fail with a server error.
    pub fn fail_mark(&self, question_id: QuestionId) {
        self.with_state(|state| {
            state.failing_marks.insert(question_id);
        });
    }

    /// Forget every issued token, as if the server restarted.
    pub fn revoke_tokens(&self) {
        self.with_state(|state| state.tokens.clear());
    }

    /// Total calls that reached this server.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.with_state(|state| state.calls)
    }

    #[must_use]
    pub fn mark_calls(&self) -> usize {
        self.with_state(|state| state.mark_calls)
    }
}

#[async_trait]
impl RemoteApi for InMemoryApi {
    async fn signup(&self, request: &SignupRequest) -> Result<String, ApiError> {
        let mut state = self.lock()?;
        state.calls += 1;

        if state.accounts.contains_key(&request.email) {
            return Err(ApiError::Rejected {
                status: 409,
                message: "User already exists".into(),
            });
        }

        let role = match (&request.admin_code, &state.admin_code) {
            (None, _) => Role::User,
            (Some(given), Some(expected)) if given == expected => Role::Admin,
            (Some(_), _) => {
                return Err(ApiError::Rejected {
                    status: 403,
                    message: "Invalid admin code".into(),
                });
            }
        };

        state.accounts.insert(
            request.email.clone(),
            Account {
                password: request.password.clone(),
                role,
            },
        );
        Ok("User created successfully".into())
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginGrant, ApiError> {
        let mut state = self.lock()?;
        state.calls += 1;

        let role = match state.accounts.get(&request.email) {
            Some(account) if account.password == request.password => account.role,
            _ => return Err(ApiError::Unauthorized),
        };

        state.next_token += 1;
        let token = format!("token-{}", state.next_token);
        state.tokens.insert(token.clone(), request.email.clone());
        Ok(LoginGrant {
            token: AuthToken::new(token),
            role,
        })
    }

    async fn articles(&self, token: &AuthToken) -> Result<Vec<Article>, ApiError> {
        let mut state = self.lock()?;
        state.calls += 1;
        state.email_for(token)?;
        Ok(state.articles.clone())
    }

    async fn questions(
        &self,
        token: &AuthToken,
        article_id: ArticleId,
    ) -> Result<Vec<Question>, ApiError> {
        let mut state = self.lock()?;
        state.calls += 1;
        state.email_for(token)?;

        if state.broken_articles.contains(&article_id) {
            return Err(ApiError::Server { status: 500 });
        }
        if !state.articles.iter().any(|a| a.id() == article_id) {
            return Err(ApiError::NotFound);
        }
        Ok(state.questions.get(&article_id).cloned().unwrap_or_default())
    }

    async fn progress(&self, token: &AuthToken) -> Result<Vec<ProgressEntry>, ApiError> {
        let mut state = self.lock()?;
        state.calls += 1;
        let email = state.email_for(token)?;
        Ok(state
            .progress
            .get(&email)
            .map(|ids| ids.iter().copied().map(ProgressEntry::new).collect())
            .unwrap_or_default())
    }

    async fn mark_read(&self, token: &AuthToken, question_id: QuestionId) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        state.calls += 1;
        state.mark_calls += 1;
        let email = state.email_for(token)?;

        if state.failing_marks.contains(&question_id) {
            return Err(ApiError::Server { status: 500 });
        }
        if !state.question_exists(question_id) {
            return Err(ApiError::NotFound);
        }

        let completed = state.progress.entry(email).or_default();
        if !completed.contains(&question_id) {
            completed.push(question_id);
        }
        Ok(())
    }
}
