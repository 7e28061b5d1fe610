use std::sync::Arc;

use gateway::{ApiConfig, HttpApi, RemoteApi};

use crate::Clock;
use crate::api_gateway::ApiGateway;
use crate::articles::ArticleAggregator;
use crate::completion::CompletionWorkflow;
use crate::error::ServicesError;
use crate::progress::ProgressTracker;
use crate::session_store::SessionStore;

/// Assembles the app-facing services around one remote API.
#[derive(Clone)]
pub struct TutorServices {
    sessions: Arc<SessionStore>,
    progress: Arc<ProgressTracker>,
    articles: Arc<ArticleAggregator>,
    completion: Arc<CompletionWorkflow>,
}

impl TutorServices {
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteApi>, clock: Clock) -> Self {
        let gateway = Arc::new(ApiGateway::new(remote));
        let sessions = Arc::new(SessionStore::new(clock, Arc::clone(&gateway)));
        let progress = Arc::new(ProgressTracker::new(
            Arc::clone(&sessions),
            Arc::clone(&gateway),
        ));
        let articles = Arc::new(ArticleAggregator::new(
            Arc::clone(&sessions),
            Arc::clone(&gateway),
            Arc::clone(&progress),
        ));
        let completion = Arc::new(CompletionWorkflow::new(
            Arc::clone(&sessions),
            gateway,
            Arc::clone(&progress),
        ));

        Self {
            sessions,
            progress,
            articles,
            completion,
        }
    }

    /// Build services talking HTTP to the configured server.
    ///
    /// # Errors
    ///
    /// Returns `ServicesError::Api` if the HTTP client cannot be created.
    pub fn http(config: ApiConfig, clock: Clock) -> Result<Self, ServicesError> {
        let remote = HttpApi::new(config)?;
        Ok(Self::new(Arc::new(remote), clock))
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionStore> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn articles(&self) -> Arc<ArticleAggregator> {
        Arc::clone(&self.articles)
    }

    #[must_use]
    pub fn completion(&self) -> Arc<CompletionWorkflow> {
        Arc::clone(&self.completion)
    }
}
