use std::sync::Arc;

use gateway::{ApiError, CallerError};
use tracing::{debug, warn};
use tutor_core::model::{Article, Question};

use crate::api_gateway::ApiGateway;
use crate::progress::ProgressTracker;
use crate::session_store::SessionStore;

//
// ─── VIEW TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question: Question,
    pub completed: bool,
}

/// Whether an article's question list could be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionsStatus {
    Available,
    Unavailable { reason: String },
}

/// An article merged with its questions and their completion flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleView {
    pub article: Article,
    pub questions: Vec<QuestionView>,
    pub status: QuestionsStatus,
}

impl ArticleView {
    fn available(article: Article, questions: Vec<Question>, progress: &ProgressTracker) -> Self {
        let questions = questions
            .into_iter()
            .map(|question| QuestionView {
                completed: progress.is_complete(question.id()),
                question,
            })
            .collect();
        Self {
            article,
            questions,
            status: QuestionsStatus::Available,
        }
    }

    fn unavailable(article: Article, reason: &ApiError) -> Self {
        Self {
            article,
            questions: Vec::new(),
            status: QuestionsStatus::Unavailable {
                reason: reason.to_string(),
            },
        }
    }

    /// Recompute completion flags from the tracker's current set.
    pub fn reconcile(&mut self, progress: &ProgressTracker) {
        for view in &mut self.questions {
            view.completed = progress.is_complete(view.question.id());
        }
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.questions.iter().filter(|q| q.completed).count()
    }

    #[must_use]
    pub fn questions_unavailable(&self) -> bool {
        matches!(self.status, QuestionsStatus::Unavailable { .. })
    }
}

//
// ─── AGGREGATOR ────────────────────────────────────────────────────────────────
//

/// Builds the articles page from three endpoints.
pub struct ArticleAggregator {
    sessions: Arc<SessionStore>,
    gateway: Arc<ApiGateway>,
    progress: Arc<ProgressTracker>,
}

impl ArticleAggregator {
    #[must_use]
    pub fn new(
        sessions: Arc<SessionStore>,
        gateway: Arc<ApiGateway>,
        progress: Arc<ProgressTracker>,
    ) -> Self {
        Self {
            sessions,
            gateway,
            progress,
        }
    }

    /// Load every article with its questions, in server order.
    ///
    /// Progress is refreshed first so flags reflect the server's latest set.
    /// A failed question fetch degrades only that article.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if progress or the article list cannot be fetched,
    /// if the session's token is rejected, or if the session ends mid-load.
    pub async fn load_view(&self) -> Result<Vec<ArticleView>, ApiError> {
        self.progress.refresh().await?;

        let session = self.sessions.current();
        let articles = self
            .sessions
            .observe(session.id(), self.gateway.fetch_articles(&session).await)?;

        let mut views = Vec::with_capacity(articles.len());
        for article in articles {
            let result = self.gateway.fetch_questions(&session, article.id()).await;
            let view = match self.sessions.observe(session.id(), result) {
                Ok(questions) => ArticleView::available(article, questions, &self.progress),
                Err(err) if err.is_session_fatal() => return Err(err),
                Err(err) => {
                    warn!(article = %article.id(), error = %err, "questions unavailable");
                    ArticleView::unavailable(article, &err)
                }
            };
            views.push(view);
        }

        if self.sessions.current_id() != session.id() {
            return Err(CallerError::StaleSession.into());
        }

        debug!(articles = views.len(), "article view loaded");
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway::InMemoryApi;
    use tutor_core::model::{ArticleId, QuestionId, Role};
    use tutor_core::time::fixed_clock;

    const EMAIL: &str = "ann@example.com";

    fn question(id: u64, article: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            format!("https://x.dev/{id}"),
            "Medium",
            ArticleId::new(article),
        )
    }

    async fn aggregator(api: &InMemoryApi) -> (Arc<SessionStore>, Arc<ProgressTracker>, ArticleAggregator) {
        api.add_account(EMAIL, "pw", Role::User);
        let gateway = Arc::new(ApiGateway::new(Arc::new(api.clone())));
        let sessions = Arc::new(SessionStore::new(fixed_clock(), Arc::clone(&gateway)));
        sessions.login(EMAIL, "pw").await.unwrap();
        let progress = Arc::new(ProgressTracker::new(Arc::clone(&sessions), Arc::clone(&gateway)));
        let aggregator =
            ArticleAggregator::new(Arc::clone(&sessions), gateway, Arc::clone(&progress));
        (sessions, progress, aggregator)
    }

    #[tokio::test]
    async fn preserves_server_order() {
        let api = InMemoryApi::new();
        for id in [3, 1, 2] {
            api.add_article(Article::new(ArticleId::new(id), format!("A{id}"), "", "DSA"));
        }
        api.add_question(question(30, 3));
        api.add_question(question(10, 3));
        let (_, _, aggregator) = aggregator(&api).await;

        let views = aggregator.load_view().await.unwrap();

        let order: Vec<u64> = views.iter().map(|v| v.article.id().value()).collect();
        assert_eq!(order, vec![3, 1, 2]);
        let questions: Vec<u64> = views[0]
            .questions
            .iter()
            .map(|q| q.question.id().value())
            .collect();
        assert_eq!(questions, vec![30, 10]);
    }

    #[tokio::test]
    async fn flags_follow_freshly_refreshed_progress() {
        let api = InMemoryApi::new();
        api.add_article(Article::new(ArticleId::new(1), "Arrays", "", "DSA"));
        api.add_question(question(42, 1));
        api.add_question(question(7, 1));
        let (_, progress, aggregator) = aggregator(&api).await;
        progress.mark_locally(QuestionId::new(7));
        api.set_progress(EMAIL, &[QuestionId::new(42)]);

        let views = aggregator.load_view().await.unwrap();

        let flags: Vec<bool> = views[0].questions.iter().map(|q| q.completed).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[tokio::test]
    async fn reconcile_picks_up_local_marks() {
        let api = InMemoryApi::new();
        api.add_article(Article::new(ArticleId::new(1), "Arrays", "", "DSA"));
        api.add_question(question(5, 1));
        let (_, progress, aggregator) = aggregator(&api).await;
        let mut views = aggregator.load_view().await.unwrap();
        assert_eq!(views[0].completed_count(), 0);

        progress.mark_locally(QuestionId::new(5));
        views[0].reconcile(&progress);

        assert_eq!(views[0].completed_count(), 1);
    }

    #[tokio::test]
    async fn rejected_token_aborts_the_view() {
        let api = InMemoryApi::new();
        api.add_article(Article::new(ArticleId::new(1), "Arrays", "", "DSA"));
        let (sessions, _, aggregator) = aggregator(&api).await;
        api.revoke_tokens();

        assert_eq!(aggregator.load_view().await, Err(ApiError::Unauthorized));
        assert!(!sessions.is_authenticated());
    }

    #[tokio::test]
    async fn logged_out_load_fails_without_network() {
        let api = InMemoryApi::new();
        let (sessions, _, aggregator) = aggregator(&api).await;
        sessions.logout();
        let before = api.request_count();

        assert_eq!(
            aggregator.load_view().await,
            Err(ApiError::Caller(CallerError::MissingToken))
        );
        assert_eq!(api.request_count(), before);
    }
}
