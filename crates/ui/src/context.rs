use std::sync::Arc;

use dioxus::prelude::*;
use services::{
    ArticleAggregator, CompletionWorkflow, ProgressTracker, SessionStore, TutorServices,
};
use tutor_core::model::Session;

pub trait UiApp: Send + Sync {
    fn sessions(&self) -> Arc<SessionStore>;
    fn progress(&self) -> Arc<ProgressTracker>;
    fn articles(&self) -> Arc<ArticleAggregator>;
    fn completion(&self) -> Arc<CompletionWorkflow>;
}

impl UiApp for TutorServices {
    fn sessions(&self) -> Arc<SessionStore> {
        TutorServices::sessions(self)
    }

    fn progress(&self) -> Arc<ProgressTracker> {
        TutorServices::progress(self)
    }

    fn articles(&self) -> Arc<ArticleAggregator> {
        TutorServices::articles(self)
    }

    fn completion(&self) -> Arc<CompletionWorkflow> {
        TutorServices::completion(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    sessions: Arc<SessionStore>,
    progress: Arc<ProgressTracker>,
    articles: Arc<ArticleAggregator>,
    completion: Arc<CompletionWorkflow>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            sessions: app.sessions(),
            progress: app.progress(),
            articles: app.articles(),
            completion: app.completion(),
        }
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

/// Provided once by the binary through `LaunchBuilder::with_context`.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Reactive mirror of the store's session.
///
/// The store can replace its session behind the UI's back (a rejected token),
/// so views call `sync` after every service call.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionHandle {
    session: Signal<Session>,
}

impl SessionHandle {
    #[must_use]
    pub fn new(session: Signal<Session>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn current(&self) -> Session {
        self.session.cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn sync(mut self, store: &SessionStore) {
        let latest = store.current();
        if *self.session.peek() != latest {
            self.session.set(latest);
        }
    }
}
