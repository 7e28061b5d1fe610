use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gateway::ApiError;
use tracing::{debug, info, warn};
use tutor_core::model::{QuestionId, Session, SessionId};

use crate::api_gateway::ApiGateway;
use crate::error::WorkflowError;
use crate::progress::ProgressTracker;
use crate::session_store::SessionStore;

/// An in-flight "mark as done" action. It leaves the map once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionIntent {
    pub question_id: QuestionId,
    pub session: SessionId,
}

/// What the UI should show for a question right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    NotCompleted,
    /// Optimistically shown as completed while the server call is outstanding.
    Pending,
    Completed,
}

impl QuestionStatus {
    #[must_use]
    pub fn shows_completed(self) -> bool {
        !matches!(self, Self::NotCompleted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The server recorded the completion and the local set now agrees.
    Confirmed,
    /// The session ended while the call was outstanding; the response was dropped.
    Discarded,
}

/// Per-question state machine: idle -> pending -> confirmed | failed.
///
/// Marking is one-way. A question that is complete, or already pending in the
/// current session, is rejected before any network call.
pub struct CompletionWorkflow {
    sessions: Arc<SessionStore>,
    gateway: Arc<ApiGateway>,
    progress: Arc<ProgressTracker>,
    intents: Mutex<HashMap<QuestionId, CompletionIntent>>,
}

impl CompletionWorkflow {
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
            intents: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QuestionId, CompletionIntent>> {
        self.intents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Locks the intent map, first dropping intents of ended sessions.
    fn lock_current(&self) -> MutexGuard<'_, HashMap<QuestionId, CompletionIntent>> {
        let current = self.sessions.current_id();
        let mut intents = self.lock();
        intents.retain(|_, intent| intent.session == current);
        intents
    }

    #[must_use]
    pub fn status(&self, question_id: QuestionId) -> QuestionStatus {
        if self.progress.is_complete(question_id) {
            return QuestionStatus::Completed;
        }
        if self.lock_current().contains_key(&question_id) {
            QuestionStatus::Pending
        } else {
            QuestionStatus::NotCompleted
        }
    }

    /// Pending intents of the current session.
    #[must_use]
    pub fn pending(&self) -> Vec<CompletionIntent> {
        let mut pending: Vec<_> = self.lock_current().values().copied().collect();
        pending.sort_by_key(|intent| intent.question_id);
        pending
    }

    /// Mark a question as done.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AlreadyCompleted` or `WorkflowError::DuplicatePending`
    /// without a network call, or `WorkflowError::Failed` after reverting the
    /// optimistic state when the server call fails.
    pub async fn mark_done(
        &self,
        question_id: QuestionId,
    ) -> Result<CompletionOutcome, WorkflowError> {
        let session = self.sessions.current();
        self.begin(&session, question_id)?;

        let result = self.gateway.mark_complete(&session, question_id).await;
        let ended = self.sessions.current_id() != session.id();
        let result = self.sessions.observe(session.id(), result);
        self.finish(&session, question_id, ended, result)
    }

    fn begin(&self, session: &Session, question_id: QuestionId) -> Result<(), WorkflowError> {
        if self.progress.is_complete(question_id) {
            return Err(WorkflowError::AlreadyCompleted(question_id));
        }

        let mut intents = self.lock();
        intents.retain(|_, intent| intent.session == session.id());
        if intents.contains_key(&question_id) {
            return Err(WorkflowError::DuplicatePending(question_id));
        }
        intents.insert(
            question_id,
            CompletionIntent {
                question_id,
                session: session.id(),
            },
        );
        debug!(question = %question_id, "mark pending");
        Ok(())
    }

    fn finish(
        &self,
        session: &Session,
        question_id: QuestionId,
        ended: bool,
        result: Result<(), ApiError>,
    ) -> Result<CompletionOutcome, WorkflowError> {
        let intent = {
            let mut intents = self.lock();
            match intents.get(&question_id) {
                Some(intent) if intent.session == session.id() => intents.remove(&question_id),
                _ => None,
            }
        };
        if intent.is_none() || ended {
            info!(question = %question_id, "discarding mark response for an ended session");
            return Ok(CompletionOutcome::Discarded);
        }

        match result {
            Ok(()) => {
                if !self.progress.mark_for(session.id(), question_id) {
                    info!(question = %question_id, "discarding mark response for an ended session");
                    return Ok(CompletionOutcome::Discarded);
                }
                info!(question = %question_id, "mark confirmed");
                Ok(CompletionOutcome::Confirmed)
            }
            Err(source) => {
                warn!(question = %question_id, error = %source, "mark failed, reverted");
                Err(WorkflowError::Failed {
                    question_id,
                    source,
                })
            }
        }
    }
}
