use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gateway::{ApiError, CallerError};
use tracing::{debug, warn};
use tutor_core::model::{QuestionId, SessionId};

use crate::api_gateway::ApiGateway;
use crate::session_store::SessionStore;

/// Aggregated view of the learner's progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub total: usize,
    pub completed: Vec<QuestionId>,
}

#[derive(Debug, Default)]
struct CompletedSet {
    session: Option<SessionId>,
    ids: BTreeSet<QuestionId>,
    /// Server order, followed by local confirmations.
    order: Vec<QuestionId>,
    /// Ticket of the most recently started refresh.
    issued: u64,
    /// Ticket of the refresh whose snapshot is currently applied.
    applied: u64,
    /// Confirmed ids stamped with the ticket that was current at the time.
    confirmed: Vec<(u64, QuestionId)>,
}

impl CompletedSet {
    fn start_refresh(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn confirm(&mut self, question_id: QuestionId) {
        self.confirmed.push((self.issued, question_id));
        if self.ids.insert(question_id) {
            self.order.push(question_id);
        }
    }

    /// Apply the snapshot fetched by refresh `ticket`.
    ///
    /// A snapshot older than the applied one is dropped. Confirmations made
    /// after the refresh started may be missing from the snapshot, so they
    /// are kept.
    fn apply(&mut self, ticket: u64, snapshot: &[QuestionId]) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.applied = ticket;
        self.confirmed.retain(|(stamp, _)| *stamp >= ticket);

        self.ids.clear();
        self.order.clear();
        let kept = self.confirmed.iter().map(|(_, id)| *id);
        for id in snapshot.iter().copied().chain(kept) {
            if self.ids.insert(id) {
                self.order.push(id);
            }
        }
        true
    }
}

/// Mirror of the server's completed-question set for the current session.
///
/// The set is tagged with the session it was fetched for. Once the session is
/// replaced, the old set is invisible and gets dropped on the next access.
/// Overlapping refreshes apply in the order they were started.
pub struct ProgressTracker {
    sessions: Arc<SessionStore>,
    gateway: Arc<ApiGateway>,
    state: Mutex<CompletedSet>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(sessions: Arc<SessionStore>, gateway: Arc<ApiGateway>) -> Self {
        Self {
            sessions,
            gateway,
            state: Mutex::new(CompletedSet::default()),
        }
    }

    // Locks the set, first discarding it if it belongs to another session.
    fn current_set(&self) -> MutexGuard<'_, CompletedSet> {
        let current = self.sessions.current_id();
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.session != Some(current) {
            *guard = CompletedSet {
                session: Some(current),
                ..CompletedSet::default()
            };
        }
        guard
    }

    /// Replace the local set with the server's.
    ///
    /// A response overtaken by a newer refresh is dropped, and the set
    /// already in place is returned.
    ///
    /// # Errors
    ///
    /// Returns the gateway error, or `CallerError::StaleSession` if the
    /// session changed while the request was in flight. The local set is
    /// left untouched on error.
    pub async fn refresh(&self) -> Result<BTreeSet<QuestionId>, ApiError> {
        let session = self.sessions.current();
        let ticket = self.current_set().start_refresh();
        let result = self.gateway.fetch_progress(&session).await;
        let entries = self.sessions.observe(session.id(), result)?;
        let snapshot: Vec<QuestionId> = entries.into_iter().map(|e| e.question_id).collect();

        let mut guard = self.current_set();
        if guard.session != Some(session.id()) {
            warn!(session = %session.id(), "discarding progress fetched for an ended session");
            return Err(CallerError::StaleSession.into());
        }
        if guard.apply(ticket, &snapshot) {
            debug!(session = %session.id(), ticket, completed = guard.ids.len(), "progress refreshed");
        } else {
            debug!(session = %session.id(), ticket, "progress response overtaken by a newer refresh");
        }
        Ok(guard.ids.clone())
    }

    #[must_use]
    pub fn is_complete(&self, question_id: QuestionId) -> bool {
        self.current_set().ids.contains(&question_id)
    }

    /// Record a confirmed completion without a round trip.
    pub fn mark_locally(&self, question_id: QuestionId) {
        self.current_set().confirm(question_id);
    }

    /// Like `mark_locally`, but only if `session` is still current.
    pub(crate) fn mark_for(&self, session: SessionId, question_id: QuestionId) -> bool {
        let mut guard = self.current_set();
        if guard.session != Some(session) {
            return false;
        }
        guard.confirm(question_id);
        true
    }

    #[must_use]
    pub fn completed(&self) -> BTreeSet<QuestionId> {
        self.current_set().ids.clone()
    }

    /// Completed questions in the order the server listed them.
    #[must_use]
    pub fn summary(&self) -> ProgressSummary {
        let guard = self.current_set();
        ProgressSummary {
            total: guard.order.len(),
            completed: guard.order.clone(),
        }
    }
}
