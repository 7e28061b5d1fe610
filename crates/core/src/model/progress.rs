use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// One completed question as recorded by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub question_id: QuestionId,
}

impl ProgressEntry {
    #[must_use]
    pub fn new(question_id: QuestionId) -> Self {
        Self { question_id }
    }
}
