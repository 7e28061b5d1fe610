use serde::{Deserialize, Serialize};

use crate::model::ids::ArticleId;

/// A study article as published by the server.
///
/// Articles are read-only snapshots; the client never edits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    id: ArticleId,
    title: String,
    content: String,
    category: String,
}

impl Article {
    #[must_use]
    pub fn new(
        id: ArticleId,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            category: category.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ArticleId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Article body, usually markdown.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}
