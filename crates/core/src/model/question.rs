use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::{ArticleId, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question link is not a valid url: {0}")]
    InvalidLink(String),

    #[error("question link uses unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// A practice question linked from an article.
///
/// `article_id` is a back-reference to the article it was listed under; the
/// question is not owned by the article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    title: String,
    link: String,
    difficulty: String,
    article_id: ArticleId,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        title: impl Into<String>,
        link: impl Into<String>,
        difficulty: impl Into<String>,
        article_id: ArticleId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            link: link.into(),
            difficulty: difficulty.into(),
            article_id,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw link as sent by the server.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn article_id(&self) -> ArticleId {
        self.article_id
    }

    /// Parse the link, accepting only http(s) targets.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the link does not parse or is not http(s).
    pub fn link_url(&self) -> Result<Url, QuestionError> {
        let url = Url::parse(self.link.trim())
            .map_err(|_| QuestionError::InvalidLink(self.link.clone()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(QuestionError::UnsupportedScheme(other.to_string())),
        }
    }
}
