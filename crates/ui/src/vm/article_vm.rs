use services::{ArticleView, QuestionStatus, QuestionView, QuestionsStatus};
use tutor_core::model::{ArticleId, QuestionId};

use super::markdown_vm::markdown_to_html;

/// UI-ready question row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub id: QuestionId,
    pub title: String,
    /// Only present for http(s) links; anything else renders as plain text.
    pub href: Option<String>,
    pub difficulty: String,
    pub status: QuestionStatus,
}

impl QuestionRowVm {
    #[must_use]
    pub fn can_mark(&self) -> bool {
        self.status == QuestionStatus::NotCompleted
    }

    #[must_use]
    pub fn status_label(&self) -> Option<&'static str> {
        match self.status {
            QuestionStatus::Completed => Some("Completed"),
            QuestionStatus::Pending => Some("Saving..."),
            QuestionStatus::NotCompleted => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArticleCardVm {
    pub id: ArticleId,
    pub title: String,
    pub category: String,
    pub body_html: String,
    pub questions: Vec<QuestionRowVm>,
    pub progress_label: String,
    pub unavailable_reason: Option<String>,
}

/// Map loaded article views, asking `status_of` for live question state.
#[must_use]
pub fn map_article_cards(
    views: &[ArticleView],
    status_of: impl Fn(QuestionId) -> QuestionStatus,
) -> Vec<ArticleCardVm> {
    views
        .iter()
        .map(|view| map_article_card(view, &status_of))
        .collect()
}

#[must_use]
pub fn map_article_card(
    view: &ArticleView,
    status_of: &impl Fn(QuestionId) -> QuestionStatus,
) -> ArticleCardVm {
    let questions = view
        .questions
        .iter()
        .map(|question| map_question_row(question, status_of))
        .collect::<Vec<_>>();

    let (progress_label, unavailable_reason) = match &view.status {
        QuestionsStatus::Available => {
            let done = questions
                .iter()
                .filter(|row| row.status == QuestionStatus::Completed)
                .count();
            (format!("{done}/{} completed", questions.len()), None)
        }
        QuestionsStatus::Unavailable { reason } => {
            ("Questions unavailable".to_string(), Some(reason.clone()))
        }
    };

    ArticleCardVm {
        id: view.article.id(),
        title: view.article.title().to_string(),
        category: view.article.category().to_string(),
        body_html: markdown_to_html(view.article.content()),
        questions,
        progress_label,
        unavailable_reason,
    }
}

fn map_question_row(
    view: &QuestionView,
    status_of: &impl Fn(QuestionId) -> QuestionStatus,
) -> QuestionRowVm {
    let question = &view.question;
    // Completion is one-way within a session, so a loaded flag stays valid.
    let status = if view.completed {
        QuestionStatus::Completed
    } else {
        status_of(question.id())
    };

    QuestionRowVm {
        id: question.id(),
        title: question.title().to_string(),
        href: question.link_url().ok().map(String::from),
        difficulty: question.difficulty().to_string(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::model::{Article, Question};

    fn view(status: QuestionsStatus, questions: Vec<(u64, &str, bool)>) -> ArticleView {
        ArticleView {
            article: Article::new(ArticleId::new(1), "Heaps", "A *heap* is a tree.", "Trees"),
            questions: questions
                .into_iter()
                .map(|(id, link, completed)| QuestionView {
                    question: Question::new(
                        QuestionId::new(id),
                        format!("Q{id}"),
                        link,
                        "Hard",
                        ArticleId::new(1),
                    ),
                    completed,
                })
                .collect(),
            status,
        }
    }

    #[test]
    fn maps_rows_with_live_status() {
        let view = view(
            QuestionsStatus::Available,
            vec![
                (1, "https://x.dev/1", true),
                (2, "https://x.dev/2", false),
                (3, "https://x.dev/3", false),
            ],
        );

        let card = map_article_card(&view, &|id: QuestionId| {
            if id == QuestionId::new(2) {
                QuestionStatus::Pending
            } else {
                QuestionStatus::NotCompleted
            }
        });

        let statuses: Vec<_> = card.questions.iter().map(|q| q.status).collect();
        assert_eq!(
            statuses,
            vec![
                QuestionStatus::Completed,
                QuestionStatus::Pending,
                QuestionStatus::NotCompleted
            ]
        );
        assert_eq!(card.progress_label, "1/3 completed");
        assert!(card.body_html.contains("<em>heap</em>"));
        assert!(card.questions[2].can_mark());
        assert!(!card.questions[1].can_mark());
        assert_eq!(card.questions[1].status_label(), Some("Saving..."));
    }

    #[test]
    fn unsafe_links_are_not_clickable() {
        let view = view(
            QuestionsStatus::Available,
            vec![(1, "javascript:alert(1)", false), (2, "https://x.dev/2", false)],
        );

        let card = map_article_card(&view, &|_: QuestionId| QuestionStatus::NotCompleted);

        assert_eq!(card.questions[0].href, None);
        assert_eq!(card.questions[1].href.as_deref(), Some("https://x.dev/2"));
    }

    #[test]
    fn unavailable_article_keeps_its_reason() {
        let view = view(
            QuestionsStatus::Unavailable {
                reason: "server error (500)".into(),
            },
            Vec::new(),
        );

        let cards = map_article_cards(&[view], |_| QuestionStatus::NotCompleted);

        assert_eq!(cards[0].progress_label, "Questions unavailable");
        assert_eq!(cards[0].unavailable_reason.as_deref(), Some("server error (500)"));
        assert!(cards[0].questions.is_empty());
    }
}
