use std::collections::BTreeSet;
use std::sync::Arc;

use dioxus::prelude::*;
use services::QuestionStatus;
use tracing::warn;
use tutor_core::model::QuestionId;

use crate::context::{AppContext, SessionHandle};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ArticleCardVm, QuestionRowVm, map_article_cards};

#[component]
pub fn ArticlesView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let sessions = ctx.sessions();
    let completion = ctx.completion();
    let articles = ctx.articles();
    let mut pending = use_signal(BTreeSet::<QuestionId>::new);
    let mut flash = use_signal(|| None::<ViewError>);

    let sessions_for_resource = Arc::clone(&sessions);
    let resource = use_resource(move || {
        let articles = Arc::clone(&articles);
        let sessions = Arc::clone(&sessions_for_resource);
        async move {
            let result = articles.load_view().await;
            session.sync(&sessions);
            result.map_err(|err| ViewError::from_api(&err))
        }
    });

    let on_mark = {
        let completion = Arc::clone(&completion);
        use_callback(move |question_id: QuestionId| {
            if pending.peek().contains(&question_id) {
                return;
            }
            pending.write().insert(question_id);
            flash.set(None);

            let completion = Arc::clone(&completion);
            let sessions = Arc::clone(&sessions);
            spawn(async move {
                let result = completion.mark_done(question_id).await;
                pending.write().remove(&question_id);
                if let Err(err) = result {
                    warn!(question = %question_id, error = %err, "mark as done failed");
                    flash.set(Some(ViewError::from_workflow(&err)));
                }
                session.sync(&sessions);
            });
        })
    };

    let status_of = move |question_id: QuestionId| {
        if pending.read().contains(&question_id) {
            QuestionStatus::Pending
        } else {
            completion.status(question_id)
        }
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page articles-page",
            header { class: "view-header",
                h2 { class: "view-title", "Articles & Questions" }
                p { class: "view-subtitle", "Read an article, then work through its questions." }
            }
            div { class: "view-divider" }

            if let Some(err) = flash() {
                p { class: "flash flash--error", "{err.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(views) => {
                    let cards = map_article_cards(&views, status_of);
                    if cards.is_empty() {
                        rsx! {
                            p { "No articles yet." }
                        }
                    } else {
                        rsx! {
                            for card in cards {
                                ArticleCard { key: "{card.id}", card, on_mark }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ArticleCard(card: ArticleCardVm, on_mark: Callback<QuestionId>) -> Element {
    rsx! {
        section { class: "article-card",
            h3 { class: "article-title", "{card.title}" }
            span { class: "article-category", "{card.category}" }
            div { class: "article-body", dangerous_inner_html: "{card.body_html}" }
            h4 { class: "article-progress", "{card.progress_label}" }
            if let Some(reason) = card.unavailable_reason.as_ref() {
                p { class: "article-unavailable", "The question list could not be loaded ({reason})." }
            }
            ul { class: "question-list",
                for row in card.questions.iter().cloned() {
                    QuestionRow { key: "{row.id}", row, on_mark }
                }
            }
        }
    }
}

#[component]
fn QuestionRow(row: QuestionRowVm, on_mark: Callback<QuestionId>) -> Element {
    let question_id = row.id;

    rsx! {
        li { class: "question-row",
            span { class: "question-title",
                if let Some(href) = row.href.as_ref() {
                    a { href: "{href}", target: "_blank", rel: "noopener noreferrer", "{row.title}" }
                } else {
                    "{row.title}"
                }
            }
            span { class: "question-difficulty", "{row.difficulty}" }
            match row.status_label() {
                None => rsx! {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_mark.call(question_id),
                        "Mark as Done"
                    }
                },
                Some(label) => rsx! {
                    span { class: status_class(row.status), "{label}" }
                },
            }
        }
    }
}

fn status_class(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::Pending => "question-pending",
        _ => "question-done",
    }
}
