use std::sync::Arc;

use dioxus::prelude::*;

use crate::context::{AppContext, SessionHandle};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProgressVm, map_progress};

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let progress = ctx.progress();
    let sessions = ctx.sessions();

    let resource = use_resource(move || {
        let progress = Arc::clone(&progress);
        let sessions = Arc::clone(&sessions);
        async move {
            let result = progress.refresh().await;
            session.sync(&sessions);
            result.map_err(|err| ViewError::from_api(&err))?;
            Ok::<_, ViewError>(map_progress(&progress.summary()))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page progress-page",
            header { class: "view-header",
                h2 { class: "view-title", "Your Progress" }
            }
            div { class: "view-divider" }

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
                ViewState::Ready(vm) => rsx! {
                    ProgressDetails { vm }
                },
            }
        }
    }
}

#[component]
fn ProgressDetails(vm: ProgressVm) -> Element {
    rsx! {
        div { class: "progress-summary",
            span { class: "progress-metric-label", "Total Completed" }
            div { class: "progress-metric", "{vm.total_label}" }
        }
        if let Some(hint) = vm.empty_hint {
            p { class: "progress-empty", "{hint}" }
        } else {
            ul { class: "progress-list",
                for item in vm.items.iter() {
                    li { key: "{item}", "{item}" }
                }
            }
        }
    }
}
