use dioxus::prelude::*;

use crate::context::{AppContext, SessionHandle};
use crate::views::{ArticlesView, AuthView, ProgressView, Sidebar};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Articles,
    Progress,
}

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "DSA Tutor" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Screen {}
            }
        }
    }
}

/// Login/signup when logged out, the tabbed shell otherwise.
#[component]
pub(crate) fn Screen() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_signal(|| ctx.sessions().current());
    let handle = use_context_provider(|| SessionHandle::new(session));

    if handle.is_authenticated() {
        rsx! { Shell {} }
    } else {
        rsx! { AuthView {} }
    }
}

#[component]
fn Shell() -> Element {
    let tab = use_signal(|| Tab::Articles);

    rsx! {
        div { class: "app",
            Sidebar { tab }
            main { class: "content",
                match tab() {
                    Tab::Articles => rsx! { ArticlesView {} },
                    Tab::Progress => rsx! { ProgressView {} },
                }
            }
        }
    }
}
