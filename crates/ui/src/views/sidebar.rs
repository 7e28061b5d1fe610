use dioxus::prelude::*;

use crate::app::Tab;
use crate::context::{AppContext, SessionHandle};
use crate::vm::map_session_badge;

#[component]
pub fn Sidebar(tab: Signal<Tab>) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let sessions = ctx.sessions();
    let badge = map_session_badge(&session.current());
    let mut tab = tab;

    rsx! {
        nav { class: "sidebar",
            h1 { "DSA Tutor" }
            p { class: "sidebar-status", "{badge.status_label}" }
            if let Some(since) = badge.since_label {
                p { class: "sidebar-since", "{since}" }
            }
            ul {
                li {
                    button {
                        class: nav_class(tab() == Tab::Articles),
                        r#type: "button",
                        onclick: move |_| tab.set(Tab::Articles),
                        "Articles & Questions"
                    }
                }
                li {
                    button {
                        class: nav_class(tab() == Tab::Progress),
                        r#type: "button",
                        onclick: move |_| tab.set(Tab::Progress),
                        "Progress"
                    }
                }
            }
            button {
                class: "btn btn-secondary sidebar-logout",
                r#type: "button",
                onclick: move |_| {
                    sessions.logout();
                    session.sync(&sessions);
                },
                "Logout"
            }
        }
    }
}

fn nav_class(active: bool) -> &'static str {
    if active {
        "nav-item nav-item--active"
    } else {
        "nav-item"
    }
}
