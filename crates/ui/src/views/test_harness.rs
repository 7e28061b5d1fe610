use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use gateway::InMemoryApi;
use services::TutorServices;
use tutor_core::time::fixed_clock;

use crate::app::Screen;
use crate::context::{UiApp, build_app_context};

#[derive(Props, Clone)]
struct ScreenHarnessProps {
    app: Arc<TutorServices>,
}

impl PartialEq for ScreenHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ScreenHarness(props: ScreenHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { Screen {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: InMemoryApi,
    pub services: Arc<TutorServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Build a screen over `api`, logging in as `login` first when given.
pub async fn setup_view_harness(api: InMemoryApi, login: Option<(&str, &str)>) -> ViewHarness {
    let services = Arc::new(TutorServices::new(Arc::new(api.clone()), fixed_clock()));
    if let Some((email, password)) = login {
        services
            .sessions()
            .login(email, password)
            .await
            .expect("login");
    }

    let dom = VirtualDom::new_with_props(
        ScreenHarness,
        ScreenHarnessProps {
            app: Arc::clone(&services),
        },
    );

    ViewHarness { dom, api, services }
}
