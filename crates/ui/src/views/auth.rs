use dioxus::prelude::*;
use services::SignupRequest;

use crate::context::{AppContext, SessionHandle};
use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthTab {
    Login,
    SignUp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum FormState {
    Idle,
    Submitting,
    Done(String),
    Error(String),
}

impl FormState {
    fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

#[component]
pub fn AuthView() -> Element {
    let mut tab = use_signal(|| AuthTab::Login);

    rsx! {
        div { class: "page auth-page",
            header { class: "view-header",
                h2 { class: "view-title", "DSA Tutor" }
                p { class: "view-subtitle", "Log in to read articles and track your progress." }
            }
            div { class: "auth-tabs",
                button {
                    class: tab_class(tab() == AuthTab::Login),
                    r#type: "button",
                    onclick: move |_| tab.set(AuthTab::Login),
                    "Login"
                }
                button {
                    class: tab_class(tab() == AuthTab::SignUp),
                    r#type: "button",
                    onclick: move |_| tab.set(AuthTab::SignUp),
                    "Sign Up"
                }
            }
            match tab() {
                AuthTab::Login => rsx! { LoginForm {} },
                AuthTab::SignUp => rsx! { SignupForm {} },
            }
        }
    }
}

#[component]
fn LoginForm() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<SessionHandle>();
    let sessions = ctx.sessions();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut state = use_signal(|| FormState::Idle);

    let submit = move |_: MouseEvent| {
        if state.peek().is_submitting() {
            return;
        }
        let email_value = email.peek().trim().to_string();
        let password_value = password.peek().clone();
        if email_value.is_empty() || password_value.is_empty() {
            state.set(FormState::Error("Enter your email and password.".into()));
            return;
        }

        state.set(FormState::Submitting);
        let sessions = sessions.clone();
        spawn(async move {
            match sessions.login(&email_value, &password_value).await {
                Ok(_) => session.sync(&sessions),
                Err(err) => state.set(FormState::Error(ViewError::from_auth(&err).message())),
            }
        });
    };

    rsx! {
        div { class: "auth-form",
            label {
                "Email"
                input {
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            label {
                "Password"
                input {
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: state().is_submitting(),
                onclick: submit,
                "Login"
            }
            FormStatus { state: state() }
        }
    }
}

#[component]
fn SignupForm() -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut admin_code = use_signal(String::new);
    let mut state = use_signal(|| FormState::Idle);

    let submit = move |_: MouseEvent| {
        if state.peek().is_submitting() {
            return;
        }
        let request = SignupRequest::new(
            email.peek().trim(),
            password.peek().clone(),
            username.peek().trim(),
            phone.peek().trim(),
            Some(admin_code.peek().clone()),
        );
        if request.email.is_empty() || request.password.is_empty() {
            state.set(FormState::Error("Email and password are required.".into()));
            return;
        }

        state.set(FormState::Submitting);
        let sessions = sessions.clone();
        spawn(async move {
            match sessions.signup(&request).await {
                Ok(message) => {
                    password.set(String::new());
                    admin_code.set(String::new());
                    state.set(FormState::Done(format!("{message}. You can log in now.")));
                }
                Err(err) => state.set(FormState::Error(ViewError::from_auth(&err).message())),
            }
        });
    };

    rsx! {
        div { class: "auth-form",
            label {
                "Email"
                input { r#type: "email", value: "{email}", oninput: move |evt| email.set(evt.value()) }
            }
            label {
                "Password"
                input { r#type: "password", value: "{password}", oninput: move |evt| password.set(evt.value()) }
            }
            label {
                "Username"
                input { r#type: "text", value: "{username}", oninput: move |evt| username.set(evt.value()) }
            }
            label {
                "Phone"
                input { r#type: "tel", value: "{phone}", oninput: move |evt| phone.set(evt.value()) }
            }
            label {
                "Admin code (optional)"
                input { r#type: "password", value: "{admin_code}", oninput: move |evt| admin_code.set(evt.value()) }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: state().is_submitting(),
                onclick: submit,
                "Sign Up"
            }
            FormStatus { state: state() }
        }
    }
}

#[component]
fn FormStatus(state: FormState) -> Element {
    match state {
        FormState::Idle => rsx! {},
        FormState::Submitting => rsx! {
            p { class: "form-status", "Please wait..." }
        },
        FormState::Done(message) => rsx! {
            p { class: "form-status form-status--done", "{message}" }
        },
        FormState::Error(message) => rsx! {
            p { class: "form-status form-status--error", "{message}" }
        },
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "btn btn-primary"
    } else {
        "btn btn-secondary"
    }
}
