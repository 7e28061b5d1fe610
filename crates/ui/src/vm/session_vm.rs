use tutor_core::model::Session;

use super::time_fmt::format_datetime;

/// Sidebar status line for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionBadgeVm {
    pub status_label: String,
    pub since_label: Option<String>,
}

#[must_use]
pub fn map_session_badge(session: &Session) -> SessionBadgeVm {
    if !session.is_authenticated() {
        return SessionBadgeVm {
            status_label: "Not logged in".to_string(),
            since_label: None,
        };
    }

    SessionBadgeVm {
        status_label: format!("Logged in as {}", session.role().label()),
        since_label: session
            .established_at()
            .map(|at| format!("Since {}", format_datetime(at))),
    }
}
