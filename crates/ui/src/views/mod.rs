mod articles;
mod auth;
mod progress;
mod sidebar;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use articles::ArticlesView;
pub use auth::AuthView;
pub use progress::ProgressView;
pub use sidebar::Sidebar;
pub use state::{ViewError, ViewState, view_state_from_resource};
