mod article_vm;
mod markdown_vm;
mod progress_vm;
mod session_vm;
mod time_fmt;

pub use article_vm::{ArticleCardVm, QuestionRowVm, map_article_card, map_article_cards};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use progress_vm::{ProgressVm, map_progress};
pub use session_vm::{SessionBadgeVm, map_session_badge};
pub use time_fmt::format_datetime;
