mod article;
mod ids;
mod progress;
mod question;
mod session;

pub use article::Article;
pub use ids::{ArticleId, ParseIdError, QuestionId, SessionId};
pub use progress::ProgressEntry;
pub use question::{Question, QuestionError};
pub use session::{AuthToken, Role, Session};
