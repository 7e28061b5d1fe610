#![forbid(unsafe_code)]

pub mod api_gateway;
pub mod app_services;
pub mod articles;
pub mod completion;
pub mod error;
pub mod progress;
pub mod session_store;

pub use tutor_core::Clock;

pub use api_gateway::ApiGateway;
pub use app_services::TutorServices;
pub use articles::{ArticleAggregator, ArticleView, QuestionView, QuestionsStatus};
pub use completion::{CompletionIntent, CompletionOutcome, CompletionWorkflow, QuestionStatus};
pub use error::{AuthError, ServicesError, WorkflowError};
pub use progress::{ProgressSummary, ProgressTracker};
pub use session_store::SessionStore;

pub use gateway::{ApiError, CallerError, SignupRequest};
