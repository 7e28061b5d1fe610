#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod remote;

pub use config::ApiConfig;
pub use error::{ApiError, CallerError, ConfigError};
pub use http::HttpApi;
pub use memory::InMemoryApi;
pub use remote::{LoginGrant, LoginRequest, QuestionRecord, RemoteApi, SignupRequest};
