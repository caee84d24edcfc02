pub mod config;
pub mod paths;

pub use config::{ApiConfig, Config, LoggingConfig, SearchConfig, SessionConfig, Theme, UiConfig, API_BASE_ENV, USER_ENV};
pub use paths::PathManager;
