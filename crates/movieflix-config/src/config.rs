use movieflix_models::UserId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_BASE_ENV: &str = "MOVIEFLIX_API_BASE";
pub const USER_ENV: &str = "MOVIEFLIX_USER";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout. Unset means the HTTP client's own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default)]
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

/// The MovieFlix and CineScope front ends differ only in branding.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Movieflix,
    Cinescope,
}

impl Theme {
    pub fn app_name(&self) -> &'static str {
        match self {
            Theme::Movieflix => "MovieFlix",
            Theme::Cinescope => "CineScope",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_len() -> usize {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { user_id: UserId::default() }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the file when it exists, otherwise falls back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = base_url.trim().to_string();
        }
        if let Some(user) = lookup(USER_ENV) {
            self.session.user_id = user
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {} value '{}': {}", USER_ENV, user, e))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "api.base_url must start with http:// or https:// (got '{}')",
                self.api.base_url
            ));
        }

        if self.search.min_query_len == 0 {
            return Err(anyhow::anyhow!("search.min_query_len must be at least 1"));
        }

        if self.search.debounce_ms == 0 {
            return Err(anyhow::anyhow!("search.debounce_ms must be greater than 0"));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("api.timeout_secs must be greater than 0 when set"));
        }

        Ok(())
    }

    /// Base URL without a trailing slash, ready for path joining.
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim().trim_end_matches('/')
    }
}
