use color_eyre::eyre::eyre;
use color_eyre::Result;
use movieflix_client::HttpBackend;
use movieflix_config::{Config, PathManager};
use movieflix_core::{Recommender, Session, WatchlistClient};
use movieflix_models::UserId;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolves the config file: `--config` if given, otherwise the platform default.
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathManager::default().config_file())
}

/// Reads the config file (defaults when absent), then applies environment
/// and command-line overrides.
pub fn load_config(path: &Path, user: Option<UserId>) -> Result<Config> {
    resolve_config(path, user, |key| std::env::var(key).ok())
}

/// File, then `lookup` (the environment), then `--user`, then validation.
fn resolve_config<F>(path: &Path, user: Option<UserId>, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Config::load_or_default(path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))?;
    config.apply_overrides(lookup).map_err(|e| eyre!("{}", e))?;
    if let Some(user) = user {
        config.session.user_id = user;
    }
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", path.display(), e))?;
    Ok(config)
}

/// Everything a command needs for one session against the backend.
pub struct AppContext {
    pub config: Config,
    pub backend: Arc<HttpBackend>,
    pub session: Session,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let backend = HttpBackend::from_config(&config).map_err(|e| eyre!("{}", e))?;
        let session = Session::start(config.session.user_id);
        Ok(Self {
            config,
            backend: Arc::new(backend),
            session,
        })
    }

    pub fn recommender(&self) -> Recommender<HttpBackend> {
        Recommender::new(Arc::clone(&self.backend))
    }

    pub fn watchlist(&self) -> WatchlistClient<HttpBackend> {
        WatchlistClient::new(Arc::clone(&self.backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movieflix_config::{API_BASE_ENV, USER_ENV};
    use std::collections::HashMap;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_file_values_used_without_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[api]\nbase_url = \"http://films.local:8080\"\n\n[session]\nuser_id = 3\n");

        let config = resolve_config(&path, None, env(&[])).unwrap();
        assert_eq!(config.api.base_url, "http://films.local:8080");
        assert_eq!(config.session.user_id, UserId(3));
    }

    #[test]
    fn test_env_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[session]\nuser_id = 3\n");

        let config = resolve_config(&path, None, env(&[(USER_ENV, "5"), (API_BASE_ENV, "https://api.example.com")])).unwrap();
        assert_eq!(config.session.user_id, UserId(5));
        assert_eq!(config.api.base_url, "https://api.example.com");
    }

    #[test]
    fn test_user_flag_beats_env_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[session]\nuser_id = 3\n");

        let config = resolve_config(&path, Some(UserId(9)), env(&[(USER_ENV, "5")])).unwrap();
        assert_eq!(config.session.user_id, UserId(9));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve_config(&dir.path().join("absent.toml"), None, env(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_rejected_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[api]\nbase_url = \"ftp://films.local\"\n");

        let err = resolve_config(&path, None, env(&[])).unwrap_err().to_string();
        assert!(err.contains("Invalid configuration"), "{}", err);
        assert!(err.contains(&path.display().to_string()), "{}", err);
    }

    #[test]
    fn test_env_can_repair_invalid_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[api]\nbase_url = \"ftp://films.local\"\n");

        let config = resolve_config(&path, None, env(&[(API_BASE_ENV, "http://localhost:5000")])).unwrap();
        assert_eq!(config.api_base(), "http://localhost:5000");
    }

    #[test]
    fn test_unparsable_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[session\n");

        let err = resolve_config(&path, None, env(&[])).unwrap_err().to_string();
        assert!(err.contains("Failed to load config"), "{}", err);
        assert!(err.contains(&path.display().to_string()), "{}", err);
    }
}
