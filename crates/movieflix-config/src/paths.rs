use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the base directory override from the environment, if any
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("MOVIEFLIX_HOME").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("movieflix");

        Ok(Self::from_base(base_dir))
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self { config_dir: base }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/movieflix on Linux)
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".movieflix")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let paths = PathManager::from_base(PathBuf::from("/tmp/mf"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/mf/config.toml"));
        assert_eq!(paths.config_dir(), Path::new("/tmp/mf"));
    }
}
