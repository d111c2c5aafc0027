use crate::error::{NetplayError, Result};
use crate::utils::fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "netplay-updater";
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_REPO_OWNER: &str = "project-slippi";
pub const DEFAULT_REPO_NAME: &str = "Ishiiruka";
pub const DEFAULT_ARCHIVE_ROOT: &str = "FM-Slippi";
pub const DEFAULT_INSTALL_DIR_NAME: &str = "netplay";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root that receives the installation directory.
    pub app_data_dir: PathBuf,
    /// Where release assets are downloaded before extraction.
    pub temp_dir: PathBuf,
    pub api_base_url: String,
    pub repo_owner: String,
    pub repo_name: String,
    /// Top-level directory the release archive unpacks to.
    pub archive_root: String,
    pub install_dir_name: String,
    pub credential_url: Option<String>,
    /// Token written into the config file by the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_api_token: Option<String>,
    /// `GITHUB_TOKEN` as seen when the config was loaded. Never saved.
    #[serde(skip)]
    pub env_github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let app_data_dir =
            get_default_app_data_dir().unwrap_or_else(|_| PathBuf::from(".netplay-updater"));

        Config {
            app_data_dir,
            temp_dir: std::env::temp_dir(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            repo_owner: DEFAULT_REPO_OWNER.to_string(),
            repo_name: DEFAULT_REPO_NAME.to_string(),
            archive_root: DEFAULT_ARCHIVE_ROOT.to_string(),
            install_dir_name: DEFAULT_INSTALL_DIR_NAME.to_string(),
            credential_url: None,
            github_api_token: None,
            env_github_token: None,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Config {
            app_data_dir: get_default_app_data_dir()?,
            ..Config::default()
        })
    }

    /// Config rooted at explicit directories, leaving every other field at its default.
    pub fn with_dirs(app_data_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Config {
            app_data_dir: app_data_dir.into(),
            temp_dir: temp_dir.into(),
            ..Config::default()
        }
    }

    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            let mut config = Self::new()?;
            config.save_to(&config_path)?;
            config.env_github_token = std::env::var("GITHUB_TOKEN").ok();
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content).map_err(|e| {
            NetplayError::config_error(format!("Invalid config file {}: {e}", path.display()))
        })?;

        config.env_github_token = std::env::var("GITHUB_TOKEN").ok();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// `GITHUB_TOKEN` wins over the file so a rotated token takes effect immediately.
    pub fn github_token(&self) -> Option<String> {
        self.env_github_token
            .clone()
            .or_else(|| self.github_api_token.clone())
    }

    pub fn get_install_dir(&self) -> PathBuf {
        self.app_data_dir.join(&self.install_dir_name)
    }

    pub fn get_staging_dir(&self) -> PathBuf {
        self.app_data_dir.join(format!(".{}-staging", self.install_dir_name))
    }

    pub fn get_previous_dir(&self) -> PathBuf {
        self.app_data_dir.join(format!(".{}-previous", self.install_dir_name))
    }

    pub fn get_download_path(&self, asset_name: &str) -> PathBuf {
        self.temp_dir.join(asset_name)
    }
}

fn get_default_app_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or(NetplayError::DataDirectoryNotFound)
}

pub fn get_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME).join("config.json"))
        .ok_or(NetplayError::DataDirectoryNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_derived_paths() {
        let config = Config::with_dirs("/data", "/tmp");
        assert_eq!(config.get_install_dir(), PathBuf::from("/data/netplay"));
        assert_eq!(
            config.get_staging_dir(),
            PathBuf::from("/data/.netplay-staging")
        );
        assert_eq!(
            config.get_previous_dir(),
            PathBuf::from("/data/.netplay-previous")
        );
        assert_eq!(
            config.get_download_path("Slippi-Win.zip"),
            PathBuf::from("/tmp/Slippi-Win.zip")
        );
    }

    #[test]
    fn test_github_token_prefers_environment() {
        let mut config = Config::with_dirs("/data", "/tmp");
        assert_eq!(config.github_token(), None);

        config.github_api_token = Some("ghp_file".to_string());
        assert_eq!(config.github_token(), Some("ghp_file".to_string()));

        config.env_github_token = Some("ghp_env".to_string());
        assert_eq!(config.github_token(), Some("ghp_env".to_string()));
    }

    #[test]
    fn test_environment_token_is_never_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        std::env::set_var("GITHUB_TOKEN", "ghp_first");
        let mut config = Config::with_dirs(dir.path().join("data"), dir.path().join("tmp"));
        config.env_github_token = std::env::var("GITHUB_TOKEN").ok();
        config.save_to(&path).unwrap();

        std::env::set_var("GITHUB_TOKEN", "ghp_rotated");
        let loaded = Config::load_from(&path).unwrap();
        std::env::remove_var("GITHUB_TOKEN");

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(!on_disk.contains("ghp_first"));
        assert!(!on_disk.contains("env_github_token"));
        assert_eq!(loaded.github_api_token, None);
        assert_eq!(loaded.github_token(), Some("ghp_rotated".to_string()));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::with_dirs(dir.path().join("data"), dir.path().join("tmp"));
        config.credential_url = Some("https://example.invalid/playkey".to_string());
        config.github_api_token = Some("ghp_test".to_string());
        config.save_to(&path).unwrap();

        let mut loaded = Config::load_from(&path).unwrap();
        loaded.env_github_token = None;
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "repo_name": "Dolphin" }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.repo_name, "Dolphin");
        assert_eq!(loaded.repo_owner, DEFAULT_REPO_OWNER);
        assert_eq!(loaded.archive_root, DEFAULT_ARCHIVE_ROOT);
        assert_eq!(loaded.install_dir_name, DEFAULT_INSTALL_DIR_NAME);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, NetplayError::ConfigError { .. }));
    }
}
