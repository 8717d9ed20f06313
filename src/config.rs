//! Configuration Management
//!
//! Persistent connection settings for the `appwrite` command line tool.
//! Precedence is flags > environment > config file > defaults.

use crate::api::ClientConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

pub const ENV_ENDPOINT: &str = "APPWRITE_ENDPOINT";
pub const ENV_PROJECT: &str = "APPWRITE_PROJECT";
pub const ENV_API_KEY: &str = "APPWRITE_API_KEY";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub self_signed: bool,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("appwrite").join("config.json"))
    }

    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        Self::load_from(&path).unwrap_or_default()
    }

    /// Load configuration from a specific file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;

        // The file may hold an API key: owner read/write only
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(content.as_bytes())?;

        Ok(())
    }

    /// Overlay `APPWRITE_*` environment variables
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = Some(endpoint);
        }
        if let Some(project) = lookup(ENV_PROJECT) {
            self.project = Some(project);
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.key = Some(key);
        }
        self
    }

    /// Overlay values given on the command line
    pub fn with_overrides(
        mut self,
        endpoint: Option<&str>,
        project: Option<&str>,
        key: Option<&str>,
    ) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint.to_string());
        }
        if let Some(project) = project {
            self.project = Some(project.to_string());
        }
        if let Some(key) = key {
            self.key = Some(key.to_string());
        }
        self
    }

    /// Get effective endpoint (configured value or the cloud default)
    pub fn effective_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Client settings, or `None` while no project is configured
    pub fn client_config(&self) -> Option<ClientConfig> {
        let project = self.project.as_deref().filter(|p| !p.is_empty())?;

        let mut config = ClientConfig::new(&self.effective_endpoint(), project)
            .with_self_signed(self.self_signed);
        if let Some(key) = &self.key {
            config = config.with_key(key);
        }
        if let Some(locale) = &self.locale {
            config = config.with_locale(locale);
        }
        Some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_flags_over_env_over_file() {
        let file = Config {
            endpoint: Some("http://file/v1".into()),
            project: Some("file-project".into()),
            key: Some("file-key".into()),
            ..Config::default()
        };

        let merged = file
            .with_env_from(|name| match name {
                ENV_PROJECT => Some("env-project".into()),
                ENV_API_KEY => Some("env-key".into()),
                _ => None,
            })
            .with_overrides(None, None, Some("flag-key"));

        assert_eq!(merged.endpoint.as_deref(), Some("http://file/v1"));
        assert_eq!(merged.project.as_deref(), Some("env-project"));
        assert_eq!(merged.key.as_deref(), Some("flag-key"));
    }

    #[test]
    fn test_client_config_requires_project() {
        assert!(Config::default().client_config().is_none());

        let config = Config {
            project: Some("demo".into()),
            ..Config::default()
        };
        let client_config = config.client_config().unwrap();
        assert_eq!(client_config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client_config.project, "demo");
        assert!(client_config.key.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("appwrite-config-test-{}", std::process::id()));
        let path = dir.join("config.json");

        let config = Config {
            endpoint: Some("http://localhost/v1".into()),
            project: Some("demo".into()),
            self_signed: true,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = std::env::temp_dir().join(format!("appwrite-config-mode-{}", std::process::id()));
        let path = dir.join("config.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let config = Config {
            project: Some("demo".into()),
            key: Some("secret".into()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(Config::load_from(&path).unwrap(), config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let path = std::env::temp_dir().join("appwrite-config-does-not-exist.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
