/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tunify_client::{ClientConfig, DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_URL, DEFAULT_STORE_URL};

/// File read from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "tunify.toml";

/// Largest result count the search API honours
pub const MAX_SEARCH_LIMIT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_store_url")]
    pub store_url: String,

    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Where the signed-in user is kept between invocations
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; otherwise `tunify.toml` is read when
    /// present. `TUNIFY_*` variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (TUNIFY_STORE_URL, ...)
        settings = settings.add_source(config::Environment::with_prefix("TUNIFY").try_parsing(true));

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("store_url", &self.store_url), ("search_url", &self.search_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CliError::Config(format!(
                    "{name} must start with http:// or https:// (got {url:?})"
                )));
            }
        }

        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(CliError::Config("Timeouts must be at least one second".into()));
        }

        if self.search_limit == 0 || self.search_limit > MAX_SEARCH_LIMIT {
            return Err(CliError::Config(format!(
                "search_limit must be between 1 and {MAX_SEARCH_LIMIT}"
            )));
        }

        if self.session_file.as_os_str().is_empty() {
            return Err(CliError::Config("session_file cannot be empty".into()));
        }

        Ok(())
    }

    /// Client settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.store_url.clone())
            .with_search_url(self.search_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

// Default values
fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".tunify/session.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            search_url: default_search_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            search_limit: default_search_limit(),
            session_file: default_session_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store_url, "http://localhost:3000");
        assert_eq!(config.search_limit, 25);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tunify.toml");
        std::fs::write(
            &path,
            "store_url = \"http://store.test:4000\"\nsearch_limit = 5\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.store_url, "http://store.test:4000");
        assert_eq!(config.search_limit, 5);
        assert_eq!(config.search_url, DEFAULT_SEARCH_URL);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let config = AppConfig {
            store_url: "localhost:3000".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            search_limit: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn client_config_carries_timeouts() {
        let config = AppConfig {
            timeout_secs: 3,
            ..AppConfig::default()
        };
        let client = config.client_config();
        assert_eq!(client.timeout, Duration::from_secs(3));
        assert_eq!(client.store_url, config.store_url);
    }
}
