//! Configuration module for the watchers
//!
//! Settings are read once at startup from a YAML file and shared read-only
//! (behind an `Arc`) with every component that needs them.
//!
//! ```yaml
//! watch_directory: "C:/mt4/MQL4/Files/account"
//! api_endpoint: "https://example.com/api/v1/account/data-import"
//! api_token: "secret"
//! user: "trader@example.com"
//! cleanup_threshold: 600000
//! health_endpoint: "https://example.com/api/v1/system/acknowledge"
//! ```

use crate::types::WatcherError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default age (seconds) after which archived files are deleted
pub const DEFAULT_CLEANUP_THRESHOLD_SECS: u64 = 600_000;

/// Default liveness ping period: 3 hours
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 3 * 60 * 60;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_UPLOAD_PAUSE_MS: u64 = 2_000;

pub const DEFAULT_SETTLE_INTERVAL_MS: u64 = 500;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Directory the terminal writes its exports into
    pub watch_directory: PathBuf,
    /// Upload endpoint for this watcher's file category
    pub api_endpoint: String,
    /// Sent as the `fp-api_token` header
    pub api_token: String,
    /// Identifier of the user account data is uploaded for
    #[serde(alias = "user", default)]
    pub user_identifier: String,
    /// Seconds an archived file is kept before the sweep deletes it
    #[serde(default = "default_cleanup_threshold")]
    pub cleanup_threshold: u64,
    /// Liveness ping endpoint, required by the `health` command only
    #[serde(default)]
    pub health_endpoint: Option<String>,
    /// Seconds between liveness pings
    #[serde(default = "default_health_interval")]
    pub health_interval: u64,
    /// Seconds before an HTTP request is abandoned
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Milliseconds to wait after each market upload
    #[serde(default = "default_upload_pause")]
    pub upload_pause: u64,
    /// Milliseconds a new file's size must stay unchanged before it is read;
    /// 0 reads it as soon as it is detected
    #[serde(default = "default_settle_interval")]
    pub settle_interval: u64,
}

fn default_cleanup_threshold() -> u64 {
    DEFAULT_CLEANUP_THRESHOLD_SECS
}

fn default_health_interval() -> u64 {
    DEFAULT_HEALTH_INTERVAL_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_upload_pause() -> u64 {
    DEFAULT_UPLOAD_PAUSE_MS
}

fn default_settle_interval() -> u64 {
    DEFAULT_SETTLE_INTERVAL_MS
}

impl WatchConfig {
    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WatcherError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WatcherError::config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, WatcherError> {
        let config: WatchConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no watcher can run without
    pub fn validate(&self) -> Result<(), WatcherError> {
        if self.watch_directory.as_os_str().is_empty() {
            return Err(WatcherError::config("watch_directory must not be empty"));
        }
        if self.api_endpoint.trim().is_empty() {
            return Err(WatcherError::config("api_endpoint must not be empty"));
        }
        if self.api_token.trim().is_empty() {
            return Err(WatcherError::config("api_token must not be empty"));
        }
        if self.health_interval == 0 {
            return Err(WatcherError::config("health_interval must be positive"));
        }
        Ok(())
    }

    pub fn cleanup_threshold(&self) -> Duration {
        Duration::from_secs(self.cleanup_threshold)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn upload_pause(&self) -> Duration {
        Duration::from_millis(self.upload_pause)
    }

    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_parsing_with_defaults() {
        let yaml = r#"
watch_directory: "/data/mt4/account"
api_endpoint: "http://localhost:8080/api/v1/account/import"
api_token: "token-123"
user: "trader@example.com"
"#;

        let config = WatchConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.watch_directory, PathBuf::from("/data/mt4/account"));
        assert_eq!(config.user_identifier, "trader@example.com");
        assert_eq!(config.cleanup_threshold(), Duration::from_secs(600_000));
        assert_eq!(config.health_endpoint, None);
        assert_eq!(config.health_interval(), Duration::from_secs(10_800));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.upload_pause(), Duration::from_millis(2_000));
        assert_eq!(config.settle_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_parsing_all_fields() {
        let yaml = r#"
watch_directory: "/data/mt4/prices"
api_endpoint: "http://localhost:8080/api/v1/market/import"
api_token: "token-123"
user_identifier: "trader"
cleanup_threshold: 60
health_endpoint: "http://localhost:8080/api/v1/system/acknowledge"
health_interval: 120
request_timeout: 5
upload_pause: 0
settle_interval: 250
"#;

        let config = WatchConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.user_identifier, "trader");
        assert_eq!(config.cleanup_threshold(), Duration::from_secs(60));
        assert_eq!(
            config.health_endpoint.as_deref(),
            Some("http://localhost:8080/api/v1/system/acknowledge")
        );
        assert_eq!(config.health_interval(), Duration::from_secs(120));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.upload_pause(), Duration::ZERO);
        assert_eq!(config.settle_interval(), Duration::from_millis(250));
    }

    #[rstest]
    #[case::empty_token(
        "watch_directory: /w\napi_endpoint: http://x\napi_token: ''\n",
        "api_token must not be empty"
    )]
    #[case::empty_endpoint(
        "watch_directory: /w\napi_endpoint: ' '\napi_token: t\n",
        "api_endpoint must not be empty"
    )]
    #[case::empty_directory(
        "watch_directory: ''\napi_endpoint: http://x\napi_token: t\n",
        "watch_directory must not be empty"
    )]
    #[case::zero_health_interval(
        "watch_directory: /w\napi_endpoint: http://x\napi_token: t\nhealth_interval: 0\n",
        "health_interval must be positive"
    )]
    fn test_config_validation_errors(#[case] yaml: &str, #[case] expected: &str) {
        let result = WatchConfig::from_yaml(yaml);
        assert_eq!(result, Err(WatcherError::config(expected)));
    }

    #[test]
    fn test_config_missing_required_key() {
        let result = WatchConfig::from_yaml("watch_directory: /w\n");
        assert!(matches!(result, Err(WatcherError::Config { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "watch_directory: /w\napi_endpoint: http://x\napi_token: t\nuser: u"
        )
        .unwrap();

        let config = WatchConfig::from_file(file.path()).unwrap();
        assert_eq!(config.user_identifier, "u");
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = WatchConfig::from_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(WatcherError::Config { ref message }) if message.contains("Failed to read config file")));
    }
}
