//! Configuration for the Databook client

use crate::error::{ApiError, Result};
use deckbot_utils::{env_override, load_json_if_exists};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default Databook API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.trydatabook.com";

const ENV_ENDPOINT: &str = "DATABOOK_ENDPOINT";
const ENV_EMAIL: &str = "DATABOOK_EMAIL";
const ENV_PASSWORD: &str = "DATABOOK_PASSWORD";

/// Configuration for the Databook client
#[derive(Clone)]
pub struct DatabookConfig {
    /// Base URL of the API
    pub endpoint: String,

    /// Login email
    pub email: String,

    /// Login password
    pub password: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Token refreshes allowed per request before giving up
    pub max_auth_retries: u32,
}

impl fmt::Debug for DatabookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabookConfig")
            .field("endpoint", &self.endpoint)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("max_auth_retries", &self.max_auth_retries)
            .finish()
    }
}

impl Default for DatabookConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            email: String::new(),
            password: String::new(),
            request_timeout: Duration::from_secs(30),
            max_auth_retries: 1,
        }
    }
}

/// On-disk shape of the config file
///
/// ```json
/// { "endpoint": "https://api.trydatabook.com",
///   "login": { "email": "analyst@example.com", "password": "secret" } }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    endpoint: Option<String>,
    login: Option<LoginSection>,
    request_timeout_secs: Option<u64>,
    max_auth_retries: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginSection {
    email: Option<String>,
    password: Option<String>,
}

impl DatabookConfig {
    /// Create a new configuration builder
    pub fn builder() -> DatabookConfigBuilder {
        DatabookConfigBuilder::default()
    }

    /// Load configuration from defaults, an optional JSON file and the environment
    ///
    /// Later sources override earlier ones. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(path) = path {
            builder = builder.with_file(path)?;
        }
        builder.with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| {
            ApiError::ConfigError(format!("endpoint '{}' is not a valid URL: {}", self.endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::ConfigError(format!(
                "endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.email.trim().is_empty() {
            return Err(ApiError::ConfigError(format!(
                "login email is required (config file or {ENV_EMAIL})"
            )));
        }

        if self.password.is_empty() {
            return Err(ApiError::ConfigError(format!(
                "login password is required (config file or {ENV_PASSWORD})"
            )));
        }

        Ok(())
    }
}

/// Builder for DatabookConfig
#[derive(Debug, Default)]
pub struct DatabookConfigBuilder {
    endpoint: Option<String>,
    email: Option<String>,
    password: Option<String>,
    request_timeout: Option<Duration>,
    max_auth_retries: Option<u32>,
}

impl DatabookConfigBuilder {
    /// Set the API endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set login credentials
    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.password = Some(password.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set how many times a request may refresh its token
    pub fn max_auth_retries(mut self, retries: u32) -> Self {
        self.max_auth_retries = Some(retries);
        self
    }

    /// Apply settings from a JSON config file if it exists
    pub fn with_file(mut self, path: &Path) -> Result<Self> {
        let Some(file) = load_json_if_exists::<ConfigFile>(path)? else {
            return Ok(self);
        };
        tracing::debug!("Loaded Databook settings from {}", path.display());

        if let Some(endpoint) = file.endpoint {
            self.endpoint = Some(endpoint);
        }
        if let Some(login) = file.login {
            if let Some(email) = login.email {
                self.email = Some(email);
            }
            if let Some(password) = login.password {
                self.password = Some(password);
            }
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(retries) = file.max_auth_retries {
            self.max_auth_retries = Some(retries);
        }
        Ok(self)
    }

    /// Apply `DATABOOK_ENDPOINT`, `DATABOOK_EMAIL` and `DATABOOK_PASSWORD`
    pub fn with_env(mut self) -> Self {
        if let Some(endpoint) = env_override(ENV_ENDPOINT) {
            self.endpoint = Some(endpoint);
        }
        if let Some(email) = env_override(ENV_EMAIL) {
            self.email = Some(email);
        }
        if let Some(password) = env_override(ENV_PASSWORD) {
            self.password = Some(password);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DatabookConfig> {
        let defaults = DatabookConfig::default();

        let config = DatabookConfig {
            endpoint: self.endpoint.unwrap_or(defaults.endpoint),
            email: self.email.unwrap_or(defaults.email),
            password: self.password.unwrap_or(defaults.password),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_auth_retries: self.max_auth_retries.unwrap_or(defaults.max_auth_retries),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, PoisonError};
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = DatabookConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.max_auth_retries, 1);
        // No credentials by default
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = DatabookConfig::builder()
            .endpoint("http://localhost:8080")
            .credentials("analyst@example.com", "secret")
            .request_timeout(Duration::from_secs(5))
            .max_auth_retries(2)
            .build()
            .unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_auth_retries, 2);
    }

    #[test]
    fn test_validation_bad_endpoint() {
        let result = DatabookConfig::builder()
            .endpoint("ftp://example.com")
            .credentials("a@b.c", "pw")
            .build();
        assert!(result.is_err());

        let result = DatabookConfig::builder()
            .endpoint("not a url")
            .credentials("a@b.c", "pw")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_missing_password() {
        let config = DatabookConfig {
            email: "a@b.c".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_with_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deckbot.json");
        fs::write(
            &path,
            r#"{
                "endpoint": "http://127.0.0.1:9000",
                "login": {"email": "file@example.com", "password": "from-file"},
                "request_timeout_secs": 7
            }"#,
        )
        .unwrap();

        let config = DatabookConfig::builder()
            .with_file(&path)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.endpoint, "http://127.0.0.1:9000");
        assert_eq!(config.email, "file@example.com");
        assert_eq!(config.password, "from-file");
        assert_eq!(config.request_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_with_missing_file_keeps_builder() {
        let dir = tempdir().unwrap();
        let config = DatabookConfig::builder()
            .credentials("a@b.c", "pw")
            .with_file(&dir.path().join("absent.json"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.email, "a@b.c");
    }

    /// Serialises tests that touch the `DATABOOK_*` variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_load_env_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempdir().unwrap();
        let path = dir.path().join("deckbot.json");
        fs::write(
            &path,
            r#"{
                "endpoint": "http://127.0.0.1:9000",
                "login": {"email": "file@example.com", "password": "from-file"}
            }"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var(ENV_EMAIL, "env@example.com");
            std::env::set_var(ENV_ENDPOINT, "http://localhost:7000");
            std::env::remove_var(ENV_PASSWORD);
        }

        let config = DatabookConfig::load(Some(&path));

        unsafe {
            std::env::remove_var(ENV_EMAIL);
            std::env::remove_var(ENV_ENDPOINT);
        }

        let config = config.unwrap();
        assert_eq!(config.email, "env@example.com");
        assert_eq!(config.endpoint, "http://localhost:7000");
        assert_eq!(config.password, "from-file");
    }

    #[test]
    fn test_load_blank_env_keeps_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempdir().unwrap();
        let path = dir.path().join("deckbot.json");
        fs::write(
            &path,
            r#"{"login": {"email": "file@example.com", "password": "from-file"}}"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var(ENV_EMAIL, "  ");
            std::env::remove_var(ENV_ENDPOINT);
            std::env::remove_var(ENV_PASSWORD);
        }

        let config = DatabookConfig::load(Some(&path));

        unsafe {
            std::env::remove_var(ENV_EMAIL);
        }

        let config = config.unwrap();
        assert_eq!(config.email, "file@example.com");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DatabookConfig {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
