use crate::constants::{self, env_vars};
use crate::error::AusmashError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub mod paths;
pub mod validation;

use paths::get_config_path;
use validation::validate_config;

/// Client configuration.
///
/// Built once and handed to [`crate::AusmashClient::new`], which validates it
/// before any request is made.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Key sent in the `X-ApiKey` header. Required.
    #[serde(alias = "ausmash_api_key", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the API, without trailing slash.
    pub endpoint: String,
    /// HTTP timeout in seconds for API requests.
    pub http_timeout_seconds: u64,
    /// Lifetime of cached GET responses in seconds. 0 disables the cache.
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached responses.
    pub cache_capacity: usize,
    /// Sleep until a full client-side rate limit window ends instead of failing.
    pub sleep_on_rate_limit: bool,
    /// Retries after the first attempt for transient failures and 429s.
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries.
    pub retry_base_delay_ms: u64,
    /// Response header carrying the remaining request quota.
    pub rate_limit_remaining_header: String,
    /// Response header carrying the quota reset time.
    pub rate_limit_reset_header: String,
    /// Path to the log file. If not specified, logs go to the platform log directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            endpoint: constants::DEFAULT_ENDPOINT.to_string(),
            http_timeout_seconds: constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
            cache_ttl_seconds: constants::cache_ttl::DEFAULT_SECONDS,
            cache_capacity: constants::DEFAULT_CACHE_CAPACITY,
            sleep_on_rate_limit: true,
            max_retries: constants::retry::MAX_RETRIES,
            retry_base_delay_ms: constants::retry::BASE_DELAY_MS,
            rate_limit_remaining_header: constants::rate_limit::REMAINING_HEADER.to_string(),
            rate_limit_reset_header: constants::rate_limit::RESET_HEADER.to_string(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Default configuration with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Config {
            api_key: Some(api_key.into()),
            ..Config::default()
        }
    }

    /// Loads configuration from the default config file location, if it exists,
    /// then applies environment overrides and validates the result.
    ///
    /// # Environment Variables
    /// - `AUSMASH_API_KEY` - API key
    /// - `AUSMASH_ENDPOINT` - Override API endpoint
    /// - `AUSMASH_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `AUSMASH_CACHE_TTL` - Override cache TTL in seconds
    /// - `AUSMASH_SLEEP_ON_RATE_LIMIT` - `true`/`false`
    /// - `AUSMASH_LOG_FILE` - Override log file path
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AusmashError)` - Config file unreadable or configuration invalid
    pub async fn load() -> Result<Self, AusmashError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            debug!("Loading configuration from {config_path}");
            Self::load_from_path(&config_path).await?
        } else {
            debug!("No config file at {config_path}, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from defaults and environment variables only.
    pub fn from_env() -> Result<Self, AusmashError> {
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file without applying environment overrides
    /// or validation.
    pub async fn load_from_path(path: &str) -> Result<Self, AusmashError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overrides fields with any `AUSMASH_*` environment variables that are set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var(env_vars::API_KEY) {
            self.api_key = Some(api_key);
        }

        if let Ok(endpoint) = std::env::var(env_vars::ENDPOINT) {
            self.endpoint = endpoint;
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Some(ttl) = std::env::var(env_vars::CACHE_TTL)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.cache_ttl_seconds = ttl;
        }

        if let Some(sleep) = std::env::var(env_vars::SLEEP_ON_RATE_LIMIT)
            .ok()
            .and_then(|s| s.trim().to_ascii_lowercase().parse::<bool>().ok())
        {
            self.sleep_on_rate_limit = sleep;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }
    }

    /// Validates the configuration settings and normalises the endpoint.
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(AusmashError::Config)` - Configuration validation failed
    pub fn validate(&mut self) -> Result<(), AusmashError> {
        self.endpoint = self.endpoint.trim().trim_end_matches('/').to_string();
        validate_config(self)
    }

    /// API key, once the configuration has been validated
    pub fn api_key(&self) -> Result<&str, AusmashError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AusmashError::config_error(format!(
                    "Missing API key: set {} or the ausmash_api_key config field",
                    env_vars::API_KEY
                ))
            })
    }

    /// Config file consulted by [`Config::load`]
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Default directory for the log written by [`crate::logging::init_logging`]
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            for var in [
                env_vars::API_KEY,
                env_vars::ENDPOINT,
                env_vars::HTTP_TIMEOUT,
                env_vars::CACHE_TTL,
                env_vars::SLEEP_ON_RATE_LIMIT,
                env_vars::LOG_FILE,
            ] {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_key, None);
        assert_eq!(config.endpoint, "https://api.ausmash.com.au");
        assert_eq!(config.http_timeout_seconds, 30);
        assert_eq!(config.cache_ttl_seconds, 172_800);
        assert!(config.sleep_on_rate_limit);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.rate_limit_remaining_header, "X-RateLimit-Remaining");
        assert_eq!(config.rate_limit_reset_header, "X-RateLimit-Reset");
    }

    #[tokio::test]
    async fn test_load_from_path_with_alias() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_content = r#"
ausmash_api_key = "secret"
endpoint = "https://api.example.com/"
cache_ttl_seconds = 60
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let mut config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.cache_ttl_seconds, 60);
        // Unspecified fields keep their defaults
        assert_eq!(config.http_timeout_seconds, 30);

        config.validate().unwrap();
        assert_eq!(config.endpoint, "https://api.example.com");
    }

    #[tokio::test]
    async fn test_load_from_path_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "api_key = [").await.unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result, Err(AusmashError::TomlDeserialize(_))));
    }

    #[tokio::test]
    async fn test_load_from_missing_path() {
        let result = Config::load_from_path("/definitely/not/here/config.toml").await;
        assert!(matches!(result, Err(AusmashError::Io(_))));
    }

    #[test]
    fn test_validate_requires_api_key() {
        let mut config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AusmashError::Config(_)));
        assert!(err.to_string().contains("Missing API key"));

        let mut config = Config::with_api_key("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        // SAFETY: serialized test
        unsafe {
            std::env::set_var(env_vars::API_KEY, "env-key");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "5");
            std::env::set_var(env_vars::SLEEP_ON_RATE_LIMIT, "FALSE");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.http_timeout_seconds, 5);
        assert!(!config.sleep_on_rate_limit);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_without_key_fails() {
        clear_env();
        let result = Config::from_env();
        assert!(matches!(result, Err(AusmashError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides_ignore_unparsable_numbers() {
        clear_env();
        // SAFETY: serialized test
        unsafe {
            std::env::set_var(env_vars::CACHE_TTL, "forever");
        }

        let mut config = Config::with_api_key("k");
        config.apply_env_overrides();
        assert_eq!(config.cache_ttl_seconds, constants::cache_ttl::DEFAULT_SECONDS);

        clear_env();
    }
}
