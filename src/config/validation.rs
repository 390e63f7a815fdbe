use super::Config;
use crate::error::AusmashError;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API key must be present and not blank
/// - Endpoint must be an http(s) URL
/// - HTTP timeout and cache capacity must be non-zero
/// - Rate limit header names cannot be empty
/// - If log file path is provided, it cannot be empty
pub fn validate_config(config: &Config) -> Result<(), AusmashError> {
    config.api_key()?;

    if config.endpoint.is_empty() {
        return Err(AusmashError::config_error("API endpoint cannot be empty"));
    }

    if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
        return Err(AusmashError::config_error(format!(
            "API endpoint must start with http:// or https://, got '{}'",
            config.endpoint
        )));
    }

    if reqwest::Url::parse(&config.endpoint).is_err() {
        return Err(AusmashError::config_error(format!(
            "API endpoint is not a valid URL: '{}'",
            config.endpoint
        )));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AusmashError::config_error(
            "HTTP timeout must be at least one second",
        ));
    }

    if config.cache_capacity == 0 {
        return Err(AusmashError::config_error("Cache capacity cannot be zero"));
    }

    if config.rate_limit_remaining_header.trim().is_empty()
        || config.rate_limit_reset_header.trim().is_empty()
    {
        return Err(AusmashError::config_error(
            "Rate limit header names cannot be empty",
        ));
    }

    if let Some(log_path) = &config.log_file_path
        && log_path.trim().is_empty()
    {
        return Err(AusmashError::config_error("Log file path cannot be empty"));
    }

    Ok(())
}
