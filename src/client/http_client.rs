//! HTTP client creation and configuration utilities

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;

use crate::config::Config;
use crate::constants::{API_KEY_HEADER, HTTP_POOL_MAX_IDLE_PER_HOST};
use crate::error::AusmashError;

/// Creates the pooled HTTP client shared by every request of an
/// [`crate::AusmashClient`].
///
/// # Features
/// * Configurable request timeout
/// * Connection pooling
/// * `X-ApiKey`, `Accept` and `User-Agent` sent as default headers
pub fn create_http_client(config: &Config) -> Result<Client, AusmashError> {
    let mut api_key = HeaderValue::from_str(config.api_key()?).map_err(|_| {
        AusmashError::config_error("API key contains characters not allowed in an HTTP header")
    })?;
    api_key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, api_key);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("ausmash/", env!("CARGO_PKG_VERSION"))),
    );

    Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE_PER_HOST)
        .default_headers(headers)
        .build()
        .map_err(AusmashError::Http)
}
