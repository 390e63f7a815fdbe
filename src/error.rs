use thiserror::Error;

#[derive(Debug, Error)]
pub enum AusmashError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Rate limiting
    #[error("Client-side rate limit reached: {limit} requests per {period}")]
    RateLimited { limit: u32, period: String },

    #[error("API rate limit still exceeded after {attempts} attempts (URL: {url})")]
    RateLimitExhausted { url: String, attempts: u32 },

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AusmashError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error (502/503)
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a client-side rate limit error
    pub fn rate_limited(limit: u32, period: impl Into<String>) -> Self {
        Self::RateLimited {
            limit,
            period: period.into(),
        }
    }

    /// Create an error for a 429 that outlasted the retry budget
    pub fn rate_limit_exhausted(url: impl Into<String>, attempts: u32) -> Self {
        Self::RateLimitExhausted {
            url: url.into(),
            attempts,
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Maps a non-success HTTP status to the matching API error
    pub fn from_status(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        match status {
            404 => Self::api_not_found(url),
            429 => Self::rate_limit_exhausted(url, 1),
            502 | 503 => Self::api_service_unavailable(status, message, url),
            400..=499 => Self::api_client_error(status, message, url),
            _ => Self::api_server_error(status, message, url),
        }
    }

    /// Check if error is retryable (network issues, server errors)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AusmashError::NetworkTimeout { .. }
                | AusmashError::NetworkConnection { .. }
                | AusmashError::ApiServerError { .. }
                | AusmashError::ApiServiceUnavailable { .. }
        )
    }

    /// Check if the payload from the API failed to decode into the expected shape
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AusmashError::ApiMalformedJson { .. }
                | AusmashError::ApiUnexpectedStructure { .. }
                | AusmashError::ApiNoData { .. }
                | AusmashError::Parse(_)
        )
    }

    /// Check if error indicates the requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, AusmashError::ApiNotFound { .. })
    }

    /// HTTP status code associated with this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AusmashError::ApiNotFound { .. } => Some(404),
            AusmashError::RateLimitExhausted { .. } => Some(429),
            AusmashError::ApiClientError { status, .. }
            | AusmashError::ApiServerError { status, .. }
            | AusmashError::ApiServiceUnavailable { status, .. } => Some(*status),
            AusmashError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
