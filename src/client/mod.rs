//! Transport layer: authenticated HTTP, rate limiting, caching and pagination

pub mod cache;
pub mod fetch_utils;
pub mod http_client;
pub mod pagination;
pub mod rate_limiter;
pub mod urls;

pub use cache::{CachedResponse, ResponseCache};
pub use fetch_utils::RawResponse;
pub use http_client::*;
pub use pagination::Paginator;
pub use rate_limiter::{RateLimiter, WaitReason};
pub use urls::*;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AusmashError;
use crate::models::{Id, Resource};

/// Client for the Ausmash API.
///
/// Owns the pooled HTTP client, the response cache and the rate limiter, so
/// every request made through one client shares the same quota. Wrap it in an
/// `Arc` to share it between tasks. While the quota is exhausted every task
/// waits for the reset, but none of them holds the limiter while it sleeps.
#[derive(Debug)]
pub struct AusmashClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: Config,
    pub(crate) cache: ResponseCache,
    pub(crate) limiter: Mutex<RateLimiter>,
}

impl AusmashClient {
    /// Validates the configuration and builds the client.
    ///
    /// # Errors
    /// [`AusmashError::Config`] if the API key is missing or any setting is invalid.
    pub fn new(mut config: Config) -> Result<Self, AusmashError> {
        config.validate()?;

        let http = create_http_client(&config)?;
        let capacity = NonZeroUsize::new(config.cache_capacity)
            .ok_or_else(|| AusmashError::config_error("Cache capacity cannot be zero"))?;
        let cache = ResponseCache::new(capacity, config.cache_ttl_seconds);
        let limiter = Mutex::new(RateLimiter::new(&config));

        info!(
            "Ausmash client ready: endpoint={}, cache_ttl={}s",
            config.endpoint, config.cache_ttl_seconds
        );

        Ok(Self {
            http,
            config,
            cache,
            limiter,
        })
    }

    /// Builds a client from the config file and `AUSMASH_*` environment variables
    pub async fn from_default_config() -> Result<Self, AusmashError> {
        Self::new(Config::load().await?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full URL for an API path (or an absolute link) with query parameters
    pub fn url(&self, path: &str, params: &[(&str, String)]) -> Result<String, AusmashError> {
        with_query(&build_url(&self.config.endpoint, path), params)
    }

    /// GETs a path relative to the endpoint and decodes the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, AusmashError> {
        let url = self.url(path, params)?;
        self.fetch(&url).await
    }

    /// POSTs a JSON body to a path relative to the endpoint
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AusmashError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path, &[])?;
        self.post(&url, body).await
    }

    /// Lazy paginator over a list endpoint. Nothing is fetched until the first page is requested.
    pub fn paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Paginator<'_, T>, AusmashError> {
        Ok(Paginator::new(self, self.url(path, params)?))
    }

    /// Fetches any resource by ID from `/{BASE_PATH}/{id}`
    pub async fn fetch_resource<R: Resource>(&self, id: Id) -> Result<R, AusmashError> {
        self.get_json(&format!("{}/{}", R::BASE_PATH, id), &[]).await
    }

    /// Fetches the full version of a resource that was embedded in another response.
    ///
    /// Embedded records often carry only an ID and name; this follows their
    /// `APILink` when present, otherwise looks the resource up by ID. Regions
    /// and games embedded by short name only are found in the full list.
    pub async fn complete<R: Resource>(&self, partial: &R) -> Result<R, AusmashError> {
        if let Some(link) = partial.api_link() {
            return self.get_json(link, &[]).await;
        }
        if let Some(id) = partial.id() {
            return self.fetch_resource(id).await;
        }
        match partial.short_name() {
            Some(short) => self.find_by_short(short).await,
            None => Err(AusmashError::api_unexpected_structure(
                "Record has no ID, APILink or short name to look it up by",
                build_url(&self.config.endpoint, R::BASE_PATH),
            )),
        }
    }

    /// Finds a record in `R::LIST_PATH` by short name, case-insensitively.
    ///
    /// # Errors
    /// [`AusmashError::ApiNotFound`] if no record has that short name.
    pub async fn find_by_short<R: Resource>(&self, short: &str) -> Result<R, AusmashError> {
        let all = self.paginate::<R>(R::LIST_PATH, &[])?.collect_all().await?;
        all.into_iter()
            .find(|record| {
                record
                    .short_name()
                    .is_some_and(|name| name.eq_ignore_ascii_case(short))
            })
            .ok_or_else(|| {
                warn!("No {} record with short name {short}", R::BASE_PATH);
                AusmashError::api_not_found(format!(
                    "{}?short={short}",
                    build_url(&self.config.endpoint, R::LIST_PATH)
                ))
            })
    }

    /// Number of cached responses
    pub async fn cache_len(&self) -> usize {
        self.cache.len().await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}
