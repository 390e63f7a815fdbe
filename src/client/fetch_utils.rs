//! Rate-limited HTTP fetching with caching, retry logic, and error mapping

use chrono::Utc;
use rand::Rng;
use reqwest::header::LINK;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use super::AusmashClient;
use super::rate_limiter::retry_after;
use super::urls::parse_link_next;
use crate::constants::MAX_ERROR_BODY_CHARS;
use crate::constants::retry::JITTER_FRACTION;
use crate::error::AusmashError;

/// Undecoded body of a successful response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub body: String,
    /// Target of the `Link: rel="next"` header, if any
    pub next_link: Option<String>,
    pub from_cache: bool,
}

/// How far a request may be retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retry {
    /// GET: timeouts, connection failures, 429s and 5xx responses
    Idempotent,
    /// POST: only 429s and connection failures, where the server never saw the request
    Unsafe,
}

impl AusmashClient {
    /// GETs a URL through the cache and the rate limiter, without decoding it.
    #[instrument(skip(self))]
    pub(crate) async fn fetch_raw(&self, url: &str) -> Result<RawResponse, AusmashError> {
        if let Some(cached) = self.cache.get(url).await {
            debug!("Using cached response for URL: {url}");
            return Ok(RawResponse {
                body: cached.body,
                next_link: cached.next_link,
                from_cache: true,
            });
        }

        info!("Fetching data from URL: {url}");
        let response = self
            .send_with_retries(url, || self.http.get(url), Retry::Idempotent)
            .await?;

        let next_link = response
            .headers()
            .get(LINK)
            .and_then(|h| h.to_str().ok())
            .and_then(parse_link_next);

        let body = read_body(response, url).await?;
        debug!("Response length: {} bytes", body.len());

        Ok(RawResponse {
            body,
            next_link,
            from_cache: false,
        })
    }

    /// GETs a URL and decodes it into `T`.
    ///
    /// Only responses that decode successfully are cached, so a payload that
    /// failed validation is fetched again next time.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, AusmashError> {
        let raw = self.fetch_raw(url).await?;
        let parsed = decode::<T>(&raw.body, url)?;
        if !raw.from_cache {
            self.cache.put(url, raw.body, raw.next_link).await;
        }
        Ok(parsed)
    }

    /// POSTs a JSON body and decodes the response. Never cached.
    #[instrument(skip(self, body))]
    pub(crate) async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, AusmashError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        info!("Posting to URL: {url}");
        let response = self
            .send_with_retries(url, || self.http.post(url).json(body), Retry::Unsafe)
            .await?;
        let text = read_body(response, url).await?;
        decode(&text, url)
    }

    /// Sends a request built by `build`, gated by the rate limiter, retrying
    /// transient failures with exponential backoff.
    async fn send_with_retries<F>(
        &self,
        url: &str,
        build: F,
        retry: Retry,
    ) -> Result<Response, AusmashError>
    where
        F: Fn() -> RequestBuilder,
    {
        let max_retries = self.config.max_retries;
        let mut attempt = 0u32;

        loop {
            self.acquire_slot().await?;

            let response = match build().send().await {
                Ok(response) => response,
                Err(e) => {
                    let retryable = e.is_connect() || (e.is_timeout() && retry == Retry::Idempotent);
                    if retryable && attempt < max_retries {
                        let wait = self.backoff_delay(attempt);
                        warn!(
                            "Request error {} for {}. Retrying in {:?} (attempt {}/{})",
                            e,
                            url,
                            wait,
                            attempt + 1,
                            max_retries
                        );
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                        continue;
                    }
                    error!("Request failed for URL {}: {}", url, e);
                    return Err(if e.is_timeout() {
                        AusmashError::network_timeout(url)
                    } else if e.is_connect() {
                        AusmashError::network_connection(url, e.to_string())
                    } else {
                        AusmashError::Http(e)
                    });
                }
            };

            let status = response.status();
            debug!("Response status: {status}");
            self.observe_quota(&response, status).await;

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt >= max_retries {
                    error!("Still rate limited after {} attempts: {}", attempt + 1, url);
                    return Err(AusmashError::rate_limit_exhausted(url, attempt + 1));
                }
                // The next acquire_slot sleeps until reset; without
                // quota headers fall back to plain backoff.
                if !self.limiter.lock().await.is_blocked(Instant::now()) {
                    tokio::time::sleep(self.backoff_delay(attempt)).await;
                }
                warn!(
                    "Rate limited by {}. Retrying (attempt {}/{})",
                    url,
                    attempt + 1,
                    max_retries
                );
                attempt += 1;
                continue;
            }

            if status.is_server_error() && retry == Retry::Idempotent && attempt < max_retries {
                let wait = self.backoff_delay(attempt);
                warn!(
                    "Transient {} from {}. Retrying in {:?} (attempt {}/{})",
                    status,
                    url,
                    wait,
                    attempt + 1,
                    max_retries
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = error_message(&body, status);
                error!("HTTP {} - {} (URL: {})", status.as_u16(), message, url);
                return Err(AusmashError::from_status(status.as_u16(), message, url));
            }

            return Ok(response);
        }
    }

    /// Waits until the rate limiter lets a request through.
    ///
    /// The limiter is locked only to take the decision; the sleep happens
    /// with the lock released.
    async fn acquire_slot(&self) -> Result<(), AusmashError> {
        loop {
            let wait = self.limiter.lock().await.try_acquire(Instant::now())?;
            match wait {
                Some(wait) => tokio::time::sleep(wait).await,
                None => return Ok(()),
            }
        }
    }

    /// Feeds quota headers (and `Retry-After` on 429s) into the rate limiter
    async fn observe_quota(&self, response: &Response, status: StatusCode) {
        let now = Instant::now();
        let mut limiter = self.limiter.lock().await;
        limiter.update_from_headers(response.headers(), now, Utc::now().timestamp());
        if status == StatusCode::TOO_MANY_REQUESTS
            && let Some(wait) = retry_after(response.headers())
        {
            debug!("Server asked to retry after {:?}", wait);
            limiter.block_for(now, wait);
        }
    }

    /// Exponential backoff from the configured base delay, with random jitter
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self
            .config
            .retry_base_delay_ms
            .saturating_mul(1u64 << attempt.min(16));
        let jitter = rand::rng().random_range(0.0..=JITTER_FRACTION);
        Duration::from_millis(base.saturating_add((base as f64 * jitter) as u64))
    }
}

async fn read_body(response: Response, url: &str) -> Result<String, AusmashError> {
    response.text().await.map_err(|e| {
        error!("Failed to read response text from URL {}: {}", url, e);
        if e.is_timeout() {
            AusmashError::network_timeout(url)
        } else {
            AusmashError::Http(e)
        }
    })
}

/// Decodes a response body, classifying failures as validation errors
pub(crate) fn decode<T: DeserializeOwned>(body: &str, url: &str) -> Result<T, AusmashError> {
    serde_json::from_str::<T>(body).map_err(|e| {
        error!("Failed to parse API response: {} (URL: {})", e, url);
        let trimmed = body.trim_start();
        if trimmed.is_empty() {
            AusmashError::api_no_data("Response body is empty", url)
        } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
            AusmashError::api_malformed_json("Response is not valid JSON", url)
        } else if e.is_syntax() || e.is_eof() {
            AusmashError::api_malformed_json(e.to_string(), url)
        } else {
            AusmashError::api_unexpected_structure(e.to_string(), url)
        }
    })
}

/// Error message for a failed response: the body if there is one, else the status reason
fn error_message(body: &str, status: StatusCode) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status.canonical_reason().unwrap_or("Unknown error").to_string();
    }
    let mut message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        message.push_str("...");
    }
    message
}
