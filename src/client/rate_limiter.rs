//! Request gating from server quota headers and client-side request windows

use http::HeaderMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::rate_limit::{EPOCH_THRESHOLD, MAX_BLOCK_SECONDS, WINDOWS};
use crate::error::AusmashError;

/// Fixed window counting requests sent within `period`
#[derive(Debug, Clone)]
struct RequestWindow {
    limit: u32,
    period: Duration,
    count: u32,
    started: Option<Instant>,
}

impl RequestWindow {
    fn new(limit: u32, period: Duration) -> Self {
        Self {
            limit,
            period,
            count: 0,
            started: None,
        }
    }

    fn is_current(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < self.period)
    }

    /// Time until this window frees up, if it is full
    fn delay(&self, now: Instant) -> Option<Duration> {
        let started = self.started?;
        if self.is_current(now) && self.count >= self.limit {
            Some((started + self.period).saturating_duration_since(now))
        } else {
            None
        }
    }

    fn record(&mut self, now: Instant) {
        if !self.is_current(now) {
            self.started = Some(now);
            self.count = 0;
        }
        self.count += 1;
    }

    fn period_name(&self) -> String {
        match self.period.as_secs() {
            1 => "second".to_string(),
            60 => "minute".to_string(),
            3600 => "hour".to_string(),
            secs => format!("{secs} seconds"),
        }
    }
}

/// Why the limiter is holding back the next request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitReason {
    /// The server reported an exhausted quota or asked us to back off
    ServerQuota,
    /// A client-side request window is full
    Window { limit: u32, period: String },
}

/// Gates outgoing requests.
///
/// Two independent checks run before every request:
/// * the server quota, learned from the configured remaining/reset headers
///   (and `Retry-After` on 429s), which blocks until the reported reset time;
/// * fixed client-side windows (200/s, 5000/min, 300000/h).
#[derive(Debug)]
pub struct RateLimiter {
    windows: Vec<RequestWindow>,
    blocked_until: Option<Instant>,
    sleep_on_limit: bool,
    remaining_header: String,
    reset_header: String,
}

impl RateLimiter {
    pub fn new(config: &Config) -> Self {
        Self::with_windows(
            config,
            WINDOWS
                .iter()
                .map(|&(limit, secs)| (limit, Duration::from_secs(secs)))
                .collect(),
        )
    }

    /// Limiter with custom client-side windows
    pub fn with_windows(config: &Config, windows: Vec<(u32, Duration)>) -> Self {
        Self {
            windows: windows
                .into_iter()
                .map(|(limit, period)| RequestWindow::new(limit, period))
                .collect(),
            blocked_until: None,
            sleep_on_limit: config.sleep_on_rate_limit,
            remaining_header: config.rate_limit_remaining_header.clone(),
            reset_header: config.rate_limit_reset_header.clone(),
        }
    }

    /// How long the next request must wait at `now`, and why. `None` means it may go.
    pub fn delay_required(&self, now: Instant) -> Option<(Duration, WaitReason)> {
        if let Some(until) = self.blocked_until
            && until > now
        {
            return Some((until - now, WaitReason::ServerQuota));
        }

        self.windows
            .iter()
            .filter_map(|window| {
                window.delay(now).map(|delay| {
                    (
                        delay,
                        WaitReason::Window {
                            limit: window.limit,
                            period: window.period_name(),
                        },
                    )
                })
            })
            .max_by_key(|(delay, _)| *delay)
    }

    /// Counts a request sent at `now`
    pub fn record_request(&mut self, now: Instant) {
        if self.blocked_until.is_some_and(|until| until <= now) {
            self.blocked_until = None;
        }
        for window in &mut self.windows {
            window.record(now);
        }
    }

    /// Counts a request at `now` if one may be sent, otherwise returns how long
    /// to wait before asking again.
    ///
    /// Server-imposed waits are always returned. A full client-side window is
    /// returned only when `sleep_on_rate_limit` is set, otherwise
    /// [`AusmashError::RateLimited`] is returned and nothing may be sent. The
    /// caller sleeps without holding the limiter, so other requests can still
    /// report quota headers meanwhile.
    pub fn try_acquire(&mut self, now: Instant) -> Result<Option<Duration>, AusmashError> {
        let Some((delay, reason)) = self.delay_required(now) else {
            self.record_request(now);
            return Ok(None);
        };

        match reason {
            WaitReason::ServerQuota => {
                warn!("API quota exhausted, sleeping {:?} until reset", delay);
            }
            WaitReason::Window { limit, period } => {
                if !self.sleep_on_limit {
                    return Err(AusmashError::rate_limited(limit, period));
                }
                warn!(
                    "Reached {} requests per {}, sleeping {:?} to avoid the rate limit",
                    limit, period, delay
                );
            }
        }
        Ok(Some(delay))
    }

    /// Blocks all requests until `until` (never shortens an existing block)
    pub fn block_until(&mut self, until: Instant) {
        if self.blocked_until.is_none_or(|current| current < until) {
            self.blocked_until = Some(until);
        }
    }

    /// Blocks all requests for `wait` from `now`, clamped to `MAX_BLOCK_SECONDS`
    pub fn block_for(&mut self, now: Instant, wait: Duration) {
        let wait = wait.min(Duration::from_secs(MAX_BLOCK_SECONDS));
        match now.checked_add(wait) {
            Some(until) => self.block_until(until),
            None => warn!("Ignoring server block of {:?}, too far in the future", wait),
        }
    }

    /// Learns the server quota from response headers.
    ///
    /// Remaining `0` with a reset in the future blocks until that reset. A
    /// positive remaining quota lifts any earlier server block.
    pub fn update_from_headers(&mut self, headers: &HeaderMap, now: Instant, now_epoch: i64) {
        let remaining = header_number(headers, &self.remaining_header);
        let reset = header_number(headers, &self.reset_header);

        match (remaining, reset) {
            (Some(remaining), _) if remaining > 0 => {
                if self.blocked_until.take().is_some() {
                    debug!("Server quota replenished ({remaining} remaining), lifting block");
                }
            }
            (Some(_), Some(reset)) => {
                let wait_secs = if reset >= EPOCH_THRESHOLD {
                    reset.saturating_sub(now_epoch)
                } else {
                    reset
                };
                if wait_secs > 0 {
                    let wait = capped_wait(wait_secs.unsigned_abs());
                    debug!("Server quota exhausted, blocking for {:?}", wait);
                    self.block_for(now, wait);
                }
            }
            (Some(_), None) => {
                debug!("Server quota exhausted but no reset header, relying on retry backoff");
            }
            _ => {}
        }
    }

    /// Whether a server-imposed block is active at `now`
    pub fn is_blocked(&self, now: Instant) -> bool {
        self.blocked_until.is_some_and(|until| until > now)
    }
}

/// Parses an integer header value, tolerating fractional seconds
fn header_number(headers: &HeaderMap, name: &str) -> Option<i64> {
    let value = headers.get(name)?.to_str().ok()?.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().map(|f| f.ceil() as i64))
}

/// Parses a `Retry-After` header given in seconds, clamped to `MAX_BLOCK_SECONDS`
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(http::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(capped_wait)
}

fn capped_wait(secs: u64) -> Duration {
    if secs > MAX_BLOCK_SECONDS {
        warn!("Server asked for a {secs}s wait, clamping to {MAX_BLOCK_SECONDS}s");
    }
    Duration::from_secs(secs.min(MAX_BLOCK_SECONDS))
}
