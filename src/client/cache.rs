//! Per-client LRU cache of successful GET responses

use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::constants::cache_ttl::{ELO_SECONDS, REFERENCE_DATA_SECONDS};

/// A cached response body together with the pagination link it arrived with
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: String,
    pub next_link: Option<String>,
    pub cached_at: Instant,
    pub ttl_seconds: u64,
}

impl CachedResponse {
    pub fn new(body: String, next_link: Option<String>, ttl_seconds: u64) -> Self {
        Self {
            body,
            next_link,
            cached_at: Instant::now(),
            ttl_seconds,
        }
    }

    /// Checks if the cached data is expired
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= Duration::from_secs(self.ttl_seconds)
    }
}

/// Response cache keyed by the full request URL, query string included
#[derive(Debug)]
pub struct ResponseCache {
    entries: RwLock<LruCache<String, CachedResponse>>,
    default_ttl: u64,
}

impl ResponseCache {
    pub fn new(capacity: NonZeroUsize, default_ttl: u64) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            default_ttl,
        }
    }

    /// Whether responses are cached at all
    pub fn is_enabled(&self) -> bool {
        self.default_ttl > 0
    }

    /// TTL for a URL.
    ///
    /// Game, region and character lists and lookups almost never change and
    /// are kept for at least 30 days; the results, matches and videos under
    /// them use the default. Elo is recalculated weekly so it never outlives
    /// 7 days.
    pub fn ttl_for_url(&self, url: &str) -> u64 {
        if self.default_ttl == 0 {
            return 0;
        }
        let segments: Vec<&str> = url_path(url)
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        if segments.contains(&"elo") {
            self.default_ttl.min(ELO_SECONDS)
        } else if is_reference_data(&segments) {
            self.default_ttl.max(REFERENCE_DATA_SECONDS)
        } else {
            self.default_ttl
        }
    }

    /// Stores a response, unless caching is disabled
    #[instrument(skip(self, body, next_link))]
    pub async fn put(&self, url: &str, body: String, next_link: Option<String>) {
        let ttl = self.ttl_for_url(url);
        if ttl == 0 {
            return;
        }
        debug!(
            "Caching response: url={}, data_size={}, ttl={}s",
            url,
            body.len(),
            ttl
        );
        self.entries
            .write()
            .await
            .put(url.to_string(), CachedResponse::new(body, next_link, ttl));
    }

    /// Returns the cached response if present and fresh, evicting it if expired
    pub async fn get(&self, url: &str) -> Option<CachedResponse> {
        let mut entries = self.entries.write().await;
        match entries.get(url) {
            Some(entry) if !entry.is_expired() => {
                debug!("Cache hit: url={}, age={:?}", url, entry.cached_at.elapsed());
                Some(entry.clone())
            }
            Some(_) => {
                debug!("Removing expired cache entry: url={url}");
                entries.pop(url);
                None
            }
            None => None,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.entries.read().await.cap().get()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// `games`, `games/{id}`, `regions`, `regions/{id}`, `characters/{id}`,
/// `characters/bygame/{id}`, `pocket/games` and `pocket/characters`
fn is_reference_data(segments: &[&str]) -> bool {
    matches!(
        segments,
        ["games" | "regions" | "characters"]
            | ["games" | "regions" | "characters", _]
            | ["characters", "bygame", _]
            | ["pocket", "games" | "characters"]
    )
}

/// Path of a URL without scheme, host or query, e.g. `games/3`
fn url_path(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme
        .split_once('/')
        .map_or("", |(_, path)| path);
    path.split(['?', '#']).next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(ttl: u64) -> ResponseCache {
        ResponseCache::new(NonZeroUsize::new(4).unwrap(), ttl)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let cache = cache(60);
        cache
            .put("https://api.ausmash.com.au/players/1", "{}".into(), None)
            .await;

        let hit = cache.get("https://api.ausmash.com.au/players/1").await.unwrap();
        assert_eq!(hit.body, "{}");
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("https://api.ausmash.com.au/players/2").await.is_none());
    }

    #[tokio::test]
    async fn test_query_string_is_part_of_key() {
        let cache = cache(60);
        cache
            .put("https://h/players/search?q=a", "[1]".into(), None)
            .await;
        assert!(cache.get("https://h/players/search?q=b").await.is_none());
        assert!(cache.get("https://h/players/search?q=a").await.is_some());
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let cache = cache(0);
        assert!(!cache.is_enabled());
        cache.put("https://h/regions", "[]".into(), None).await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let cache = cache(60);
        for i in 0..5 {
            cache.put(&format!("https://h/players/{i}"), "{}".into(), None).await;
        }
        assert_eq!(cache.len().await, 4);
        assert_eq!(cache.capacity().await, 4);
        assert!(cache.get("https://h/players/0").await.is_none());

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[test]
    fn test_expiry() {
        let mut entry = CachedResponse::new("{}".into(), None, 10);
        assert!(!entry.is_expired());
        entry.ttl_seconds = 0;
        assert!(entry.is_expired());
    }

    #[test]
    fn test_ttl_for_url() {
        let cache = cache(3600);
        assert_eq!(cache.ttl_for_url("https://h/games/3"), REFERENCE_DATA_SECONDS);
        assert_eq!(cache.ttl_for_url("https://h/pocket/games"), REFERENCE_DATA_SECONDS);
        assert_eq!(
            cache.ttl_for_url("https://h/characters/bygame/3"),
            REFERENCE_DATA_SECONDS
        );
        assert_eq!(cache.ttl_for_url("https://h/elo/game/3?region=NSW"), 3600);
        assert_eq!(cache.ttl_for_url("https://h/players/1"), 3600);
        assert_eq!(cache.ttl_for_url("https://h/players/1/elo"), 3600);
        assert_eq!(cache.ttl_for_url("https://h/characters/7/results"), 3600);
        assert_eq!(cache.ttl_for_url("https://h/characters/7"), REFERENCE_DATA_SECONDS);
        assert_eq!(cache.ttl_for_url("https://h/regions/"), REFERENCE_DATA_SECONDS);
        assert_eq!(cache.ttl_for_url("https://h/regions/2"), REFERENCE_DATA_SECONDS);
    }

    #[test]
    fn test_ttl_for_data_under_reference_paths() {
        let cache = cache(3600);
        assert_eq!(cache.ttl_for_url("https://h/characters/7/matches"), 3600);
        assert_eq!(cache.ttl_for_url("https://h/characters/7/videos"), 3600);
        assert_eq!(cache.ttl_for_url("https://h/characters/7/matcheswins"), 3600);
        assert_eq!(cache.ttl_for_url("https://h/games/1/results"), 3600);
        assert_eq!(cache.ttl_for_url("https://h/pocket/player/results/77/1"), 3600);

        let long = ResponseCache::new(NonZeroUsize::new(1).unwrap(), 10 * ELO_SECONDS);
        assert_eq!(long.ttl_for_url("https://h/elo/game/3"), ELO_SECONDS);
    }

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("https://h:8080/games/3?x=1"), "games/3");
        assert_eq!(url_path("https://h"), "");
    }
}
