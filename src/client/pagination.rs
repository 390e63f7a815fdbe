//! Lazy, restartable iteration over paged list endpoints

use futures::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::marker::PhantomData;
use tracing::{debug, warn};

use super::AusmashClient;
use super::fetch_utils::decode;
use super::urls::build_url;
use crate::error::AusmashError;

const ITEM_KEYS: [&str; 2] = ["Items", "items"];
const NEXT_KEYS: [&str; 3] = ["Next", "NextPage", "next"];

/// One decoded page and the link to the page after it, if the body carried one
#[derive(Debug)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// Decodes a page body.
///
/// A bare JSON array is a complete, final page. An object is an envelope
/// holding the records under `Items` and the next page link under `Next`.
pub(crate) fn parse_page<T: DeserializeOwned>(body: &str, url: &str) -> Result<Page<T>, AusmashError> {
    let value: Value = decode(body, url)?;
    let (items, next) = match value {
        Value::Array(_) => (value, None),
        Value::Object(mut map) => {
            let items = ITEM_KEYS
                .iter()
                .find_map(|key| map.remove(*key))
                .ok_or_else(|| {
                    AusmashError::api_unexpected_structure(
                        "Paged response has neither a list nor an Items field",
                        url,
                    )
                })?;
            let next = NEXT_KEYS
                .iter()
                .find_map(|key| map.remove(*key))
                .and_then(|v| v.as_str().map(str::to_string))
                .filter(|s| !s.is_empty());
            (items, next)
        }
        _ => {
            return Err(AusmashError::api_unexpected_structure(
                "Expected a list or a paged object",
                url,
            ));
        }
    };

    let items = serde_json::from_value::<Vec<T>>(items)
        .map_err(|e| AusmashError::api_unexpected_structure(e.to_string(), url))?;
    Ok(Page { items, next })
}

/// Lazily walks a paged list endpoint, in server order.
///
/// The cursor moves only once a page has been fetched and decoded, so after an
/// error the same page is requested again by the next call to
/// [`Paginator::next_page`].
pub struct Paginator<'a, T> {
    client: &'a AusmashClient,
    next_url: Option<String>,
    visited: HashSet<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> Paginator<'a, T> {
    pub(crate) fn new(client: &'a AusmashClient, url: String) -> Self {
        Self {
            client,
            next_url: Some(url),
            visited: HashSet::new(),
            _marker: PhantomData,
        }
    }

    /// URL of the page the next call will request, `None` once exhausted
    pub fn current_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_url.is_none()
    }

    /// Fetches the next page. `Ok(None)` once every page has been returned.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, AusmashError> {
        let Some(url) = self.next_url.clone() else {
            return Ok(None);
        };

        let raw = self.client.fetch_raw(&url).await?;
        let page = parse_page::<T>(&raw.body, &url)?;
        let next = page
            .next
            .or_else(|| raw.next_link.clone())
            .map(|link| build_url(&self.client.config.endpoint, &link));

        if !raw.from_cache {
            self.client.cache.put(&url, raw.body, raw.next_link).await;
        }

        debug!("Fetched page of {} items from {}", page.items.len(), url);
        self.visited.insert(url);
        self.next_url = match next {
            Some(next) if self.visited.contains(&next) => {
                warn!("Next page link {} was already visited, stopping", next);
                None
            }
            other => other,
        };

        Ok(Some(page.items))
    }

    /// Every remaining record, pages concatenated in server order
    pub async fn collect_all(mut self) -> Result<Vec<T>, AusmashError> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }

    /// Record-by-record stream that fetches pages only as they are consumed.
    ///
    /// The stream ends after yielding the first error; use
    /// [`Paginator::next_page`] directly to retry a failed page.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, AusmashError>> + 'a
    where
        T: 'a,
    {
        futures::stream::try_unfold(
            (self, VecDeque::new()),
            |(mut pager, mut buffer)| async move {
                loop {
                    if let Some(item) = buffer.pop_front() {
                        return Ok(Some((item, (pager, buffer))));
                    }
                    match pager.next_page().await {
                        Ok(Some(page)) => buffer.extend(page),
                        Ok(None) => return Ok(None),
                        Err(e) => return Err(e),
                    }
                }
            },
        )
    }
}
