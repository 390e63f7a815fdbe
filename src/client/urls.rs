//! URL building utilities for API endpoints

use chrono::NaiveDate;

use crate::error::AusmashError;

/// Builds a full request URL from the API endpoint and a path fragment.
///
/// Absolute `http(s)://` URLs (such as the `APILink` field embedded in
/// responses) are returned unchanged; fragments are joined to the endpoint with
/// exactly one slash.
///
/// # Example
/// ```
/// use ausmash::client::build_url;
///
/// assert_eq!(
///     build_url("https://api.ausmash.com.au", "players/123"),
///     "https://api.ausmash.com.au/players/123"
/// );
/// assert_eq!(
///     build_url("https://api.ausmash.com.au", "/players/123"),
///     "https://api.ausmash.com.au/players/123"
/// );
/// ```
pub fn build_url(endpoint: &str, path_or_url: &str) -> String {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        return path_or_url.to_string();
    }
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path_or_url.trim_start_matches('/')
    )
}

/// Builds a URL from path segments, percent-encoding each one.
///
/// Used where a path contains free text such as a player's name.
pub fn segment_url(endpoint: &str, segments: &[&str]) -> Result<String, AusmashError> {
    let mut url =
        reqwest::Url::parse(endpoint).map_err(|e| AusmashError::invalid_url(endpoint, e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| AusmashError::invalid_url(endpoint, "URL cannot have a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

/// Appends query parameters to a URL.
///
/// The returned string is both the request URL and the response cache key, so
/// the same path and parameters always produce the same string.
pub fn with_query(url: &str, params: &[(&str, String)]) -> Result<String, AusmashError> {
    if params.is_empty() {
        return Ok(url.to_string());
    }
    reqwest::Url::parse_with_params(url, params)
        .map(String::from)
        .map_err(|e| AusmashError::invalid_url(url, e.to_string()))
}

/// Extracts the `rel="next"` target from an RFC 8288 `Link` header value
pub fn parse_link_next(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param.eq_ignore_ascii_case("rel=\"next\"") || param.eq_ignore_ascii_case("rel=next")
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// Optional inclusive date window passed as `startDate`/`endDate` query parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// No restriction in either direction
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn until(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Whether a date falls inside this window (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// Query parameters for this window, omitting open ends
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = self.start {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        params
    }
}
