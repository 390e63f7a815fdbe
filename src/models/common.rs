use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Numeric identifier of any Ausmash record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub u64);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id(value)
    }
}

/// A record that can be fetched on its own from `/{BASE_PATH}/{id}`.
///
/// Records embedded in other responses are usually partial; pass them to
/// [`crate::AusmashClient::complete`] to fetch the full version.
pub trait Resource: DeserializeOwned {
    const BASE_PATH: &'static str;

    /// Endpoint listing every record, searched for records that only carry a short name
    const LIST_PATH: &'static str = Self::BASE_PATH;

    /// `None` for records embedded by short name only
    fn id(&self) -> Option<Id>;

    /// Absolute link to the full record, when the API included one
    fn api_link(&self) -> Option<&str>;

    /// Short name (`NSW`, `SSBM`) for record types that have one
    fn short_name(&self) -> Option<&str> {
        None
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| value.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// Deserializes `"2023-02-19"` or `"2023-02-19T00:00:00"` into a date
pub(crate) fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_date(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{value}'")))
}

/// Like [`date`], for nullable fields; an empty string counts as null
pub(crate) fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse_date(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{value}'"))),
    }
}

/// Parses a `#RRGGBB` colour string into its components
pub(crate) fn hex_colour(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
    if hex.len() < 6 || !hex.is_char_boundary(6) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
