use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{Id, Resource, optional_date};
use super::event::Event;
use super::region::Region;
use crate::client::DateRange;

/// A tournament. Lists only carry summary fields; `/tourneys/{id}` adds the
/// region, series and events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tournament {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_date")]
    pub tourney_date: Option<NaiveDate>,
    #[serde(default)]
    pub region_short: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub is_major: Option<bool>,
    #[serde(default)]
    pub series: Option<TournamentSeries>,
    /// In the order they appear in the admin page, earliest first
    #[serde(default)]
    pub events: Option<Vec<Event>>,
    #[serde(rename = "APILink", default)]
    pub api_link: Option<String>,
}

impl Tournament {
    /// Whether the tournament date falls in the range. Undated tournaments never match.
    pub fn is_within(&self, range: &DateRange) -> bool {
        self.tourney_date.is_some_and(|date| range.contains(date))
    }

    /// Short name of the region, from either the summary or the full record
    pub fn region_short(&self) -> Option<&str> {
        self.region_short
            .as_deref()
            .or_else(|| self.region.as_ref().map(|r| r.short.as_str()))
    }

    /// start.gg tournament slug, taken from the first event imported from start.gg
    pub fn start_gg_slug(&self) -> Option<&str> {
        self.events
            .as_deref()?
            .iter()
            .filter_map(|event| event.source_url.as_deref())
            .find_map(|url| {
                let (_, rest) = url.split_once("start.gg/tournament/")?;
                rest.split('/').next().filter(|slug| !slug.is_empty())
            })
    }
}

impl Resource for Tournament {
    const BASE_PATH: &'static str = "tourneys";

    fn id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn api_link(&self) -> Option<&str> {
        self.api_link.as_deref()
    }
}

/// A recurring series of tournaments, e.g. a weekly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TournamentSeries {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default)]
    pub region_short: Option<String>,
    /// City where the series is normally held
    #[serde(default)]
    pub city: Option<String>,
}
