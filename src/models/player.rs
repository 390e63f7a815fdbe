use serde::{Deserialize, Serialize};

use super::common::{Id, Resource};

/// A player, from `/players/{id}` or embedded in other records.
///
/// Embedded players usually carry only `ID`, `Name` and `RegionShort`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default)]
    pub region_short: Option<String>,
    #[serde(rename = "RegionID", default)]
    pub region_id: Option<Id>,
    #[serde(rename = "APILink", default)]
    pub api_link: Option<String>,
    #[serde(default)]
    pub personal_url: Option<String>,
    #[serde(default)]
    pub twitch_url: Option<String>,
    #[serde(rename = "YouTubeUrl", default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(rename = "SSBWorldUrl", default)]
    pub ssbworld_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub tournament_count: Option<u32>,
    #[serde(default)]
    pub match_count: Option<u32>,
    #[serde(default)]
    pub result_count: Option<u32>,
    #[serde(default)]
    pub video_count: Option<u32>,
    /// start.gg player ID, usable with the start.gg API
    #[serde(rename = "SmashGGPlayerID", default)]
    pub smashgg_player_id: Option<u64>,
}

impl Player {
    /// `[REG] Name`, or just the name when the region is unknown
    pub fn display_name(&self) -> String {
        match self.region_short.as_deref().filter(|r| !r.is_empty()) {
            Some(region) => format!("[{region}] {}", self.name),
            None => self.name.clone(),
        }
    }
}

impl Resource for Player {
    const BASE_PATH: &'static str = "players";

    fn id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn api_link(&self) -> Option<&str> {
        self.api_link.as_deref()
    }
}

/// Wins against one opponent in one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WinRate {
    pub opponent: Player,
    /// The opponent's Elo in this game
    #[serde(default)]
    pub elo: Option<i32>,
    pub wins: u32,
    pub losses: u32,
    pub total: u32,
}

impl WinRate {
    /// Share of sets won, `0.0` if none were played
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.total)
        }
    }
}

/// Win rates of two players against the opponents they have in common
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRateComparison {
    #[serde(rename = "Player1WinRates")]
    pub player1: Vec<WinRate>,
    #[serde(rename = "Player2WinRates")]
    pub player2: Vec<WinRate>,
}
