use serde::{Deserialize, Serialize};

use super::character::Character;
use super::common::{Id, Resource};
use super::player::Player;

/// One published power ranking (or player showcase)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ranking {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    /// Name of the sequence, e.g. `NSW Power Rankings`
    #[serde(default)]
    pub sequence_name: Option<String>,
    #[serde(default)]
    pub sequence: Option<RankingSequence>,
    /// Edition within the sequence, e.g. `Sep-Dec 2022`
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub game_short: Option<String>,
    /// `None` for national rankings
    #[serde(default)]
    pub region_short: Option<String>,
    /// Where the ranking was announced
    #[serde(default)]
    pub link: Option<String>,
    /// HTML caption, often just the ranking graphic
    #[serde(default)]
    pub body: Option<String>,
    /// Only present on `/rankings/{id}`
    #[serde(rename = "Players", default)]
    pub ranks: Option<Vec<Rank>>,
    #[serde(rename = "APILink", default)]
    pub api_link: Option<String>,
}

impl Ranking {
    /// `<sequence name> <version>`
    pub fn display_name(&self) -> String {
        [self.sequence_name.as_deref(), self.version.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn find_player(&self, player: Id) -> Option<&Rank> {
        self.ranks
            .as_deref()?
            .iter()
            .find(|rank| rank.player.id == player)
    }

    /// Rankings that are not power rankings are usually player showcases
    pub fn is_probably_player_showcase(&self) -> bool {
        !self
            .sequence_name
            .as_deref()
            .is_some_and(|name| name.contains("Power Ranking"))
    }
}

impl Resource for Ranking {
    const BASE_PATH: &'static str = "rankings";

    fn id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn api_link(&self) -> Option<&str> {
        self.api_link.as_deref()
    }
}

/// A player's position on a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rank {
    pub rank: u32,
    pub player: Player,
    /// Tier label, if the ranking uses tiers
    #[serde(rename = "RankingScale", default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub characters: Option<Vec<Character>>,
}

/// A recurring ranking, e.g. a region's power rankings across seasons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RankingSequence {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default)]
    pub region_short: Option<String>,
    #[serde(default)]
    pub game_short: Option<String>,
}
