use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::common::{Id, optional_date};
use super::event::{Event, rounds_from_victory};
use super::player::Player;
use super::tournament::Tournament;

/// A placing at an event, from `events/{id}/results` or `players/{id}/results`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventResult {
    /// Always filled in, even for entrants not in the database
    pub player_name: String,
    /// Numeric placing, 1 for the winner
    #[serde(rename = "Result")]
    pub placing: u32,
    /// `None` when the entrant is not in the database
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(rename = "Tourney", default)]
    pub tournament: Option<Tournament>,
    #[serde(default)]
    pub event: Option<Event>,
    #[serde(default)]
    pub pool: Option<u32>,
    #[serde(default)]
    pub characters: Option<Vec<Character>>,
    /// Only known when the results were fetched for the whole event
    #[serde(default)]
    pub entrants: Option<u32>,
}

impl EventResult {
    /// How many rounds above the lowest possible placing this result is.
    ///
    /// Grows with both placing and entrant count, which makes results from
    /// events of different sizes comparable. `None` without an entrant count.
    pub fn rounds_cleared(&self) -> Option<u32> {
        self.entrants
            .map(|entrants| rounds_from_victory(entrants).saturating_sub(rounds_from_victory(self.placing)))
    }

    /// `(placing, entrants)`
    pub fn as_pair(&self) -> Option<(u32, u32)> {
        self.entrants.map(|entrants| (self.placing, entrants))
    }
}

/// Condensed singles result from `pocket/player/results/{player}/{game}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PocketResult {
    #[serde(rename = "TourneyID")]
    pub tournament_id: Id,
    #[serde(rename = "TourneyName")]
    pub tournament_name: String,
    #[serde(rename = "EventID")]
    pub event_id: Id,
    pub event_name: String,
    /// Tournament and event name joined together
    #[serde(default)]
    pub full_name: Option<String>,
    /// Placing with its ordinal suffix, e.g. `3rd`
    pub place: String,
    pub entrants: u32,
    #[serde(default)]
    pub region_short: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub date: Option<NaiveDate>,
    /// Characters carry `ImageUrl` only, not the full character record
    #[serde(default)]
    pub characters: Option<Vec<Character>>,
}

impl PocketResult {
    /// Numeric placing parsed from [`place`](Self::place); `None` if it is not `<n>st/nd/rd/th`
    pub fn placing(&self) -> Option<u32> {
        let place = self.place.trim();
        let digits = place.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        if digits.len() == place.len() {
            return None;
        }
        digits.parse().ok()
    }

    pub fn rounds_cleared(&self) -> Option<u32> {
        let placing = self.placing()?;
        Some(rounds_from_victory(self.entrants).saturating_sub(rounds_from_victory(placing)))
    }
}

/// Both players' placings at an event they both entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommonResult {
    pub event: Event,
    pub player1_result: u32,
    pub player2_result: u32,
}

impl CommonResult {
    /// Whether the first player placed higher; `None` on a tie
    pub fn player1_placed_higher(&self) -> Option<bool> {
        match self.player1_result.cmp(&self.player2_result) {
            std::cmp::Ordering::Less => Some(true),
            std::cmp::Ordering::Greater => Some(false),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Body of `compare/{game}/{player1}/{player2}/results`
#[derive(Debug, Deserialize)]
pub(crate) struct CommonResults {
    #[serde(rename = "Results", default)]
    pub results: Vec<CommonResult>,
}
