use serde::{Deserialize, Serialize};

use super::character::Character;
use super::common::Id;
use super::event::Event;
use super::player::Player;
use super::tournament::Tournament;

/// Round name of a grand finals set; the second set after a bracket reset is `GF2`
pub const GRAND_FINALS: &str = "GF";
pub const GRAND_FINALS_RESET: &str = "GF2";

/// A single set between two entrants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Match {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    /// Short round name within the event, e.g. `W1`, `L3`, `GF`
    #[serde(rename = "MatchName")]
    pub round_name: String,
    /// `None` when the winner is not in the database, or for doubles
    #[serde(default)]
    pub winner: Option<Player>,
    #[serde(default)]
    pub loser: Option<Player>,
    /// Filled in even when `winner` is not; may be a team name for doubles
    #[serde(default)]
    pub winner_name: Option<String>,
    #[serde(default)]
    pub loser_name: Option<String>,
    #[serde(default)]
    pub team_winner1: Option<Player>,
    #[serde(default)]
    pub team_winner2: Option<Player>,
    #[serde(default)]
    pub team_loser1: Option<Player>,
    #[serde(default)]
    pub team_loser2: Option<Player>,
    #[serde(rename = "Tourney", default)]
    pub tournament: Option<Tournament>,
    #[serde(default)]
    pub event: Option<Event>,
    /// Round robin pool number
    #[serde(default)]
    pub pool: Option<u32>,
    #[serde(default)]
    pub score_wins: Option<u32>,
    #[serde(default)]
    pub score_losses: Option<u32>,
    #[serde(default)]
    pub winner_characters: Option<Vec<Character>>,
    #[serde(default)]
    pub loser_characters: Option<Vec<Character>>,
    #[serde(default)]
    pub elo_winner_old_score: Option<i32>,
    #[serde(default)]
    pub elo_loser_old_score: Option<i32>,
    #[serde(default)]
    pub elo_winner_new_score: Option<i32>,
    #[serde(default)]
    pub elo_loser_new_score: Option<i32>,
    #[serde(default)]
    pub elo_movement: Option<i32>,
}

impl Match {
    /// Games in the set, when the score was recorded
    pub fn game_count(&self) -> Option<u32> {
        Some(self.score_wins? + self.score_losses?)
    }

    /// Round number parsed from the round name (`W3` -> 3)
    pub fn round_number(&self) -> Option<u32> {
        self.round_name.get(1..)?.parse().ok()
    }

    pub fn is_grand_finals(&self) -> bool {
        self.round_name == GRAND_FINALS || self.round_name == GRAND_FINALS_RESET
    }

    /// Every tagged player in the set, singles or doubles
    pub fn players(&self) -> Vec<&Player> {
        [
            &self.winner,
            &self.loser,
            &self.team_winner1,
            &self.team_winner2,
            &self.team_loser1,
            &self.team_loser2,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Marks the first of two leading `GF` sets as the bracket reset.
///
/// Matches arrive newest first, so when grand finals went to a reset the first
/// two records are both `GF` and the first one is really `GF2`.
pub fn mark_bracket_reset(matches: &mut [Match]) {
    if let [first, second, ..] = matches
        && first.round_name == GRAND_FINALS
        && second.round_name == GRAND_FINALS
    {
        first.round_name = GRAND_FINALS_RESET.to_string();
    }
}
