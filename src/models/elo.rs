use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::common::{Id, optional_date};
use super::game::Game;
use super::player::Player;

/// Elo tier badges, each with the minimum peak Elo required for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EloBadge {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
    Elite,
}

impl EloBadge {
    pub const ALL: [EloBadge; 8] = [
        EloBadge::Bronze,
        EloBadge::Silver,
        EloBadge::Gold,
        EloBadge::Platinum,
        EloBadge::Diamond,
        EloBadge::Master,
        EloBadge::Grandmaster,
        EloBadge::Elite,
    ];

    pub fn minimum(self) -> i32 {
        match self {
            EloBadge::Bronze => 1000,
            EloBadge::Silver => 1200,
            EloBadge::Gold => 1400,
            EloBadge::Platinum => 1600,
            EloBadge::Diamond => 1800,
            EloBadge::Master => 2000,
            EloBadge::Grandmaster => 2500,
            EloBadge::Elite => 3000,
        }
    }

    /// Highest badge whose minimum is at or below `elo`; Bronze below that
    pub fn for_elo(elo: i32) -> EloBadge {
        Self::ALL
            .into_iter()
            .rev()
            .find(|badge| elo >= badge.minimum())
            .unwrap_or(EloBadge::Bronze)
    }
}

/// Chance that a player rated `player_elo` beats one rated `opponent_elo`
pub fn probability_of_winning(player_elo: i32, opponent_elo: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(opponent_elo - player_elo) / 400.0))
}

/// One player's weekly Elo for one game. Only players from Australia/NZ have Elo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Elo {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: Option<Id>,
    pub elo: i32,
    pub player: Player,
    pub game: Game,
    /// Last week's Elo; `None` for players added last week
    #[serde(rename = "EloPrevious", default)]
    pub previous: Option<i32>,
    /// Rank within the player's region, `None` when inactive
    #[serde(default)]
    pub rank_local: Option<u32>,
    #[serde(default)]
    pub rank_national: Option<u32>,
    #[serde(rename = "EloMovement", default)]
    pub movement: Option<i32>,
    #[serde(default)]
    pub peak_elo: Option<i32>,
    /// `None` if the player never rose above the starting Elo
    #[serde(default, deserialize_with = "optional_date")]
    pub peak_date: Option<NaiveDate>,
    /// Date of the player's last event that affected Elo
    #[serde(default, deserialize_with = "optional_date")]
    pub last_active: Option<NaiveDate>,
}

impl Elo {
    /// Peak Elo, ignoring the starting value reported for players who never peaked
    pub fn peak(&self) -> Option<i32> {
        self.peak_date.and(self.peak_elo)
    }

    /// Badge tier earned by peak Elo
    pub fn badge(&self) -> EloBadge {
        self.peak().map_or(EloBadge::Bronze, EloBadge::for_elo)
    }

    /// Active means attended a tournament within the 3 calendar months before `today`
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.last_active.is_some_and(|last| {
            let months = (today.year() - last.year()) * 12 + today.month() as i32 - last.month() as i32;
            months < 3
        })
    }

    /// Chance of beating another player, by current Elo
    pub fn probability_of_beating(&self, other: &Elo) -> f64 {
        probability_of_winning(self.elo, other.elo)
    }
}

/// One game's leaderboard in the `/elo` index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EloListing {
    /// Absolute link to the game's Elo list
    #[serde(rename = "APILink")]
    pub api_link: String,
    #[serde(rename = "GameID", default)]
    pub game_id: Option<Id>,
    #[serde(default)]
    pub game: Option<Game>,
    #[serde(default)]
    pub player_count: Option<u32>,
}
