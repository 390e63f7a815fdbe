use serde::{Deserialize, Serialize};

use super::game::Game;
use super::player::Player;

/// One player's TrueSkill in one game, the rating used for doubles.
///
/// Skill is modelled as a normal distribution around `mean`. International
/// players get a rating once they team with an Australian or NZ player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrueSkill {
    pub player: Player,
    pub game: Game,
    /// Perceived skill (µ); `None` when not calculated yet
    #[serde(default)]
    pub mean: Option<i32>,
    /// σ of the distribution
    #[serde(rename = "StandardDeviation", default)]
    pub std_dev: Option<i32>,
    /// Skill the player is 99% likely to exceed, `mean - 3σ - 1`
    #[serde(default)]
    pub conservative_rating: Option<i32>,
}

impl TrueSkill {
    pub fn is_calculated(&self) -> bool {
        self.mean.is_some() && self.std_dev.is_some()
    }

    /// Range within three standard deviations of the mean
    pub fn likely_range(&self) -> Option<(i32, i32)> {
        let (mean, std_dev) = (self.mean?, self.std_dev?);
        Some((mean - 3 * std_dev, mean + 3 * std_dev))
    }
}
