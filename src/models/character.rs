use serde::{Deserialize, Serialize};

use super::common::{Id, Resource, hex_colour};

/// A playable character in one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Character {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default)]
    pub game_short: Option<String>,
    #[serde(rename = "GameID", default)]
    pub game_id: Option<Id>,
    #[serde(default)]
    pub colour: Option<String>,
    /// Main image; `IconUrl` is the stock icon
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Character select screen portrait
    #[serde(default)]
    pub css_url: Option<String>,
    #[serde(default)]
    pub match_count: Option<u32>,
    #[serde(default)]
    pub result_count: Option<u32>,
    #[serde(default)]
    pub player_count: Option<u32>,
    #[serde(rename = "APILink", default)]
    pub api_link: Option<String>,
}

impl Character {
    pub fn colour_rgb(&self) -> Option<(u8, u8, u8)> {
        self.colour.as_deref().and_then(hex_colour)
    }
}

impl Resource for Character {
    const BASE_PATH: &'static str = "characters";

    fn id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn api_link(&self) -> Option<&str> {
        self.api_link.as_deref()
    }
}
