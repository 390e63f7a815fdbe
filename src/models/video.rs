use serde::{Deserialize, Serialize};

use super::common::{Id, Resource};
use super::matches::Match;

/// A recorded video of one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Video {
    /// Videos have IDs but no endpoint of their own
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    /// Watch link (YouTube)
    pub url: String,
    #[serde(rename = "Match")]
    pub game_match: Match,
}

/// A YouTube channel that match videos were uploaded to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Channel {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Owning player, if the channel is registered to one
    #[serde(rename = "PlayerID", default)]
    pub player_id: Option<Id>,
    #[serde(default)]
    pub video_count: Option<u32>,
    /// Only present on `/channels/{id}`
    #[serde(default)]
    pub videos: Option<Vec<Video>>,
    #[serde(rename = "APILink", default)]
    pub api_link: Option<String>,
}

impl Resource for Channel {
    const BASE_PATH: &'static str = "channels";

    fn id(&self) -> Option<Id> {
        Some(self.id)
    }

    fn api_link(&self) -> Option<&str> {
        self.api_link.as_deref()
    }
}
