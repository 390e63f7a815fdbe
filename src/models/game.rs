use serde::{Deserialize, Serialize};

use super::common::{Id, Resource};

/// A game in the Smash series, e.g. `SSBM` for Melee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Game {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: Option<Id>,
    pub short: String,
    /// Full title, e.g. `Super Smash Bros. Melee`
    #[serde(alias = "name", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
    /// Logo URL
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(rename = "APILink", default)]
    pub api_link: Option<String>,
}

impl Game {
    /// Name without the "Super Smash Bros." prefix: `Melee`, `Ultimate`, `64`, `Smash 4`
    pub fn informal_name(&self) -> &str {
        let Some(full) = self.name.as_deref() else {
            return &self.short;
        };
        match full {
            "Super Smash Bros." => "64",
            "Super Smash Bros. for Wii U" => "Smash 4",
            "Super Smash Bros. for Nintendo 3DS" => "3DS",
            _ => full.strip_prefix("Super Smash Bros. ").unwrap_or(full),
        }
    }
}

impl Resource for Game {
    const BASE_PATH: &'static str = "games";
    const LIST_PATH: &'static str = "pocket/games";

    fn id(&self) -> Option<Id> {
        self.id
    }

    fn api_link(&self) -> Option<&str> {
        self.api_link.as_deref()
    }

    fn short_name(&self) -> Option<&str> {
        Some(&self.short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: Option<&str>) -> Game {
        Game {
            id: Some(Id(1)),
            short: "SSBX".to_string(),
            name: name.map(str::to_string),
            sort_order: None,
            image_url: None,
            api_link: None,
        }
    }

    #[test]
    fn test_game_fixture() {
        let json = r#"{"ID":3,"Short":"SSBU","Name":"Super Smash Bros. Ultimate","SortOrder":1,"ImageUrl":"https://img/ssbu.png","APILink":"https://api.ausmash.com.au/games/3"}"#;
        let game: Game = serde_json::from_str(json).unwrap();
        assert_eq!(game.id(), Some(Id(3)));
        assert_eq!(game.short, "SSBU");
        assert_eq!(game.sort_order, Some(1));
        assert_eq!(game.image_url.as_deref(), Some("https://img/ssbu.png"));
        assert_eq!(game.informal_name(), "Ultimate");
    }

    #[test]
    fn test_informal_names() {
        assert_eq!(game(Some("Super Smash Bros.")).informal_name(), "64");
        assert_eq!(game(Some("Super Smash Bros. for Wii U")).informal_name(), "Smash 4");
        assert_eq!(game(Some("Super Smash Bros. for Nintendo 3DS")).informal_name(), "3DS");
        assert_eq!(game(Some("Super Smash Bros. Melee")).informal_name(), "Melee");
        assert_eq!(game(Some("Rivals of Aether")).informal_name(), "Rivals of Aether");
        assert_eq!(game(None).informal_name(), "SSBX");
    }

    #[test]
    fn test_missing_short_is_an_error() {
        assert!(serde_json::from_str::<Game>(r#"{"ID":3}"#).is_err());
    }
}
