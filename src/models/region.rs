use serde::{Deserialize, Serialize};

use super::common::{Id, Resource, hex_colour};

/// A region (state, country, or international catch-all)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Region {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: Option<Id>,
    /// Short name such as `NSW` or `NZ`
    pub short: String,
    #[serde(alias = "name", default)]
    pub name: Option<String>,
    /// `#RRGGBB` colour associated with the region
    #[serde(default)]
    pub colour: Option<String>,
    /// Cities with a competitive scene in this region
    #[serde(default)]
    pub cities: Option<Vec<String>>,
    #[serde(rename = "APILink", default)]
    pub api_link: Option<String>,
}

impl Region {
    /// Regions outside Australia/NZ have no cities, since tournaments are never
    /// uploaded for them. Unknown when the cities were not included.
    pub fn is_international(&self) -> Option<bool> {
        self.cities.as_ref().map(Vec::is_empty)
    }

    pub fn colour_rgb(&self) -> Option<(u8, u8, u8)> {
        self.colour.as_deref().and_then(hex_colour)
    }
}

impl Resource for Region {
    const BASE_PATH: &'static str = "regions";

    /// Regions embedded by short name only have no ID
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
