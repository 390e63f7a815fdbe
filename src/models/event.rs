use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::common::Id;
use super::game::Game;

static REDEMPTION_BRACKET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:amateur|ammies|redemption|redemmies|ammys|no cigar)\b").unwrap()
});

static SIDE_BRACKET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:mega smash|squad strike)\b").unwrap()
});

/// Every placing a double elimination bracket can produce: 1, 2, 3, 4, 5, 7, 9, 13, 17, 25, ...
static POSSIBLE_PLACINGS: LazyLock<Vec<u32>> = LazyLock::new(|| {
    let mut placings = vec![1, 2];
    for size in (1..16).map(|n| 1u32 << n) {
        placings.push(size + 1);
        placings.push(size + size / 2 + 1);
    }
    placings
});

pub fn possible_placings() -> &'static [u32] {
    &POSSIBLE_PLACINGS
}

/// Normalises a placing (or seed) so each possible placing is one more than the
/// one above it. The winner is 0, second 1, third 2, fourth 3, fifth 4, seventh 5.
pub fn rounds_from_victory(placing: u32) -> u32 {
    POSSIBLE_PLACINGS.partition_point(|&p| p < placing) as u32
}

/// Bracket format of an event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BracketStyle {
    RoundRobin,
    Swiss,
    SingleElimination,
    DoubleElimination,
    Other(String),
}

impl From<String> for BracketStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Round robin" => BracketStyle::RoundRobin,
            "Swiss" => BracketStyle::Swiss,
            "Single elimination" => BracketStyle::SingleElimination,
            "Double elimination" => BracketStyle::DoubleElimination,
            _ => BracketStyle::Other(value),
        }
    }
}

impl From<BracketStyle> for String {
    fn from(value: BracketStyle) -> Self {
        value.to_string()
    }
}

impl fmt::Display for BracketStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketStyle::RoundRobin => write!(f, "Round robin"),
            BracketStyle::Swiss => write!(f, "Swiss"),
            BracketStyle::SingleElimination => write!(f, "Single elimination"),
            BracketStyle::DoubleElimination => write!(f, "Double elimination"),
            BracketStyle::Other(other) => write!(f, "{other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Singles,
    Teams,
    Other(String),
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Singles" => EventType::Singles,
            "Teams" => EventType::Teams,
            _ => EventType::Other(value),
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Singles => "Singles".to_string(),
            EventType::Teams => "Teams".to_string(),
            EventType::Other(other) => other,
        }
    }
}

/// One event at a tournament: a phase, side bracket, redemption bracket, etc.
///
/// Events are only listed inside a full tournament; their ID is used to look up
/// results, matches and videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    #[serde(rename = "ID", alias = "id")]
    pub id: Id,
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default)]
    pub bracket_style: Option<BracketStyle>,
    #[serde(default)]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub game: Option<Game>,
    /// start.gg or Challonge page this event was imported from
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(rename = "APILink", default)]
    pub api_link: Option<String>,
}

impl Event {
    /// Redemption/amateur bracket, judged by name since nothing else marks it
    pub fn is_redemption_bracket(&self) -> bool {
        REDEMPTION_BRACKET.is_match(&self.name)
    }

    /// Presumably not the main bracket of the tournament
    pub fn is_side_bracket(&self) -> bool {
        SIDE_BRACKET.is_match(&self.name)
    }
}
