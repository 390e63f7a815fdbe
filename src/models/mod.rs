//! Typed records returned by the Ausmash API.
//!
//! Field names follow the remote PascalCase JSON. Required fields are plain
//! values and fail decoding when missing; everything else is optional, since
//! records embedded in other responses are usually partial.

pub mod character;
pub mod common;
pub mod elo;
pub mod event;
pub mod game;
pub mod matches;
pub mod player;
pub mod ranking;
pub mod region;
pub mod result;
pub mod tournament;
pub mod trueskill;
pub mod video;

pub use character::Character;
pub use common::{Id, Resource};
pub use elo::{Elo, EloBadge, EloListing, probability_of_winning};
pub use event::{BracketStyle, Event, EventType, possible_placings, rounds_from_victory};
pub use game::Game;
pub use matches::{Match, mark_bracket_reset};
pub use player::{Player, WinRate, WinRateComparison};
pub use ranking::{Rank, Ranking, RankingSequence};
pub use region::Region;
pub use result::{CommonResult, EventResult, PocketResult};
pub use tournament::{Tournament, TournamentSeries};
pub use trueskill::TrueSkill;
pub use video::{Channel, Video};
