//! Typed accessors on [`crate::AusmashClient`], grouped by entity family.
//!
//! Accessors for list endpoints return a lazy [`crate::client::Paginator`];
//! nothing is requested until a page is pulled from it. Accessors that need
//! the whole list to post-process it (event results and matches, lookups by
//! short name) fetch every page before returning.

mod match_api;
mod player_api;
mod ranking_api;
mod reference_api;
mod result_api;
mod tournament_api;
