//! Typed async client for the Ausmash API
//!
//! Ausmash tracks Australian and New Zealand Smash Bros. tournaments, results,
//! rankings and Elo. This library wraps its REST API: requests are
//! authenticated, throttled to the server's quota, cached, and paged
//! transparently, and responses are decoded into typed models.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ausmash::{AusmashClient, AusmashError, Config};
//! use ausmash::client::DateRange;
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AusmashError> {
//!     // Reads AUSMASH_API_KEY and the optional config file
//!     let client = AusmashClient::new(Config::load().await?)?;
//!
//!     let player = client.find_player("NSW", "Jim").await?;
//!     println!("{}", player.display_name());
//!
//!     // Pages are fetched only as the stream is consumed
//!     let mut results = std::pin::pin!(client
//!         .player_results(player.id, DateRange::all())?
//!         .into_stream());
//!     while let Some(result) = results.try_next().await? {
//!         println!("{} at {:?}", result.placing, result.tournament.map(|t| t.name));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types for convenience
pub use client::{AusmashClient, DateRange, Paginator};
pub use config::Config;
pub use error::AusmashError;
pub use models::{Id, Resource};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
