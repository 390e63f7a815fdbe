// Event placings

use tracing::{debug, instrument};

use crate::client::{AusmashClient, DateRange, Paginator};
use crate::error::AusmashError;
use crate::models::{EventResult, Id, PocketResult};

impl AusmashClient {
    /// All placings at an event, each with `entrants` set to the event size
    #[instrument(skip(self))]
    pub async fn event_results(&self, event: Id) -> Result<Vec<EventResult>, AusmashError> {
        let mut results = self
            .paginate::<EventResult>(&format!("events/{event}/results"), &[])?
            .collect_all()
            .await?;

        let entrants = results.len() as u32;
        debug!("Event {event} had {entrants} entrants");
        for result in &mut results {
            result.entrants = Some(entrants);
        }
        Ok(results)
    }

    /// A player's results, newest first
    pub fn player_results(
        &self,
        player: Id,
        range: DateRange,
    ) -> Result<Paginator<'_, EventResult>, AusmashError> {
        self.paginate(&format!("players/{player}/results"), &range.to_params())
    }

    /// Condensed singles results of a player in one game
    pub fn pocket_results(&self, player: Id, game: Id) -> Result<Paginator<'_, PocketResult>, AusmashError> {
        self.paginate(&format!("pocket/player/results/{player}/{game}"), &[])
    }

    /// Results entered as using a character, newest first
    pub fn character_results(&self, character: Id) -> Result<Paginator<'_, EventResult>, AusmashError> {
        self.paginate(&format!("characters/{character}/results"), &[])
    }
}
