// Matches, videos and channels

use tracing::instrument;

use crate::client::{AusmashClient, DateRange, Paginator};
use crate::error::AusmashError;
use crate::models::{Channel, Id, Match, Video, mark_bracket_reset};

impl AusmashClient {
    /// Every set at an event, newest first, with a bracket reset shown as `GF2`
    #[instrument(skip(self))]
    pub async fn event_matches(&self, event: Id) -> Result<Vec<Match>, AusmashError> {
        let mut matches = self
            .paginate::<Match>(&format!("events/{event}/matches"), &[])?
            .collect_all()
            .await?;
        mark_bracket_reset(&mut matches);
        Ok(matches)
    }

    /// A player's sets, newest first
    pub fn player_matches(&self, player: Id, range: DateRange) -> Result<Paginator<'_, Match>, AusmashError> {
        self.paginate(&format!("players/{player}/matches"), &range.to_params())
    }

    /// Matches won by players using a character
    pub fn character_wins(&self, character: Id) -> Result<Paginator<'_, Match>, AusmashError> {
        self.paginate(&format!("characters/{character}/matcheswins"), &[])
    }

    /// Matches lost by players using a character
    pub fn character_losses(&self, character: Id) -> Result<Paginator<'_, Match>, AusmashError> {
        self.paginate(&format!("characters/{character}/matcheslosses"), &[])
    }

    pub fn character_matches(&self, character: Id) -> Result<Paginator<'_, Match>, AusmashError> {
        self.paginate(&format!("characters/{character}/matches"), &[])
    }

    pub fn event_videos(&self, event: Id) -> Result<Paginator<'_, Video>, AusmashError> {
        self.paginate(&format!("events/{event}/videos"), &[])
    }

    /// Videos featuring a player, newest first, optionally only those with a given character
    pub fn player_videos(
        &self,
        player: Id,
        range: DateRange,
        character: Option<Id>,
    ) -> Result<Paginator<'_, Video>, AusmashError> {
        let path = match character {
            Some(character) => format!("players/{player}/videos/{character}"),
            None => format!("players/{player}/videos"),
        };
        self.paginate(&path, &range.to_params())
    }

    pub fn character_videos(&self, character: Id) -> Result<Paginator<'_, Video>, AusmashError> {
        self.paginate(&format!("characters/{character}/videos"), &[])
    }

    pub fn channels(&self) -> Result<Paginator<'_, Channel>, AusmashError> {
        self.paginate("channels", &[])
    }

    /// Channel including its videos
    #[instrument(skip(self))]
    pub async fn channel(&self, id: Id) -> Result<Channel, AusmashError> {
        self.fetch_resource(id).await
    }
}
