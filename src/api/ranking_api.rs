// Power rankings and Elo

use tracing::{debug, instrument};

use crate::client::{AusmashClient, DateRange, Paginator, segment_url};
use crate::error::AusmashError;
use crate::models::{Elo, EloListing, Id, Ranking, RankingSequence};

impl AusmashClient {
    pub fn rankings(&self) -> Result<Paginator<'_, Ranking>, AusmashError> {
        self.paginate("rankings", &[])
    }

    /// Rankings that are currently in effect
    pub fn active_rankings(&self) -> Result<Paginator<'_, Ranking>, AusmashError> {
        self.paginate("rankings/active", &[])
    }

    pub fn rankings_in_region(&self, region_short: &str) -> Result<Paginator<'_, Ranking>, AusmashError> {
        let url = segment_url(&self.config.endpoint, &["rankings", "byregion", region_short])?;
        self.paginate(&url, &[])
    }

    /// Full ranking including every ranked player
    #[instrument(skip(self))]
    pub async fn ranking(&self, id: Id) -> Result<Ranking, AusmashError> {
        self.fetch_resource(id).await
    }

    pub fn ranking_sequences(&self) -> Result<Paginator<'_, RankingSequence>, AusmashError> {
        self.paginate("rankingsequences", &[])
    }

    pub fn rankings_in_sequence(&self, sequence: Id) -> Result<Paginator<'_, Ranking>, AusmashError> {
        self.paginate(&format!("rankings/bysequence/{sequence}"), &[])
    }

    /// Rankings a player has appeared on, newest first
    pub fn player_rankings(
        &self,
        player: Id,
        range: DateRange,
    ) -> Result<Paginator<'_, Ranking>, AusmashError> {
        self.paginate(&format!("players/{player}/rankings"), &range.to_params())
    }

    /// Elo of every player in a game, optionally limited to one region
    pub fn elo_for_game(
        &self,
        game: Id,
        region_short: Option<&str>,
    ) -> Result<Paginator<'_, Elo>, AusmashError> {
        let params: Vec<(&str, String)> = region_short
            .map(|region| vec![("region", region.to_string())])
            .unwrap_or_default();
        self.paginate(&format!("elo/game/{game}"), &params)
    }

    /// Index of the per-game Elo lists
    #[instrument(skip(self))]
    pub async fn elo_listings(&self) -> Result<Vec<EloListing>, AusmashError> {
        self.paginate::<EloListing>("elo", &[])?.collect_all().await
    }

    /// Elo of every player in every game, one game's list after another
    #[instrument(skip(self))]
    pub async fn all_elo(&self) -> Result<Vec<Elo>, AusmashError> {
        let mut all = Vec::new();
        for listing in self.elo_listings().await? {
            let elos = self.paginate::<Elo>(&listing.api_link, &[])?.collect_all().await?;
            debug!("{} Elo records from {}", elos.len(), listing.api_link);
            all.extend(elos);
        }
        Ok(all)
    }

    /// A player's Elo in each game they play; empty if Elo was never calculated for them
    #[instrument(skip(self))]
    pub async fn player_elo(&self, player: Id) -> Result<Vec<Elo>, AusmashError> {
        self.paginate::<Elo>(&format!("players/{player}/elo"), &[])?
            .collect_all()
            .await
    }
}
