// Player lookups, search and head-to-head win rates

use tracing::instrument;

use crate::client::{AusmashClient, DateRange, Paginator, segment_url};
use crate::error::AusmashError;
use crate::models::result::CommonResults;
use crate::models::{CommonResult, Id, Player, TrueSkill, WinRate, WinRateComparison};

impl AusmashClient {
    /// Every player in the database
    pub fn players(&self) -> Result<Paginator<'_, Player>, AusmashError> {
        self.paginate("players", &[])
    }

    /// Players tagged with a region, by short name (`NSW`, `NZ`, ...)
    pub fn players_in_region(&self, region_short: &str) -> Result<Paginator<'_, Player>, AusmashError> {
        let url = segment_url(&self.config.endpoint, &["players", "byregion", region_short])?;
        self.paginate(&url, &[])
    }

    #[instrument(skip(self))]
    pub async fn player(&self, id: Id) -> Result<Player, AusmashError> {
        self.fetch_resource(id).await
    }

    /// Exact lookup by region and tag; `ApiNotFound` if no such player exists
    #[instrument(skip(self))]
    pub async fn find_player(&self, region_short: &str, name: &str) -> Result<Player, AusmashError> {
        let url = segment_url(&self.config.endpoint, &["players", "find", name, region_short])?;
        self.get_json(&url, &[]).await
    }

    pub fn search_players(&self, query: &str) -> Result<Paginator<'_, Player>, AusmashError> {
        self.paginate("players/search", &[("q", query.to_string())])
    }

    /// Win rates against every singles opponent in a game, highest opponent Elo first
    pub fn player_win_rates(
        &self,
        player: Id,
        game: Id,
        range: DateRange,
    ) -> Result<Paginator<'_, WinRate>, AusmashError> {
        self.paginate(
            &format!("players/{player}/winrates/{game}"),
            &range.to_params(),
        )
    }

    /// Both players' win rates against the opponents they have in common
    #[instrument(skip(self))]
    pub async fn compare_win_rates(
        &self,
        game: Id,
        player1: Id,
        player2: Id,
        range: DateRange,
    ) -> Result<WinRateComparison, AusmashError> {
        self.get_json(
            &format!("compare/{game}/{player1}/{player2}/winrates"),
            &range.to_params(),
        )
        .await
    }

    /// Events in a game that both players entered, with each one's placing
    #[instrument(skip(self))]
    pub async fn compare_results(
        &self,
        game: Id,
        player1: Id,
        player2: Id,
        range: DateRange,
    ) -> Result<Vec<CommonResult>, AusmashError> {
        let common: CommonResults = self
            .get_json(
                &format!("compare/{game}/{player1}/{player2}/results"),
                &range.to_params(),
            )
            .await?;
        Ok(common.results)
    }

    /// Doubles TrueSkill in each game the player has teamed in
    #[instrument(skip(self))]
    pub async fn player_trueskill(&self, player: Id) -> Result<Vec<TrueSkill>, AusmashError> {
        self.paginate::<TrueSkill>(&format!("players/{player}/trueskill"), &[])?
            .collect_all()
            .await
    }
}
