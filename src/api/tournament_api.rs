// Tournament and tournament series lookups

use tracing::instrument;

use crate::client::{AusmashClient, Paginator, segment_url};
use crate::error::AusmashError;
use crate::models::{Id, Tournament, TournamentSeries};

impl AusmashClient {
    pub fn tournaments(&self) -> Result<Paginator<'_, Tournament>, AusmashError> {
        self.paginate("tourneys", &[])
    }

    pub fn tournaments_in_region(
        &self,
        region_short: &str,
    ) -> Result<Paginator<'_, Tournament>, AusmashError> {
        let url = segment_url(&self.config.endpoint, &["tourneys", "byregion", region_short])?;
        self.paginate(&url, &[])
    }

    /// Tournaments that have had results uploaded
    pub fn tournaments_with_results(&self) -> Result<Paginator<'_, Tournament>, AusmashError> {
        self.paginate("tourneys/withresults", &[])
    }

    pub fn upcoming_tournaments(&self) -> Result<Paginator<'_, Tournament>, AusmashError> {
        self.paginate("tourneys/upcoming", &[])
    }

    pub fn search_tournaments(&self, query: &str) -> Result<Paginator<'_, Tournament>, AusmashError> {
        self.paginate("tourneys/search", &[("q", query.to_string())])
    }

    /// Full tournament including region, series and events
    #[instrument(skip(self))]
    pub async fn tournament(&self, id: Id) -> Result<Tournament, AusmashError> {
        self.fetch_resource(id).await
    }

    pub fn tournament_series(&self) -> Result<Paginator<'_, TournamentSeries>, AusmashError> {
        self.paginate("series", &[])
    }

    pub fn tournaments_in_series(&self, series: Id) -> Result<Paginator<'_, Tournament>, AusmashError> {
        self.paginate(&format!("tourneys/byseries/{series}"), &[])
    }
}
