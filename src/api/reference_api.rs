// Games, regions and characters: small lists that rarely change

use tracing::instrument;

use crate::client::{AusmashClient, Paginator};
use crate::error::AusmashError;
use crate::models::{Character, Game, Id, Region};

impl AusmashClient {
    pub fn games(&self) -> Result<Paginator<'_, Game>, AusmashError> {
        self.paginate("pocket/games", &[])
    }

    #[instrument(skip(self))]
    pub async fn game(&self, id: Id) -> Result<Game, AusmashError> {
        self.fetch_resource(id).await
    }

    /// Looks a game up by short name (`SSBM`, `SSBU`, ...), case-insensitively
    #[instrument(skip(self))]
    pub async fn game_by_short(&self, short: &str) -> Result<Game, AusmashError> {
        self.find_by_short(short).await
    }

    pub fn regions(&self) -> Result<Paginator<'_, Region>, AusmashError> {
        self.paginate("regions", &[])
    }

    #[instrument(skip(self))]
    pub async fn region(&self, id: Id) -> Result<Region, AusmashError> {
        self.fetch_resource(id).await
    }

    /// Looks a region up by short name (`NSW`, `NZ`, ...), case-insensitively
    #[instrument(skip(self))]
    pub async fn region_by_short(&self, short: &str) -> Result<Region, AusmashError> {
        self.find_by_short(short).await
    }

    /// Every character in every game
    pub fn characters(&self) -> Result<Paginator<'_, Character>, AusmashError> {
        self.paginate("pocket/characters", &[])
    }

    pub fn characters_in_game(&self, game: Id) -> Result<Paginator<'_, Character>, AusmashError> {
        self.paginate(&format!("characters/bygame/{game}"), &[])
    }

    #[instrument(skip(self))]
    pub async fn character(&self, id: Id) -> Result<Character, AusmashError> {
        self.fetch_resource(id).await
    }
}
