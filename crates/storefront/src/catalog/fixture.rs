//! Fixture-backed catalog.

use std::path::Path;
use std::sync::Arc;

use game_store_core::Game;

use super::{CatalogError, CatalogSource};

/// Catalog fixture compiled into the binary.
const BUNDLED_GAMES: &str = include_str!("../../fixtures/games.json");

/// Catalog served from an in-memory list of games.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    games: Arc<Vec<Game>>,
}

impl FixtureCatalog {
    #[must_use]
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games: Arc::new(games),
        }
    }

    /// Load the fixture shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON does not parse.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_GAMES)
    }

    /// Parse a JSON array of games.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an array of games.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let games: Vec<Game> = serde_json::from_str(json)?;
        Ok(Self::new(games))
    }

    /// Read a JSON array of games from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), games = catalog.games.len(), "Catalog fixture loaded");
        Ok(catalog)
    }
}

impl CatalogSource for FixtureCatalog {
    async fn list_games(&self) -> Result<Vec<Game>, CatalogError> {
        Ok(self.games.as_ref().clone())
    }

    async fn get_game(&self, slug: &str) -> Result<Game, CatalogError> {
        self.games
            .iter()
            .find(|g| g.slug == slug)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(slug.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[tokio::test]
    async fn test_bundled_fixture_is_consistent() {
        let catalog = FixtureCatalog::bundled().unwrap();
        let games = catalog.list_games().await.unwrap();

        let ids: HashSet<_> = games.iter().map(|g| g.id.clone()).collect();
        let slugs: HashSet<_> = games.iter().map(|g| g.slug.clone()).collect();
        assert_eq!(ids.len(), games.len(), "game ids must be unique");
        assert_eq!(slugs.len(), games.len(), "slugs must be unique");

        for game in &games {
            assert!(game.price >= rust_decimal::Decimal::ZERO);
            if let Some(discount) = game.discount {
                assert!(discount >= rust_decimal::Decimal::ZERO && discount < rust_decimal::Decimal::ONE);
            }
        }
    }

    #[tokio::test]
    async fn test_get_game_by_slug() {
        let catalog = FixtureCatalog::bundled().unwrap();
        let games = catalog.list_games().await.unwrap();
        let first = games.first().unwrap();

        let found = catalog.get_game(&first.slug).await.unwrap();
        assert_eq!(&found, first);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let catalog = FixtureCatalog::bundled().unwrap();
        let err = catalog.get_game("no-such-game").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(slug) if slug == "no-such-game"));
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(matches!(
            FixtureCatalog::from_json("{}"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = FixtureCatalog::from_path(Path::new("/nonexistent/games.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
