//! Game catalog repositories.
//!
//! # Sources
//!
//! - [`FixtureCatalog`] - games from the bundled fixture or a JSON file
//! - [`HttpCatalog`] - games from a remote catalog API, cached with `moka`
//!
//! [`Catalog`] picks one of them from configuration. Route handlers and the
//! CLI only talk to the [`CatalogSource`] trait.

mod fixture;
mod http;
pub mod views;

pub use fixture::FixtureCatalog;
pub use http::HttpCatalog;

use std::future::Future;
use std::time::Duration;

use game_store_core::Game;
use thiserror::Error;

use crate::config::CatalogConfig;

/// Errors that can occur when reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No game has the requested slug.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP request to the catalog API failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog API answered with an unexpected status.
    #[error("Catalog API returned status {0}")]
    Status(u16),

    /// Catalog JSON could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read access to the game catalog.
pub trait CatalogSource: Send + Sync {
    /// Every game in the catalog, in catalog order.
    fn list_games(&self) -> impl Future<Output = Result<Vec<Game>, CatalogError>> + Send;

    /// A single game by slug.
    ///
    /// Returns [`CatalogError::NotFound`] when no game has that slug.
    fn get_game(&self, slug: &str) -> impl Future<Output = Result<Game, CatalogError>> + Send;
}

/// Catalog selected by configuration.
#[derive(Clone)]
pub enum Catalog {
    Fixture(FixtureCatalog),
    Http(HttpCatalog),
}

impl Catalog {
    /// Build the catalog described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture file cannot be read or parsed, or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &CatalogConfig, timeout: Duration) -> Result<Self, CatalogError> {
        Ok(match config {
            CatalogConfig::Bundled => Self::Fixture(FixtureCatalog::bundled()?),
            CatalogConfig::File(path) => Self::Fixture(FixtureCatalog::from_path(path)?),
            CatalogConfig::Remote(base_url) => {
                Self::Http(HttpCatalog::new(base_url.clone(), timeout)?)
            }
        })
    }
}

impl CatalogSource for Catalog {
    async fn list_games(&self) -> Result<Vec<Game>, CatalogError> {
        match self {
            Self::Fixture(catalog) => catalog.list_games().await,
            Self::Http(catalog) => catalog.list_games().await,
        }
    }

    async fn get_game(&self, slug: &str) -> Result<Game, CatalogError> {
        match self {
            Self::Fixture(catalog) => catalog.get_game(slug).await,
            Self::Http(catalog) => catalog.get_game(slug).await,
        }
    }
}
