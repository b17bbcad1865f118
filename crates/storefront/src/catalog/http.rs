//! Remote catalog API client.
//!
//! Talks to the `/api/games` endpoints of a catalog service (for example
//! another storefront instance serving the mock API). Responses are cached
//! with `moka` for five minutes.

use std::sync::Arc;
use std::time::Duration;

use game_store_core::Game;
use moka::future::Cache;
use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::Url;

use super::{CatalogError, CatalogSource};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Games,
    Game(String),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Games(Arc<Vec<Game>>),
    Game(Box<Game>),
}

/// Client for a remote catalog API.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl HttpCatalog {
    /// Create a client for the catalog API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(HttpCatalogInner {
                client,
                base_url,
                cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        not_found: impl FnOnce() -> CatalogError,
    ) -> Result<T, CatalogError> {
        let response = self.inner.client.get(self.endpoint(path)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(not_found());
        }
        if !status.is_success() {
            tracing::error!(status = %status, path, "Catalog API returned non-success status");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl CatalogSource for HttpCatalog {
    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<Game>, CatalogError> {
        if let Some(CacheValue::Games(games)) = self.inner.cache.get(&CacheKey::Games).await {
            debug!("Catalog cache hit");
            return Ok(games.as_ref().clone());
        }

        let games: Vec<Game> = self
            .fetch("api/games", || CatalogError::Status(404))
            .await?;
        self.inner
            .cache
            .insert(CacheKey::Games, CacheValue::Games(Arc::new(games.clone())))
            .await;
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, slug: &str) -> Result<Game, CatalogError> {
        let key = CacheKey::Game(slug.to_owned());
        if let Some(CacheValue::Game(game)) = self.inner.cache.get(&key).await {
            debug!("Game cache hit");
            return Ok(*game);
        }

        let game: Game = self
            .fetch(&format!("api/games/{slug}"), || {
                CatalogError::NotFound(slug.to_owned())
            })
            .await?;
        self.inner
            .cache
            .insert(key, CacheValue::Game(Box::new(game.clone())))
            .await;
        Ok(game)
    }
}
