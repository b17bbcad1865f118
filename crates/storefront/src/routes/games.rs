//! Game catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use game_store_core::Game;
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::CatalogSource;
use crate::catalog::views::{self, SortOrder};
use crate::error::Result;
use crate::state::AppState;

/// Browse query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    /// Search term matched against titles and genres.
    pub q: Option<String>,
    pub genre: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

/// Apply a browse query to the full catalog.
#[must_use]
pub fn browse(games: Vec<Game>, query: &BrowseQuery) -> Vec<Game> {
    let mut games = match query.q.as_deref() {
        Some(term) => views::search(games, term),
        None => games,
    };
    if let Some(genre) = query.genre.as_deref().filter(|g| !g.is_empty()) {
        games = views::filter_genre(games, genre);
    }
    views::sort(&mut games, query.sort);
    games
}

/// Browse the catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<Vec<Game>>> {
    let games = state.catalog().list_games().await?;
    Ok(Json(browse(games, &query)))
}

/// Discounted games.
#[instrument(skip(state))]
pub async fn deals(State(state): State<AppState>) -> Result<Json<Vec<Game>>> {
    let games = state.catalog().list_games().await?;
    Ok(Json(views::deals(games)))
}

/// Free-to-play games.
#[instrument(skip(state))]
pub async fn free(State(state): State<AppState>) -> Result<Json<Vec<Game>>> {
    let games = state.catalog().list_games().await?;
    Ok(Json(views::free_games(games)))
}

/// Game detail.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Game>> {
    Ok(Json(state.catalog().get_game(&slug).await?))
}
