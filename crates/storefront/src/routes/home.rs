//! Home page route handler.

use axum::{Json, extract::State};
use game_store_core::Game;
use serde::Serialize;
use tracing::instrument;

use crate::catalog::CatalogSource;
use crate::catalog::views::{self, CATEGORY_COUNT, Category, SECTION_GAMES, TRENDING_COUNT};
use crate::error::Result;
use crate::state::AppState;

/// Home page sections.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub trending: Vec<Game>,
    pub categories: Vec<Category>,
    pub free: Vec<Game>,
}

impl HomeView {
    /// Categories are ranked by their full size before rows are cut to
    /// [`SECTION_GAMES`].
    #[must_use]
    pub fn build(games: Vec<Game>) -> Self {
        let mut categories = views::top_categories(&games, CATEGORY_COUNT);
        for category in &mut categories {
            category.games.truncate(SECTION_GAMES);
        }
        let mut free = views::free_games(games.clone());
        free.truncate(SECTION_GAMES);
        let trending = views::trending(games, TRENDING_COUNT);
        Self {
            trending,
            categories,
            free,
        }
    }
}

/// Home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeView>> {
    let games = state.catalog().list_games().await?;
    Ok(Json(HomeView::build(games)))
}
