//! Catalog browsing commands.

use game_store_storefront::catalog::CatalogSource;
use game_store_storefront::catalog::views::{self, SortOrder};
use game_store_storefront::routes::games::{BrowseQuery, browse};
use game_store_storefront::state::AppState;

use super::{CliError, print_json};

/// List games matching an optional search term and genre.
pub async fn list(
    state: &AppState,
    query: Option<String>,
    genre: Option<String>,
    sort: SortOrder,
) -> Result<(), CliError> {
    let games = state.catalog().list_games().await?;
    let query = BrowseQuery {
        q: query,
        genre,
        sort,
    };
    print_json(&browse(games, &query))
}

/// Show one game by slug.
pub async fn show(state: &AppState, slug: &str) -> Result<(), CliError> {
    print_json(&state.catalog().get_game(slug).await?)
}

pub async fn deals(state: &AppState) -> Result<(), CliError> {
    let games = state.catalog().list_games().await?;
    print_json(&views::deals(games))
}

pub async fn free(state: &AppState) -> Result<(), CliError> {
    let games = state.catalog().list_games().await?;
    print_json(&views::free_games(games))
}
