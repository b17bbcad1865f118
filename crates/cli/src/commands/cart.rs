//! Cart commands.
//!
//! The cart is read from and written back to the storefront data directory.

use game_store_core::GameId;
use game_store_storefront::catalog::CatalogSource;
use game_store_storefront::routes::cart::CartView;
use game_store_storefront::state::AppState;

use super::{CliError, print_json};

pub fn show(state: &AppState) -> Result<(), CliError> {
    print_json(&CartView::from(&state.cart().snapshot()))
}

/// Add one copy of the game with `slug`.
///
/// # Errors
///
/// Returns `CliError::OutOfStock` when the game has no stock left.
pub async fn add(state: &AppState, slug: &str) -> Result<(), CliError> {
    let game = state.catalog().get_game(slug).await?;
    if !game.in_stock() {
        return Err(CliError::OutOfStock(game.title));
    }
    print_json(&CartView::from(&state.cart().add(&game)))
}

pub fn update(state: &AppState, game_id: &str, quantity: i64) -> Result<(), CliError> {
    let ledger = state
        .cart()
        .update_quantity(&GameId::new(game_id), quantity);
    print_json(&CartView::from(&ledger))
}

pub fn remove(state: &AppState, game_id: &str) -> Result<(), CliError> {
    print_json(&CartView::from(&state.cart().remove(&GameId::new(game_id))))
}

pub fn clear(state: &AppState) -> Result<(), CliError> {
    print_json(&CartView::from(&state.cart().clear()))
}
