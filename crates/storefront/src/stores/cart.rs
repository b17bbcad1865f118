//! Cart state container.

use std::sync::Arc;

use game_store_core::{CartLedger, Game, GameId, PriceSummary};
use tokio::sync::watch;

use super::PersistedState;
use crate::storage::{CART_KEY, StateStore};

/// Shared handle to the shopper's cart.
///
/// Mutations return the ledger as it stands after the change.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<PersistedState<CartLedger>>,
}

impl CartStore {
    /// Open the cart, restoring any persisted ledger from `storage`.
    #[must_use]
    pub fn open(storage: Arc<dyn StateStore>) -> Self {
        Self {
            inner: Arc::new(PersistedState::open(storage, CART_KEY)),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> CartLedger {
        self.inner.snapshot()
    }

    /// Receive every ledger published after a mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartLedger> {
        self.inner.subscribe()
    }

    pub fn add(&self, game: &Game) -> CartLedger {
        tracing::debug!(game_id = %game.id, "Adding to cart");
        self.inner.mutate(|ledger| ledger.add_to_cart(game))
    }

    pub fn remove(&self, game_id: &GameId) -> CartLedger {
        tracing::debug!(%game_id, "Removing from cart");
        self.inner.mutate(|ledger| ledger.remove_from_cart(game_id))
    }

    pub fn update_quantity(&self, game_id: &GameId, quantity: i64) -> CartLedger {
        tracing::debug!(%game_id, quantity, "Updating cart quantity");
        self.inner
            .mutate(|ledger| ledger.update_quantity(game_id, quantity))
    }

    pub fn clear(&self) -> CartLedger {
        tracing::debug!("Clearing cart");
        self.inner.mutate(CartLedger::clear_cart)
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.inner.state.borrow().total_item_count()
    }

    #[must_use]
    pub fn summary(&self) -> PriceSummary {
        self.inner.state.borrow().summary()
    }
}
