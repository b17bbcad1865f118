//! Cart ledger.
//!
//! The ledger maps game IDs to `(game snapshot, quantity)` entries and
//! derives item counts and prices from them. Every operation is total over
//! its input: unknown IDs are ignored and quantities are clamped to stock,
//! never rejected.
//!
//! Quantities are bounded by the stock of the snapshot passed in, so an
//! entry always satisfies `quantity <= game.stock`. Entries whose quantity
//! drops to zero through [`CartLedger::update_quantity`] are removed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::{GameId, tax_on};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub game: Game,
    pub quantity: u32,
}

impl CartEntry {
    /// Quantity times the game's effective price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.game.effective_price() * Decimal::from(self.quantity)
    }
}

/// Derived totals shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub item_count: u32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// In-memory cart, kept in insertion order.
///
/// Serializes as `{"items": [...]}`. Deserialization normalizes the record:
/// duplicate IDs keep their first entry and quantities are clamped to stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LedgerRecord")]
pub struct CartLedger {
    items: Vec<CartEntry>,
}

#[derive(Deserialize)]
struct LedgerRecord {
    #[serde(default)]
    items: Vec<CartEntry>,
}

impl From<LedgerRecord> for CartLedger {
    fn from(record: LedgerRecord) -> Self {
        let mut ledger = Self::default();
        for mut entry in record.items {
            if ledger.get(&entry.game.id).is_some() {
                continue;
            }
            entry.quantity = entry.quantity.min(entry.game.stock);
            if entry.quantity > 0 {
                ledger.items.push(entry);
            }
        }
        ledger
    }
}

impl CartLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `game`.
    ///
    /// An existing entry is incremented, clamped to `game.stock`. A new entry
    /// starts at `min(1, game.stock)`, so an out-of-stock game is inserted
    /// with quantity zero rather than rejected; callers are expected to keep
    /// out-of-stock games away from this operation.
    pub fn add_to_cart(&mut self, game: &Game) {
        if let Some(entry) = self.items.iter_mut().find(|e| e.game.id == game.id) {
            entry.quantity = entry.quantity.saturating_add(1).min(game.stock);
            return;
        }

        self.items.push(CartEntry {
            game: game.clone(),
            quantity: 1.min(game.stock),
        });
    }

    /// Remove the entry for `game_id`. Absent IDs are a no-op.
    pub fn remove_from_cart(&mut self, game_id: &GameId) {
        self.items.retain(|e| &e.game.id != game_id);
    }

    /// Set the quantity for `game_id`.
    ///
    /// Zero or negative removes the entry; positive values are clamped to the
    /// snapshot's stock. Absent IDs are a no-op.
    pub fn update_quantity(&mut self, game_id: &GameId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(game_id);
            return;
        }

        if let Some(entry) = self.items.iter_mut().find(|e| &e.game.id == game_id) {
            let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
            entry.quantity = requested.min(entry.game.stock);
        }
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    /// Sum of all entry quantities.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(e.quantity))
    }

    /// Sum of `quantity × effective price` over all entries, unrounded.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartEntry::line_total).sum()
    }

    /// Subtotal, 8% tax and grand total.
    #[must_use]
    pub fn summary(&self) -> PriceSummary {
        let subtotal = self.total_price();
        let tax = tax_on(subtotal);
        PriceSummary {
            item_count: self.total_item_count(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, game_id: &GameId) -> Option<&CartEntry> {
        self.items.iter().find(|e| &e.game.id == game_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::game::test_support::game;

    #[test]
    fn test_add_inserts_then_increments() {
        let g = game("1", dec!(10), None, 5);
        let mut cart = CartLedger::new();

        cart.add_to_cart(&g);
        assert_eq!(cart.get(&g.id).unwrap().quantity, 1);

        cart.add_to_cart(&g);
        assert_eq!(cart.get(&g.id).unwrap().quantity, 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_never_exceeds_stock() {
        let g = game("1", dec!(10), None, 3);
        let mut cart = CartLedger::new();

        for _ in 0..10 {
            cart.add_to_cart(&g);
            assert!(cart.get(&g.id).unwrap().quantity <= g.stock);
        }
        assert_eq!(cart.get(&g.id).unwrap().quantity, 3);
    }

    #[test]
    fn test_add_out_of_stock_clamps_without_error() {
        let g = game("1", dec!(10), None, 0);
        let mut cart = CartLedger::new();

        cart.add_to_cart(&g);
        cart.add_to_cart(&g);

        assert_eq!(cart.get(&g.id).unwrap().quantity, 0);
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let g = game("1", dec!(10), None, 3);
        let mut cart = CartLedger::new();
        cart.add_to_cart(&g);

        cart.remove_from_cart(&g.id);
        assert!(cart.is_empty());

        cart.remove_from_cart(&g.id);
        cart.remove_from_cart(&GameId::new("missing"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_zero_or_negative_removes() {
        let a = game("a", dec!(10), None, 3);
        let b = game("b", dec!(10), None, 3);
        let mut cart = CartLedger::new();
        cart.add_to_cart(&a);
        cart.add_to_cart(&b);

        cart.update_quantity(&a.id, 0);
        assert!(cart.get(&a.id).is_none());

        cart.update_quantity(&b.id, -4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_clamps_to_stock() {
        let g = game("1", dec!(10), None, 4);
        let mut cart = CartLedger::new();
        cart.add_to_cart(&g);

        cart.update_quantity(&g.id, 3);
        assert_eq!(cart.get(&g.id).unwrap().quantity, 3);

        cart.update_quantity(&g.id, 99);
        assert_eq!(cart.get(&g.id).unwrap().quantity, 4);

        cart.update_quantity(&g.id, i64::MAX);
        assert_eq!(cart.get(&g.id).unwrap().quantity, 4);
    }

    #[test]
    fn test_update_absent_is_noop() {
        let g = game("1", dec!(10), None, 4);
        let mut cart = CartLedger::new();
        cart.add_to_cart(&g);
        let before = cart.clone();

        cart.update_quantity(&GameId::new("missing"), 2);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_price_uses_discount() {
        let g = game("1", dec!(60.00), Some(dec!(0.25)), 5);
        let mut cart = CartLedger::new();
        cart.add_to_cart(&g);
        cart.add_to_cart(&g);

        assert_eq!(cart.total_price(), dec!(90.00));
    }

    #[test]
    fn test_total_price_keeps_full_precision() {
        let g = game("1", dec!(19.99), Some(dec!(0.15)), 5);
        let mut cart = CartLedger::new();
        cart.add_to_cart(&g);

        assert_eq!(cart.total_price(), dec!(16.9915));
    }

    #[test]
    fn test_item_count_independent_of_order() {
        let a = game("a", dec!(10), None, 5);
        let b = game("b", dec!(20), None, 5);

        let mut first = CartLedger::new();
        first.add_to_cart(&a);
        first.add_to_cart(&b);
        first.add_to_cart(&b);

        let mut second = CartLedger::new();
        second.add_to_cart(&b);
        second.add_to_cart(&a);
        second.add_to_cart(&b);

        assert_eq!(first.total_item_count(), 3);
        assert_eq!(first.total_item_count(), second.total_item_count());
        assert_eq!(first.total_price(), second.total_price());
    }

    #[test]
    fn test_summary_applies_tax() {
        let g = game("1", dec!(60.00), Some(dec!(0.25)), 5);
        let mut cart = CartLedger::new();
        cart.add_to_cart(&g);
        cart.add_to_cart(&g);

        let summary = cart.summary();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal, dec!(90.00));
        assert_eq!(summary.tax, dec!(7.2));
        assert_eq!(summary.total, dec!(97.2));
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = CartLedger::new();
        cart.add_to_cart(&game("a", dec!(10), None, 5));
        cart.add_to_cart(&game("b", dec!(10), None, 5));

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_restore_normalizes_record() {
        let a = game("a", dec!(10), None, 2);
        let mut cart = CartLedger::new();
        cart.add_to_cart(&a);
        let mut json = serde_json::to_value(&cart).unwrap();

        let items = json["items"].as_array_mut().unwrap();
        let mut dup = items[0].clone();
        dup["quantity"] = serde_json::json!(1);
        items[0]["quantity"] = serde_json::json!(9);
        items.push(dup);

        let restored: CartLedger = serde_json::from_value(json).unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.get(&a.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_restore_missing_items_is_empty() {
        let restored: CartLedger = serde_json::from_str("{}").unwrap();
        assert!(restored.is_empty());
    }
}
