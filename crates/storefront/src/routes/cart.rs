//! Cart route handlers.
//!
//! Every mutation answers with the full [`CartView`], so clients never need
//! a second round trip to refresh totals.

use axum::{Json, extract::State};
use game_store_core::{CartEntry, CartLedger, GameId, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::CatalogSource;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub game_id: GameId,
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub stock: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
    /// Line total formatted for display ("$19.99").
    pub line_total_display: String,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        let line_total = entry.line_total();
        Self {
            game_id: entry.game.id.clone(),
            slug: entry.game.slug.clone(),
            title: entry.game.title.clone(),
            image: entry.game.images.first().cloned(),
            quantity: entry.quantity,
            stock: entry.game.stock,
            unit_price: entry.game.effective_price(),
            line_total,
            line_total_display: Price::usd(line_total).display(),
        }
    }
}

/// Cart display data.
///
/// Money goes out as JSON numbers, like game prices and order totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub item_count: u32,
}

impl From<&CartLedger> for CartView {
    fn from(ledger: &CartLedger) -> Self {
        let summary = ledger.summary();
        Self {
            items: ledger.entries().iter().map(CartItemView::from).collect(),
            subtotal: summary.subtotal,
            tax: summary.tax,
            total: summary.total,
            item_count: summary.item_count,
        }
    }
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub slug: String,
}

/// Update quantity request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub game_id: GameId,
    pub quantity: i64,
}

/// Remove from cart request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartRequest {
    pub game_id: GameId,
}

/// Cart count badge.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from(&state.cart().snapshot()))
}

/// Add one copy of a game to the cart.
///
/// Out-of-stock games are refused with 409; the cart is not touched.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let game = state.catalog().get_game(&request.slug).await?;
    if !game.in_stock() {
        return Err(AppError::Conflict(format!("{} is out of stock", game.title)));
    }

    add_breadcrumb("cart", "Added to cart", Some(&[("game_id", game.id.as_str())]));
    let ledger = state.cart().add(&game);
    Ok(Json(CartView::from(&ledger)))
}

/// Set a line's quantity; zero or less removes it.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateCartRequest>,
) -> Json<CartView> {
    let ledger = state
        .cart()
        .update_quantity(&request.game_id, request.quantity);
    Json(CartView::from(&ledger))
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Json<CartView> {
    let ledger = state.cart().remove(&request.game_id);
    Json(CartView::from(&ledger))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from(&state.cart().clear()))
}

/// Total quantity across all lines.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        count: state.cart().item_count(),
    })
}
