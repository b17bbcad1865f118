//! Mock catalog and checkout API.
//!
//! The JSON endpoints a browser client or another storefront instance talks
//! to. `HttpCatalog` and `HttpCheckoutGateway` are clients of these routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use game_store_core::{Game, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::catalog::CatalogSource;
use crate::checkout::PAYMENT_FAILED;
use crate::error::Result;
use crate::state::AppState;

/// Checkout request body. Only the total is read; items and form data are
/// accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct MockCheckoutRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Accepted order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockCheckoutResponse {
    pub success: bool,
    pub order_id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Every game.
#[instrument(skip(state))]
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>> {
    Ok(Json(state.catalog().list_games().await?))
}

/// One game by slug, 404 when absent.
#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Game>> {
    Ok(Json(state.catalog().get_game(&slug).await?))
}

/// Simulated payment processing.
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<MockCheckoutRequest>,
) -> Response {
    match state.mock_processor().charge(request.total).await {
        Ok(confirmation) => Json(MockCheckoutResponse {
            success: true,
            order_id: confirmation.order_id,
            total: confirmation.total,
        })
        .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": PAYMENT_FAILED })),
        )
            .into_response(),
    }
}
