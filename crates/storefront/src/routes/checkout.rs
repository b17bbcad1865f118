//! Checkout route handler.

use axum::{Json, extract::State};
use game_store_core::{CheckoutForm, OrderConfirmation};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequestId;
use crate::state::AppState;

/// Place an order for the current cart.
///
/// Status mapping is done by `AppError`: 422 for field errors, 400 for an
/// empty cart, 409 while another attempt is in flight and 502 when the
/// payment processor fails.
#[instrument(skip(state, form), fields(request_id = %request_id))]
pub async fn place_order(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<OrderConfirmation>> {
    add_breadcrumb("checkout", "Checkout submitted", None);
    let confirmation = state.checkout().place_order(&form).await?;
    Ok(Json(confirmation))
}
