//! Payment submission seam.

use std::future::Future;

use game_store_core::{CheckoutPayload, OrderConfirmation};
use thiserror::Error;

/// Why a submission did not produce an order.
///
/// Every variant is retryable: the cart is left untouched.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The checkout service could not be reached or answered garbage.
    #[error("Checkout request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The checkout service refused the payment.
    #[error("Payment rejected: {message}")]
    Rejected { status: u16, message: String },
}

/// Submits a checkout payload to a payment processor.
pub trait CheckoutGateway: Send + Sync {
    fn submit(
        &self,
        payload: &CheckoutPayload,
    ) -> impl Future<Output = Result<OrderConfirmation, SubmissionError>> + Send;
}
