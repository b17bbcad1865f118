//! Checkout orchestration.
//!
//! [`CheckoutService::place_order`] drives one attempt through
//! validate → submit → settle:
//!
//! - an empty cart or an invalid form is rejected without contacting the
//!   gateway
//! - a valid form is sent as a [`CheckoutPayload`] snapshot of the cart
//! - an accepted order clears the cart; a failed one leaves it untouched
//!
//! Only one attempt may be in flight at a time per service.

mod gateway;
mod http;
mod mock;

pub use gateway::{CheckoutGateway, SubmissionError};
pub use http::HttpCheckoutGateway;
pub use mock::{FailurePolicy, MockCheckoutGateway, PAYMENT_FAILED};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use game_store_core::checkout::validate;
use game_store_core::{CheckoutForm, CheckoutPayload, OrderConfirmation, ValidationErrors};
use thiserror::Error;
use tracing::instrument;

use crate::config::CheckoutConfig;
use crate::stores::CartStore;

/// Why a checkout attempt ended without an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    /// Another attempt is still waiting on the gateway.
    #[error("A checkout is already in progress")]
    InFlight,

    #[error("Invalid checkout form: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl CheckoutError {
    /// Whether the same attempt may be repeated unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Submission(_) | Self::InFlight)
    }
}

/// Gateway selected by configuration.
#[derive(Debug, Clone)]
pub enum CheckoutBackend {
    Mock(MockCheckoutGateway),
    Http(HttpCheckoutGateway),
}

impl CheckoutBackend {
    /// Build the gateway described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &CheckoutConfig, timeout: Duration) -> Result<Self, SubmissionError> {
        Ok(match config {
            CheckoutConfig::Mock {
                delay,
                failure_rate,
            } => Self::Mock(MockCheckoutGateway::new(
                *delay,
                FailurePolicy::Random {
                    rate: *failure_rate,
                },
            )),
            CheckoutConfig::Remote(base_url) => {
                Self::Http(HttpCheckoutGateway::new(base_url, timeout)?)
            }
        })
    }
}

impl CheckoutGateway for CheckoutBackend {
    async fn submit(&self, payload: &CheckoutPayload) -> Result<OrderConfirmation, SubmissionError> {
        match self {
            Self::Mock(gateway) => gateway.submit(payload).await,
            Self::Http(gateway) => gateway.submit(payload).await,
        }
    }
}

/// Clears the in-flight flag when an attempt ends, however it ends.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Places orders for the cart in `cart` through `gateway`.
#[derive(Clone)]
pub struct CheckoutService<G> {
    cart: CartStore,
    gateway: G,
    in_flight: Arc<AtomicBool>,
}

impl<G: CheckoutGateway> CheckoutService<G> {
    #[must_use]
    pub fn new(cart: CartStore, gateway: G) -> Self {
        Self {
            cart,
            gateway,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one checkout attempt.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InFlight`] while another attempt is submitting
    /// - [`CheckoutError::EmptyCart`] when there is nothing to buy
    /// - [`CheckoutError::Validation`] listing every invalid field
    /// - [`CheckoutError::Submission`] when the gateway fails; the cart is kept
    #[instrument(skip_all)]
    pub async fn place_order(
        &self,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(CheckoutError::InFlight)?;

        let cart = self.cart.snapshot();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let validated = validate(form).inspect_err(|errors| {
            tracing::debug!(%errors, "Checkout form rejected");
        })?;
        let card_last4 = validated.card_last4().to_owned();
        let payload = CheckoutPayload::new(&cart, validated);

        tracing::info!(
            items = payload.items.len(),
            total = %payload.total,
            %card_last4,
            "Submitting checkout"
        );

        match self.gateway.submit(&payload).await {
            Ok(confirmation) => {
                self.cart.clear();
                tracing::info!(order_id = %confirmation.order_id, "Order placed");
                Ok(confirmation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Checkout submission failed");
                Err(e.into())
            }
        }
    }
}
