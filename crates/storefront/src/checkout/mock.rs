//! In-process payment processor simulation.

use std::time::Duration;

use game_store_core::{CheckoutPayload, OrderConfirmation, OrderId};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::instrument;

use super::gateway::{CheckoutGateway, SubmissionError};

/// Status the mock reports for a simulated decline.
const DECLINED_STATUS: u16 = 500;

/// Message the mock reports for a simulated decline.
pub const PAYMENT_FAILED: &str = "Payment failed";

/// When the mock processor declines a payment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailurePolicy {
    Never,
    Always,
    /// Decline with probability `rate`.
    Random { rate: f64 },
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::Random { rate: 0.1 }
    }
}

impl FailurePolicy {
    fn declines(self) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Random { rate } => rand::random::<f64>() < rate,
        }
    }
}

/// Payment processor that sleeps, then accepts or declines.
///
/// Accepted orders get an id `GS-NNNNN` and echo the submitted total.
#[derive(Debug, Clone)]
pub struct MockCheckoutGateway {
    delay: Duration,
    policy: FailurePolicy,
}

impl Default for MockCheckoutGateway {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), FailurePolicy::default())
    }
}

impl MockCheckoutGateway {
    #[must_use]
    pub const fn new(delay: Duration, policy: FailurePolicy) -> Self {
        Self { delay, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Decide the outcome for a payment of `total`.
    fn process(&self, total: Decimal) -> Result<OrderConfirmation, SubmissionError> {
        if self.policy.declines() {
            return Err(SubmissionError::Rejected {
                status: DECLINED_STATUS,
                message: PAYMENT_FAILED.to_owned(),
            });
        }

        Ok(OrderConfirmation {
            order_id: generate_order_id(),
            total,
        })
    }
}

/// Random order id in `GS-10000..=GS-99999`.
fn generate_order_id() -> OrderId {
    let number: u32 = rand::rng().random_range(10_000..=99_999);
    OrderId::new(format!("GS-{number}"))
}

impl MockCheckoutGateway {
    /// Simulate charging `total`: wait out the delay, then accept or decline.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::Rejected` when the failure policy declines.
    #[instrument(skip(self))]
    pub async fn charge(&self, total: Decimal) -> Result<OrderConfirmation, SubmissionError> {
        tokio::time::sleep(self.delay).await;

        let result = self.process(total);
        match &result {
            Ok(confirmation) => {
                tracing::info!(order_id = %confirmation.order_id, "Mock payment accepted");
            }
            Err(e) => tracing::warn!(error = %e, "Mock payment declined"),
        }
        result
    }
}

impl CheckoutGateway for MockCheckoutGateway {
    async fn submit(&self, payload: &CheckoutPayload) -> Result<OrderConfirmation, SubmissionError> {
        self.charge(payload.total).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_order_id_format() {
        for _ in 0..100 {
            let id = generate_order_id();
            let digits = id.as_str().strip_prefix("GS-").unwrap();
            let number: u32 = digits.parse().unwrap();
            assert!((10_000..=99_999).contains(&number), "{id}");
        }
    }

    #[test]
    fn test_never_accepts_and_echoes_total() {
        let gateway = MockCheckoutGateway::new(Duration::ZERO, FailurePolicy::Never);
        let confirmation = gateway.process(dec!(97.20)).unwrap();
        assert_eq!(confirmation.total, dec!(97.20));
    }

    #[test]
    fn test_always_declines() {
        let gateway = MockCheckoutGateway::new(Duration::ZERO, FailurePolicy::Always);
        let err = gateway.process(dec!(10)).unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::Rejected { status: 500, ref message } if message == PAYMENT_FAILED
        ));
    }

    #[test]
    fn test_random_policy_extremes() {
        assert!(!FailurePolicy::Random { rate: 0.0 }.declines());
        assert!(FailurePolicy::Random { rate: 1.0 }.declines());
        assert_eq!(FailurePolicy::default(), FailurePolicy::Random { rate: 0.1 });
    }

    #[tokio::test]
    async fn test_submit_waits_for_delay() {
        let delay = Duration::from_millis(50);
        let gateway = MockCheckoutGateway::new(delay, FailurePolicy::Never);
        let payload = CheckoutPayload {
            items: Vec::new(),
            form_data: crate::test_support::validated_form(),
            total: dec!(5.40),
        };

        let started = std::time::Instant::now();
        let confirmation = gateway.submit(&payload).await.unwrap();
        assert!(started.elapsed() >= delay);
        assert_eq!(confirmation.total, dec!(5.40));
    }
}
