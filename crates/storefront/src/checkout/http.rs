//! Remote checkout API client.

use std::time::Duration;

use game_store_core::{CheckoutPayload, OrderConfirmation};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::gateway::{CheckoutGateway, SubmissionError};

/// Error body returned by the checkout API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Posts payloads to `{base_url}/api/checkout`.
#[derive(Debug, Clone)]
pub struct HttpCheckoutGateway {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpCheckoutGateway {
    /// Create a client for the checkout API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint = endpoint(base_url);
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub const fn endpoint_url(&self) -> &Url {
        &self.endpoint
    }
}

fn endpoint(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    let path = format!("{}/api/checkout", base_url.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}

impl CheckoutGateway for HttpCheckoutGateway {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, total = %payload.total))]
    async fn submit(&self, payload: &CheckoutPayload) -> Result<OrderConfirmation, SubmissionError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map_or_else(|_| status.to_string(), |body| body.message);
            tracing::warn!(status = status.as_u16(), %message, "Checkout rejected");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let confirmation: OrderConfirmation = response.json().await?;
        tracing::info!(order_id = %confirmation.order_id, "Checkout accepted");
        Ok(confirmation)
    }
}
