//! Integration tests for GameStore.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p game-store-integration-tests
//! ```
//!
//! Each test starts its own storefront on `127.0.0.1:0` with state in a
//! temporary directory, the bundled catalog, and a zero-delay mock payment
//! processor. Nothing external is required.
//!
//! # Test Categories
//!
//! - `storefront_api` - Catalog, cart, auth and checkout endpoints
//! - `mock_api` - The `/api` endpoints a remote storefront talks to
//! - `remote_backends` - A storefront using another one as catalog and checkout

use std::sync::Arc;
use std::time::Duration;

use game_store_storefront::catalog::{Catalog, FixtureCatalog};
use game_store_storefront::checkout::{CheckoutBackend, FailurePolicy, MockCheckoutGateway};
use game_store_storefront::config::StorefrontConfig;
use game_store_storefront::routes;
use game_store_storefront::state::AppState;
use game_store_storefront::storage::JsonFileStore;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use url::Url;

/// A running storefront with its own data directory.
pub struct TestServer {
    pub client: Client,
    pub base_url: Url,
    pub state: AppState,
    data_dir: TempDir,
}

impl TestServer {
    /// Storefront whose payments always succeed.
    pub async fn start() -> Self {
        Self::with_policy(FailurePolicy::Never).await
    }

    /// Storefront whose mock processor follows `policy`.
    pub async fn with_policy(policy: FailurePolicy) -> Self {
        let catalog = Catalog::Fixture(FixtureCatalog::bundled().expect("bundled catalog"));
        let mock = MockCheckoutGateway::new(Duration::ZERO, policy);
        Self::with_backends(catalog, CheckoutBackend::Mock(mock.clone()), mock).await
    }

    /// Storefront with explicit catalog and checkout backends.
    pub async fn with_backends(
        catalog: Catalog,
        backend: CheckoutBackend,
        mock_processor: MockCheckoutGateway,
    ) -> Self {
        let data_dir = TempDir::new().expect("Failed to create temp dir");
        Self::serve(data_dir, catalog, backend, mock_processor).await
    }

    /// Start a fresh server on this server's data directory.
    ///
    /// The old listener keeps running; only its handle is dropped. Used to
    /// check that cart and auth state survive a restart.
    pub async fn restart(self) -> Self {
        let catalog = self.state.catalog().clone();
        let backend = CheckoutBackend::Mock(MockCheckoutGateway::new(
            Duration::ZERO,
            FailurePolicy::Never,
        ));
        let mock = self.state.mock_processor().clone();
        Self::serve(self.data_dir, catalog, backend, mock).await
    }

    async fn serve(
        data_dir: TempDir,
        catalog: Catalog,
        backend: CheckoutBackend,
        mock_processor: MockCheckoutGateway,
    ) -> Self {
        let config = StorefrontConfig {
            data_dir: data_dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };
        let storage = Arc::new(JsonFileStore::open(data_dir.path()).expect("state store"));
        let state = AppState::new(config, catalog, storage, backend, mock_processor);
        let app = routes::app(state.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = Url::parse(&format!("http://{addr}")).expect("base url");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server error");
        });

        Self {
            client: Client::new(),
            base_url,
            state,
            data_dir,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("valid path")
    }

    /// GET `path` and decode the JSON body (`Null` when empty).
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed");
        decode(response).await
    }

    /// POST `body` as JSON to `path` and decode the JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed");
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.bytes().await.expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

/// A checkout form that passes validation.
#[must_use]
pub fn valid_checkout_form() -> Value {
    serde_json::json!({
        "email": "buyer@example.com",
        "name": "Ada Lovelace",
        "address": "12 Analytical Way",
        "cardNumber": "4242424242424242",
        "expiryDate": "12/29",
        "cvc": "123"
    })
}
