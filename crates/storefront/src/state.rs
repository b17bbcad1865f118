//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::checkout::{CheckoutBackend, CheckoutService, MockCheckoutGateway, SubmissionError};
use crate::config::StorefrontConfig;
use crate::services::auth::DemoAuthenticator;
use crate::storage::{JsonFileStore, StateStore, StateStoreError};
use crate::stores::{AuthStore, CartStore};

/// Error assembling application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state storage: {0}")]
    Storage(#[from] StateStoreError),
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("checkout gateway: {0}")]
    Checkout(#[from] SubmissionError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the shopper's cart and auth containers, and checkout.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
    auth: AuthStore,
    checkout: CheckoutService<CheckoutBackend>,
    authenticator: DemoAuthenticator,
    mock_processor: MockCheckoutGateway,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// Opens the JSON state files under `config.data_dir`, loads the catalog
    /// and selects the checkout gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the catalog
    /// cannot be loaded, or an HTTP client cannot be built.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StateError> {
        let storage: Arc<dyn StateStore> = Arc::new(JsonFileStore::open(&config.data_dir)?);
        let catalog = Catalog::from_config(&config.catalog, config.http_timeout)?;
        let backend = CheckoutBackend::from_config(&config.checkout, config.http_timeout)?;
        let mock_processor = match &backend {
            CheckoutBackend::Mock(mock) => mock.clone(),
            CheckoutBackend::Http(_) => MockCheckoutGateway::default(),
        };

        Ok(Self::new(config, catalog, storage, backend, mock_processor))
    }

    /// Assemble state from already-built parts.
    ///
    /// `mock_processor` answers the mock API's `/api/checkout` endpoint;
    /// `backend` is what storefront checkout submits to.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: Arc<dyn StateStore>,
        backend: CheckoutBackend,
        mock_processor: MockCheckoutGateway,
    ) -> Self {
        let cart = CartStore::open(storage.clone());
        let auth = AuthStore::open(storage);
        let checkout = CheckoutService::new(cart.clone(), backend);
        let authenticator = DemoAuthenticator::new(config.demo_account.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                auth,
                checkout,
                authenticator,
                mock_processor,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutService<CheckoutBackend> {
        &self.inner.checkout
    }

    #[must_use]
    pub fn authenticator(&self) -> &DemoAuthenticator {
        &self.inner.authenticator
    }

    /// Payment processor behind the mock API.
    #[must_use]
    pub fn mock_processor(&self) -> &MockCheckoutGateway {
        &self.inner.mock_processor
    }
}
