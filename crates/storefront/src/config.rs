//! Storefront configuration loaded from environment variables.
//!
//! Every variable is optional; the defaults run a self-contained store
//! backed by the bundled catalog fixture and the in-process mock checkout.
//!
//! # Environment Variables
//!
//! - `GAMESTORE_HOST` - Bind address (default: 127.0.0.1)
//! - `GAMESTORE_PORT` - Listen port (default: 3000)
//! - `GAMESTORE_DATA_DIR` - Directory for persisted cart/auth state (default: ./data)
//! - `GAMESTORE_CATALOG_PATH` - JSON file replacing the bundled catalog fixture
//! - `GAMESTORE_CATALOG_URL` - Base URL of a remote catalog API (overrides the fixture)
//! - `GAMESTORE_CHECKOUT_URL` - Base URL of a remote checkout API (default: in-process mock)
//! - `GAMESTORE_CHECKOUT_DELAY_MS` - Mock payment processing delay (default: 2000)
//! - `GAMESTORE_CHECKOUT_FAILURE_RATE` - Mock rejection probability in [0, 1] (default: 0.1)
//! - `GAMESTORE_HTTP_TIMEOUT_SECS` - Timeout for outbound HTTP calls (default: 30)
//! - `GAMESTORE_DEMO_NAME` - Display name of the demo account (default: Demo User)
//! - `GAMESTORE_DEMO_EMAIL` - Demo account email (default: user@example.com)
//! - `GAMESTORE_DEMO_PASSWORD` - Demo account password (default: password123)
//! - `GAMESTORE_LOG_JSON` - Emit JSON logs when `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the persisted cart and auth records
    pub data_dir: PathBuf,
    /// Catalog source selection
    pub catalog: CatalogConfig,
    /// Checkout gateway selection
    pub checkout: CheckoutConfig,
    /// Demo account accepted by the login form
    pub demo_account: DemoAccountConfig,
    /// Timeout applied to outbound HTTP clients
    pub http_timeout: Duration,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogConfig {
    /// The fixture compiled into the binary.
    Bundled,
    /// A JSON fixture on disk.
    File(PathBuf),
    /// A remote catalog API.
    Remote(Url),
}

/// Where checkout submissions go.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutConfig {
    /// In-process mock payment processor.
    Mock {
        delay: Duration,
        failure_rate: f64,
    },
    /// A remote checkout API.
    Remote(Url),
}

/// Demo login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DemoAccountConfig {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl std::fmt::Debug for DemoAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoAccountConfig")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for DemoAccountConfig {
    fn default() -> Self {
        Self {
            name: "Demo User".to_owned(),
            email: "user@example.com".to_owned(),
            password: SecretString::from("password123"),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: PathBuf::from("data"),
            catalog: CatalogConfig::Bundled,
            checkout: CheckoutConfig::Mock {
                delay: Duration::from_millis(DEFAULT_CHECKOUT_DELAY_MS),
                failure_rate: DEFAULT_FAILURE_RATE,
            },
            demo_account: DemoAccountConfig::default(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

const DEFAULT_CHECKOUT_DELAY_MS: u64 = 2000;
const DEFAULT_FAILURE_RATE: f64 = 0.1;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("GAMESTORE_HOST", "127.0.0.1")?;
        let port = parse_env("GAMESTORE_PORT", "3000")?;
        let data_dir = PathBuf::from(get_env_or_default("GAMESTORE_DATA_DIR", "data"));

        let catalog = match (
            get_optional_env("GAMESTORE_CATALOG_URL"),
            get_optional_env("GAMESTORE_CATALOG_PATH"),
        ) {
            (Some(url), _) => CatalogConfig::Remote(parse_url("GAMESTORE_CATALOG_URL", &url)?),
            (None, Some(path)) => CatalogConfig::File(PathBuf::from(path)),
            (None, None) => CatalogConfig::Bundled,
        };

        let checkout = match get_optional_env("GAMESTORE_CHECKOUT_URL") {
            Some(url) => CheckoutConfig::Remote(parse_url("GAMESTORE_CHECKOUT_URL", &url)?),
            None => CheckoutConfig::Mock {
                delay: Duration::from_millis(parse_env(
                    "GAMESTORE_CHECKOUT_DELAY_MS",
                    &DEFAULT_CHECKOUT_DELAY_MS.to_string(),
                )?),
                failure_rate: parse_failure_rate(&get_env_or_default(
                    "GAMESTORE_CHECKOUT_FAILURE_RATE",
                    &DEFAULT_FAILURE_RATE.to_string(),
                ))?,
            },
        };

        let defaults = DemoAccountConfig::default();
        let demo_account = DemoAccountConfig {
            name: get_optional_env("GAMESTORE_DEMO_NAME").unwrap_or(defaults.name),
            email: get_optional_env("GAMESTORE_DEMO_EMAIL").unwrap_or(defaults.email),
            password: get_optional_env("GAMESTORE_DEMO_PASSWORD")
                .map_or(defaults.password, SecretString::from),
        };

        let http_timeout = Duration::from_secs(parse_env(
            "GAMESTORE_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )?);
        let log_json = parse_env("GAMESTORE_LOG_JSON", "false")?;

        Ok(Self {
            host,
            port,
            data_dir,
            catalog,
            checkout,
            demo_account,
            http_timeout,
            log_json,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a probability, rejecting values outside `[0, 1]`.
fn parse_failure_rate(value: &str) -> Result<f64, ConfigError> {
    const KEY: &str = "GAMESTORE_CHECKOUT_FAILURE_RATE";
    let rate = value
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidEnvVar(KEY.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            KEY.to_string(),
            format!("must be between 0 and 1 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_rate_bounds() {
        assert!((parse_failure_rate("0").unwrap() - 0.0).abs() < f64::EPSILON);
        assert!((parse_failure_rate("1").unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((parse_failure_rate("0.1").unwrap() - 0.1).abs() < f64::EPSILON);
        assert!(parse_failure_rate("1.5").is_err());
        assert!(parse_failure_rate("-0.1").is_err());
        assert!(parse_failure_rate("often").is_err());
    }

    #[test]
    fn test_parse_url_rejects_garbage() {
        assert!(parse_url("TEST_URL", "http://localhost:4000").is_ok());
        let err = parse_url("TEST_URL", "not a url").unwrap_err();
        assert!(err.to_string().contains("TEST_URL"));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            port: 4100,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 4100);
    }

    #[test]
    fn test_default_checkout_is_mock() {
        let config = StorefrontConfig::default();
        assert!(matches!(
            config.checkout,
            CheckoutConfig::Mock { delay, .. } if delay == Duration::from_secs(2)
        ));
        assert_eq!(config.catalog, CatalogConfig::Bundled);
    }

    #[test]
    fn test_demo_account_debug_redacts_password() {
        let config = DemoAccountConfig {
            name: "Demo User".to_string(),
            email: "user@example.com".to_string(),
            password: SecretString::from("super_secret_password"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("user@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
    }
}
