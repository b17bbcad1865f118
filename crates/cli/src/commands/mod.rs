//! CLI subcommands.
//!
//! Every command prints its result as pretty JSON on stdout.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

use serde::Serialize;
use thiserror::Error;

use game_store_storefront::catalog::CatalogError;
use game_store_storefront::checkout::CheckoutError;
use game_store_storefront::config::ConfigError;
use game_store_storefront::services::auth::AuthError;
use game_store_storefront::state::StateError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("startup: {0}")]
    State(#[from] StateError),

    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("checkout: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    /// The game cannot be added because none are left.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print `value` as pretty JSON.
#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
