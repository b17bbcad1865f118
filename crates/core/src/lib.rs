//! GameStore Core - Shared types library.
//!
//! This crate provides the domain types and pure state reducers used across
//! all GameStore components:
//! - `storefront` - HTTP storefront and mock catalog/checkout API
//! - `cli` - Command-line shopper for the same persisted state
//!
//! # Architecture
//!
//! The core crate contains only types and reducers - no I/O, no storage, no
//! HTTP clients. Persistence and submission are side effects owned by the
//! storefront crate, which keeps everything here testable in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and emails
//! - [`game`] - Catalog game snapshot
//! - [`cart`] - Cart ledger with stock clamping and discount-aware totals
//! - [`auth`] - Authenticated identity flag
//! - [`checkout`] - Checkout form validation, tax policy and wire payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod game;
pub mod types;

pub use auth::{AuthFlag, AuthIdentity};
pub use cart::{CartEntry, CartLedger, PriceSummary};
pub use checkout::{
    CheckoutForm, CheckoutPayload, Field, OrderConfirmation, ValidatedCheckout, ValidationErrors,
};
pub use game::{Game, SystemRequirements};
pub use types::*;
