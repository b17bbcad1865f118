//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Demo account login and signup checks
//!
//! Checkout orchestration lives in [`crate::checkout`].

pub mod auth;
