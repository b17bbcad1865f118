//! Catalog game snapshot.
//!
//! A [`Game`] is an immutable copy of a catalog record. The cart keeps the
//! snapshot taken at add time, so later catalog changes do not alter the
//! price of an item already in the cart.
//!
//! The JSON shape matches the catalog API: camelCase keys and plain JSON
//! numbers for money.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::GameId;

/// Minimum hardware and OS for a PC title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRequirements {
    pub os: String,
    pub cpu: String,
    pub ram: String,
    pub gpu: String,
    pub storage: String,
}

/// A game as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub genre: Vec<String>,
    pub platforms: Vec<String>,
    /// Base price, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Discount fraction in `[0, 1)`.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount: Option<Decimal>,
    pub images: Vec<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    /// Average review score in `[0, 5]`.
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    pub release_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_requirements: Option<SystemRequirements>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub stock: u32,
}

impl Game {
    /// Whether a positive discount applies.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount.is_some_and(|d| d > Decimal::ZERO)
    }

    /// Price after discount.
    ///
    /// `price × (1 − discount)` when a positive discount is present,
    /// otherwise the base price. Kept at full precision.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.discount {
            Some(discount) if discount > Decimal::ZERO => self.price * (Decimal::ONE - discount),
            _ => self.price,
        }
    }

    /// Discount as a whole percentage for badges (`0.25` → `25`).
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        self.discount
            .filter(|d| *d > Decimal::ZERO)
            .map(|d| (d * Decimal::ONE_HUNDRED).round())
    }

    /// Free-to-play titles have a zero base price.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// First genre tag, used for home page grouping.
    #[must_use]
    pub fn primary_genre(&self) -> Option<&str> {
        self.genre.first().map(String::as_str)
    }
}
