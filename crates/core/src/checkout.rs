//! Checkout form validation and submission payloads.
//!
//! [`validate`] checks every field of a [`CheckoutForm`] and reports one
//! message per failing field, in form order. Only a fully valid form becomes
//! a [`ValidatedCheckout`], which is the only form type a
//! [`CheckoutPayload`] accepts.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::cart::{CartEntry, CartLedger};
use crate::types::{Email, OrderId, with_tax};

static EXPIRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/?([0-9]{2})$").expect("Invalid regex"));

static CVC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("Invalid regex"));

const MIN_NAME_CHARS: usize = 2;
const MIN_ADDRESS_CHARS: usize = 5;
const CARD_DIGITS: usize = 16;

/// Checkout form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Email,
    Name,
    Address,
    CardNumber,
    ExpiryDate,
    Cvc,
}

impl Field {
    /// Wire name of the field (camelCase, as submitted by forms).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Address => "address",
            Self::CardNumber => "cardNumber",
            Self::ExpiryDate => "expiryDate",
            Self::Cvc => "cvc",
        }
    }

    /// Message shown next to the field when it fails validation.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Email => "Invalid email address.",
            Self::Name => "Name must be at least 2 characters.",
            Self::Address => "Address must be at least 5 characters.",
            Self::CardNumber => "Card number must be 16 digits.",
            Self::ExpiryDate => "Must be in MM/YY format.",
            Self::Cvc => "CVC must be 3 digits.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation failures.
///
/// Serializes as a JSON object of field name to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<Field>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Failing fields with their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.fields.iter().map(|f| (*f, f.message()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, message) in self.iter() {
            map.serialize_entry(field.as_str(), message)?;
        }
        map.end()
    }
}

/// Raw checkout form as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub cvc: String,
}

/// Checkout form that passed every rule.
///
/// The card number is stored with whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedCheckout {
    pub email: Email,
    pub name: String,
    pub address: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvc: String,
}

impl ValidatedCheckout {
    /// Last four card digits, for logs and receipts.
    #[must_use]
    pub fn card_last4(&self) -> &str {
        let len = self.card_number.len();
        self.card_number.get(len.saturating_sub(4)..).unwrap_or("")
    }
}

/// Check every field of `form`.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing each failing field once.
pub fn validate(form: &CheckoutForm) -> Result<ValidatedCheckout, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let email = Email::parse(&form.email).ok();
    if email.is_none() {
        errors.push(Field::Email);
    }

    if form.name.chars().count() < MIN_NAME_CHARS {
        errors.push(Field::Name);
    }

    if form.address.chars().count() < MIN_ADDRESS_CHARS {
        errors.push(Field::Address);
    }

    let card_number: String = form
        .card_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if card_number.len() != CARD_DIGITS || !card_number.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(Field::CardNumber);
    }

    if !EXPIRY_PATTERN.is_match(&form.expiry_date) {
        errors.push(Field::ExpiryDate);
    }

    if !CVC_PATTERN.is_match(&form.cvc) {
        errors.push(Field::Cvc);
    }

    match email {
        Some(email) if errors.is_empty() => Ok(ValidatedCheckout {
            email,
            name: form.name.clone(),
            address: form.address.clone(),
            card_number,
            expiry_date: form.expiry_date.clone(),
            cvc: form.cvc.clone(),
        }),
        _ => Err(errors),
    }
}

/// Everything sent to the checkout service for one attempt.
///
/// A snapshot: later cart changes do not affect a payload already built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub items: Vec<CartEntry>,
    pub form_data: ValidatedCheckout,
    /// Subtotal plus 8% tax.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl CheckoutPayload {
    /// Snapshot `cart` and compute the taxed total.
    #[must_use]
    pub fn new(cart: &CartLedger, form_data: ValidatedCheckout) -> Self {
        Self {
            items: cart.entries().to_vec(),
            form_data,
            total: with_tax(cart.total_price()),
        }
    }
}

/// Order accepted by the checkout service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}
