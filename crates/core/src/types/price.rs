//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel as plain JSON numbers (`9`, `12.5`) so the persisted cart
//! stays readable by anything that understands the `{id, name, price,
//! quantity}` record shape. Numeric strings are accepted on input as well.
//!
//! A JSON number is read back through `f64`, so a price is only valid if it
//! survives that trip unchanged. Anything finer is rejected at construction
//! rather than silently rounded on the next reload.

use core::fmt;

use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

use super::quantity::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount has more significant digits than a JSON number keeps.
    #[error("price {0} cannot be stored without losing precision")]
    TooPrecise(Decimal),
}

/// A non-negative unit price in the store's currency.
///
/// ## Examples
///
/// ```
/// use bistro_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::from_cents(950).unwrap();
/// assert_eq!(price.amount(), Decimal::new(950, 2));
/// assert_eq!(price.to_string(), "$9.50");
///
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero, or
    /// [`PriceError::TooPrecise`] if it would not survive serialization.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if !survives_float(amount) {
            return Err(PriceError::TooPrecise(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a count of cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Create a price from an unsigned count of cents. Never fails.
    #[must_use]
    pub fn from_unsigned_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: Quantity) -> Decimal {
        self.0 * Decimal::from(quantity.get())
    }
}

/// Whether `amount` reads back equal after going out as an `f64`.
fn survives_float(amount: Decimal) -> bool {
    amount
        .to_f64()
        .and_then(|float| Decimal::from_str(&float.to_string()).ok())
        .is_some_and(|back| back == amount)
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format_money(self.0))
    }
}

/// Format a decimal amount for display (e.g., `$19.99`).
///
/// Amounts are rounded half-to-even to two decimal places.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}
