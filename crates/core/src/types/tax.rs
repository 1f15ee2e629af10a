//! Sales tax rate applied to cart subtotals.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`TaxRate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxRateError {
    /// The rate is below zero.
    #[error("tax rate cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("tax rate must be a decimal fraction such as 0.10: {0}")]
    Parse(String),
}

/// A tax rate expressed as a decimal fraction (`0.10` is 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Create a tax rate from a decimal fraction.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRateError::Negative`] if `rate` is below zero.
    pub fn new(rate: Decimal) -> Result<Self, TaxRateError> {
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(TaxRateError::Negative(rate));
        }
        Ok(Self(rate))
    }

    /// The rate as a fraction.
    #[must_use]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Tax owed on `subtotal`, rounded half-to-even to cents.
    #[must_use]
    pub fn apply(&self, subtotal: Decimal) -> Decimal {
        (subtotal * self.0).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }
}

impl Default for TaxRate {
    /// 10%, the rate the restaurant charges today.
    fn default() -> Self {
        Self(Decimal::new(10, 2))
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = TaxRateError;

    fn try_from(rate: Decimal) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

impl FromStr for TaxRate {
    type Err = TaxRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rate = Decimal::from_str(s.trim()).map_err(|e| TaxRateError::Parse(e.to_string()))?;
        Self::new(rate)
    }
}

impl fmt::Display for TaxRate {
    /// Renders as a percentage, e.g. `10%` or `8.25%`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = (self.0 * Decimal::ONE_HUNDRED).normalize();
        write!(f, "{percent}%")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ten_percent() {
        assert_eq!(TaxRate::default().fraction(), Decimal::new(1, 1));
        assert_eq!(TaxRate::default().to_string(), "10%");
    }

    #[test]
    fn test_parse() {
        let rate: TaxRate = "0.0825".parse().unwrap();
        assert_eq!(rate.to_string(), "8.25%");
        assert!(matches!("-0.1".parse::<TaxRate>(), Err(TaxRateError::Negative(_))));
        assert!(matches!("ten".parse::<TaxRate>(), Err(TaxRateError::Parse(_))));
    }

    #[test]
    fn test_apply_rounds_to_cents() {
        let rate = TaxRate::default();
        assert_eq!(rate.apply(Decimal::new(3050, 2)), Decimal::new(305, 2));
        // 0.125 rounds to even
        assert_eq!(rate.apply(Decimal::new(125, 2)), Decimal::new(12, 2));
    }

    #[test]
    fn test_zero_rate() {
        let rate = TaxRate::new(Decimal::ZERO).unwrap();
        assert_eq!(rate.apply(Decimal::new(999, 2)), Decimal::ZERO);
    }
}
