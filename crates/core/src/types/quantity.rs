//! Unit counts for cart lines.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// A line cannot hold zero units; it is removed instead.
    #[error("quantity must be at least 1")]
    Zero,
}

/// A positive count of units on a cart line.
///
/// A `Quantity` is never zero. Decrementing a quantity of one yields `None`,
/// which callers treat as "remove the line".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] if `count` is zero.
    pub const fn new(count: u32) -> Result<Self, QuantityError> {
        if count == 0 {
            return Err(QuantityError::Zero);
        }
        Ok(Self(count))
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more unit, saturating at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer unit, or `None` if this is the last one.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
