//! Core types for Bistro.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod quantity;
pub mod tax;

pub use cart::{AddOutcome, CartCandidate, CartState, CartStateError, LineItem, RemoveOutcome};
pub use id::*;
pub use price::{Price, PriceError, format_money};
pub use quantity::{Quantity, QuantityError};
pub use tax::{TaxRate, TaxRateError};
