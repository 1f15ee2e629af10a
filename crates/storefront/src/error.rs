//! Cart persistence errors.
//!
//! [`CartError`] is what the persistence path produces internally. Cart
//! mutations never hand it to callers: load failures collapse to an empty
//! cart and write failures are logged. [`crate::CartStore::persist`] is the
//! one place it is returned, for callers that want to react to a failed
//! write.

use bistro_core::CartStateError;
use thiserror::Error;

/// Errors from loading or saving a cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage backend failed to read or write the slot.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The slot does not hold a JSON array of line records.
    #[error("Malformed cart data: {0}")]
    Decode(#[source] serde_json::Error),

    /// The lines parse but break a cart invariant.
    #[error("Invalid cart data: {0}")]
    InvalidState(#[from] CartStateError),

    /// The in-memory cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CartError {
    /// Wrap a backend error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }

    /// Whether the error came from unreadable persisted data rather than
    /// from the backend itself.
    #[must_use]
    pub const fn is_corrupt_data(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::InvalidState(_))
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
