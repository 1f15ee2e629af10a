//! Cart line items and the ordered collection that holds them.
//!
//! [`CartState`] owns the mutation rules:
//!
//! - At most one [`LineItem`] per [`MenuItemId`]. Adding an ID that is already
//!   present bumps its quantity and keeps the existing name and price.
//! - A line never holds zero units. Decrementing the last unit removes the
//!   line.
//! - Lines keep insertion order.
//!
//! Persistence and logging live in the storefront crate; this module is pure.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::MenuItemId;
use super::price::Price;
use super::quantity::Quantity;

/// A product a producer wants to put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCandidate {
    pub id: MenuItemId,
    pub name: String,
    pub price: Price,
}

impl CartCandidate {
    /// Create a new candidate.
    #[must_use]
    pub fn new(id: MenuItemId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable catalog identifier.
    pub id: MenuItemId,
    /// Display name captured when the line was created.
    pub name: String,
    /// Unit price captured when the line was created.
    pub price: Price,
    /// Units of this product in the cart.
    pub quantity: Quantity,
}

impl LineItem {
    /// Price of all units on this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.times(self.quantity)
    }
}

impl From<CartCandidate> for LineItem {
    fn from(candidate: CartCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            price: candidate.price,
            quantity: Quantity::ONE,
        }
    }
}

/// Errors for a sequence of lines that cannot form a cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartStateError {
    /// Two lines share the same ID.
    #[error("duplicate line for item {0}")]
    DuplicateItem(MenuItemId),
}

/// What [`CartState::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with a single unit.
    Inserted,
    /// An existing line now holds `quantity` units.
    Incremented { quantity: Quantity },
}

/// What [`CartState::remove`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// No line with that ID exists.
    NotFound,
    /// The line lost one unit and still holds `quantity`.
    Decremented { quantity: Quantity },
    /// The line is gone.
    Removed,
}

impl RemoveOutcome {
    /// Whether the cart changed.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// The ordered collection of lines in a cart.
///
/// Serializes as a bare JSON array of line records. Deserialization runs the
/// same validation as [`TryFrom<Vec<LineItem>>`], so a persisted cart with a
/// duplicate ID is rejected as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of line totals, before tax.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Add one unit of `candidate`.
    ///
    /// If the ID is already in the cart its quantity goes up by one and the
    /// candidate's name and price are ignored. Otherwise a new line is
    /// appended.
    pub fn add(&mut self, candidate: CartCandidate) -> AddOutcome {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == candidate.id) {
            existing.quantity = existing.quantity.increment();
            return AddOutcome::Incremented {
                quantity: existing.quantity,
            };
        }

        self.items.push(LineItem::from(candidate));
        AddOutcome::Inserted
    }

    /// Remove `id` from the cart, or take one unit off it when `decrement`
    /// is set and more than one unit remains.
    pub fn remove(&mut self, id: MenuItemId, decrement: bool) -> RemoveOutcome {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return RemoveOutcome::NotFound;
        };

        let decremented = if decrement {
            self.items.get_mut(index).and_then(|line| {
                let quantity = line.quantity.decrement()?;
                line.quantity = quantity;
                Some(quantity)
            })
        } else {
            None
        };
        if let Some(quantity) = decremented {
            return RemoveOutcome::Decremented { quantity };
        }

        self.items.remove(index);
        RemoveOutcome::Removed
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl TryFrom<Vec<LineItem>> for CartState {
    type Error = CartStateError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CartStateError::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }
}

impl From<CartState> for Vec<LineItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}
