//! The cart store.
//!
//! [`CartStore`] owns the customer's [`CartState`] and the storage backend
//! it is mirrored to. Every change is written through to the slot before the
//! mutating call returns.
//!
//! # Example
//!
//! ```
//! use bistro_core::{CartCandidate, MenuItemId, Price};
//! use bistro_storefront::{CartStore, MemoryStorage};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartStore::initialize(MemoryStorage::new(), "cartItems");
//! let mousse = CartCandidate::new(
//!     MenuItemId::new(1),
//!     "Duck Liver Mousse",
//!     Price::new(Decimal::from(9)).unwrap(),
//! );
//!
//! cart.add_item(mousse.clone());
//! cart.add_item(mousse);
//! assert_eq!(cart.items()[0].quantity.get(), 2);
//!
//! cart.remove_item(MenuItemId::new(1), true);
//! assert_eq!(cart.items()[0].quantity.get(), 1);
//! ```

use bistro_core::{
    AddOutcome, CartCandidate, CartState, LineItem, MenuItemId, RemoveOutcome, TaxRate,
};
use tracing::{debug, info, instrument, warn};

use crate::error::{CartError, Result};
use crate::storage::CartStorage;
use crate::summary::CartSummary;

/// Slot key the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cartItems";

/// Read and validate the cart persisted under `key`.
///
/// Returns `Ok(None)` when nothing has been persisted yet.
///
/// # Errors
///
/// - [`CartError::Storage`] if the backend read fails
/// - [`CartError::Decode`] if the slot is not a JSON array of line records
/// - [`CartError::InvalidState`] if the lines repeat an ID
pub fn load_state<S: CartStorage>(storage: &S, key: &str) -> Result<Option<CartState>> {
    let Some(raw) = storage.read(key).map_err(CartError::storage)? else {
        return Ok(None);
    };

    let items: Vec<LineItem> = serde_json::from_str(&raw).map_err(CartError::Decode)?;
    let state = CartState::try_from(items)?;
    Ok(Some(state))
}

/// Serialize `state` and write it under `key`.
///
/// # Errors
///
/// Returns [`CartError::Encode`] or [`CartError::Storage`].
pub fn save_state<S: CartStorage>(storage: &mut S, key: &str, state: &CartState) -> Result<()> {
    let raw = serde_json::to_string(state).map_err(CartError::Encode)?;
    storage.write(key, &raw).map_err(CartError::storage)
}

/// The single source of truth for a customer's cart.
///
/// Create one per session with [`CartStore::initialize`] and pass it by
/// reference to whatever needs to read or change the cart.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: String,
    state: CartState,
}

impl<S: CartStorage> CartStore<S> {
    /// Restore the cart persisted under `key`, or start empty.
    ///
    /// Never fails. A missing slot, a backend read error or malformed data
    /// all yield an empty cart; the latter two are logged at `warn`.
    #[instrument(skip(storage, key), fields(key))]
    pub fn initialize(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        tracing::Span::current().record("key", key.as_str());

        let state = match load_state(&storage, &key) {
            Ok(Some(state)) => {
                info!(
                    items = state.len(),
                    units = state.total_quantity(),
                    "Restored persisted cart"
                );
                state
            }
            Ok(None) => {
                debug!("No persisted cart, starting empty");
                CartState::new()
            }
            Err(e) if e.is_corrupt_data() => {
                warn!(error = %e, "Discarding unreadable persisted cart");
                CartState::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                CartState::new()
            }
        };

        Self {
            storage,
            key,
            state,
        }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// The current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&LineItem> {
        self.state.get(id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.state.total_quantity()
    }

    /// Totals at `tax_rate`.
    #[must_use]
    pub fn summary(&self, tax_rate: TaxRate) -> CartSummary {
        CartSummary::compute(self.items(), tax_rate)
    }

    /// The slot key this cart persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add one unit of `candidate`.
    ///
    /// An ID already in the cart gains a unit and keeps its original name
    /// and price. A new ID is appended with a quantity of one.
    #[instrument(level = "debug", skip(self, candidate), fields(id = %candidate.id))]
    pub fn add_item(&mut self, candidate: CartCandidate) -> AddOutcome {
        let outcome = self.state.add(candidate);
        match outcome {
            AddOutcome::Inserted => debug!("Added new line"),
            AddOutcome::Incremented { quantity } => debug!(%quantity, "Incremented line"),
        }
        self.write_through();
        outcome
    }

    /// Remove `id`, or take a single unit off it when `decrement` is set.
    ///
    /// A decrement on the last unit removes the line. An unknown ID is left
    /// alone and nothing is written.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_item(&mut self, id: MenuItemId, decrement: bool) -> RemoveOutcome {
        let outcome = self.state.remove(id, decrement);
        match outcome {
            RemoveOutcome::NotFound => {
                debug!("Item not in cart, nothing to remove");
                return outcome;
            }
            RemoveOutcome::Decremented { quantity } => debug!(%quantity, "Decremented line"),
            RemoveOutcome::Removed => debug!("Removed line"),
        }
        self.write_through();
        outcome
    }

    /// Empty the cart.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.state.clear();
        self.write_through();
    }

    /// Write the current state to the slot.
    ///
    /// Mutations already call this and log any failure; call it directly to
    /// find out whether the last write landed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Encode`] or [`CartError::Storage`].
    pub fn persist(&mut self) -> Result<()> {
        save_state(&mut self.storage, &self.key, &self.state)
    }

    fn write_through(&mut self) {
        if let Err(e) = self.persist() {
            warn!(key = %self.key, error = %e, "Failed to persist cart, keeping in-memory state");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use bistro_core::{Price, Quantity};
    use rust_decimal::Decimal;

    /// Backend whose reads and writes can be made to fail.
    #[derive(Debug, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_reads: bool,
        fail_writes: bool,
        writes: usize,
    }

    impl CartStorage for FlakyStorage {
        type Error = std::io::Error;

        fn read(&self, key: &str) -> std::result::Result<Option<String>, Self::Error> {
            if self.fail_reads {
                return Err(std::io::Error::other("read denied"));
            }
            Ok(self.inner.get(key).map(str::to_string))
        }

        fn write(&mut self, key: &str, value: &str) -> std::result::Result<(), Self::Error> {
            self.writes += 1;
            if self.fail_writes {
                return Err(std::io::Error::other("quota exceeded"));
            }
            self.inner.write(key, value).map_err(|e| match e {})
        }

        fn remove(&mut self, key: &str) -> std::result::Result<(), Self::Error> {
            self.inner.remove(key).map_err(|e| match e {})
        }
    }

    fn mousse() -> CartCandidate {
        CartCandidate::new(
            MenuItemId::new(1),
            "Duck Liver Mousse",
            Price::new(Decimal::from(9)).unwrap(),
        )
    }

    fn steak() -> CartCandidate {
        CartCandidate::new(
            MenuItemId::new(2),
            "Steak Frites",
            Price::new(Decimal::from(28)).unwrap(),
        )
    }

    fn empty_store() -> CartStore<MemoryStorage> {
        CartStore::initialize(MemoryStorage::new(), DEFAULT_CART_KEY)
    }

    fn persisted(store: &CartStore<MemoryStorage>) -> serde_json::Value {
        serde_json::from_str(store.storage().get(DEFAULT_CART_KEY).unwrap()).unwrap()
    }

    #[test]
    fn test_initialize_without_slot_is_empty() {
        let store = empty_store();
        assert!(store.is_empty());
        assert!(store.storage().get(DEFAULT_CART_KEY).is_none());
    }

    #[test]
    fn test_add_twice_increments() {
        let mut store = empty_store();
        store.add_item(mousse());
        store.add_item(mousse());

        assert_eq!(
            persisted(&store),
            serde_json::json!([
                {"id": 1, "name": "Duck Liver Mousse", "price": 9.0, "quantity": 2}
            ])
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].quantity, Quantity::new(2).unwrap());
    }

    #[test]
    fn test_decrement_then_remove_last_unit() {
        let mut store = empty_store();
        store.add_item(mousse());
        store.add_item(mousse());

        store.remove_item(MenuItemId::new(1), true);
        assert_eq!(store.items()[0].quantity, Quantity::ONE);

        store.remove_item(MenuItemId::new(1), true);
        assert!(store.is_empty());
        assert_eq!(persisted(&store), serde_json::json!([]));
    }

    #[test]
    fn test_remove_without_decrement() {
        let mut store = empty_store();
        store.add_item(steak());
        store.add_item(steak());
        store.add_item(steak());

        assert_eq!(store.remove_item(MenuItemId::new(2), false), RemoveOutcome::Removed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_unknown_on_empty_cart() {
        let mut store = empty_store();
        assert_eq!(
            store.remove_item(MenuItemId::new(99), false),
            RemoveOutcome::NotFound
        );
        assert!(store.is_empty());
        // Nothing changed, so nothing was written
        assert!(store.storage().get(DEFAULT_CART_KEY).is_none());
    }

    #[test]
    fn test_unit_count_moves_by_one() {
        let mut store = empty_store();
        store.add_item(mousse());
        store.add_item(steak());
        store.add_item(mousse());
        assert_eq!(store.total_quantity(), 3);

        store.remove_item(MenuItemId::new(1), true);
        assert_eq!(store.total_quantity(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let mut store = empty_store();
        let expected = |store: &CartStore<MemoryStorage>| serde_json::to_value(store.state()).unwrap();

        store.add_item(mousse());
        assert_eq!(persisted(&store), expected(&store));
        store.add_item(steak());
        assert_eq!(persisted(&store), expected(&store));
        store.remove_item(MenuItemId::new(1), true);
        assert_eq!(persisted(&store), expected(&store));
        store.clear();
        assert_eq!(persisted(&store), serde_json::json!([]));
    }

    #[test]
    fn test_reload_restores_order_and_quantities() {
        let mut store = empty_store();
        store.add_item(steak());
        store.add_item(mousse());
        store.add_item(steak());
        let before = store.items().to_vec();

        let reloaded = CartStore::initialize(store.into_storage(), DEFAULT_CART_KEY);
        assert_eq!(reloaded.items(), before.as_slice());
    }

    #[test]
    fn test_malformed_slot_recovers_empty() {
        for raw in [
            "not json",
            r#"{"id": 1}"#,
            r#"[{"id": 1, "name": "A", "price": 1, "quantity": 0}]"#,
            r#"[{"id": 1, "name": "A", "price": -1, "quantity": 1}]"#,
            r#"[{"id": 1, "name": "A", "price": 1, "quantity": 1},
                {"id": 1, "name": "A", "price": 1, "quantity": 1}]"#,
        ] {
            let storage = MemoryStorage::with_slot(DEFAULT_CART_KEY, raw);
            let store = CartStore::initialize(storage, DEFAULT_CART_KEY);
            assert!(store.is_empty(), "expected empty cart for {raw}");
        }
    }

    #[test]
    fn test_load_state_reports_why() {
        let storage = MemoryStorage::with_slot(DEFAULT_CART_KEY, "[1, 2");
        assert!(matches!(
            load_state(&storage, DEFAULT_CART_KEY),
            Err(CartError::Decode(_))
        ));

        let storage = MemoryStorage::with_slot(
            DEFAULT_CART_KEY,
            r#"[{"id": 4, "name": "A", "price": 1, "quantity": 1},
                {"id": 4, "name": "A", "price": 1, "quantity": 1}]"#,
        );
        assert!(matches!(
            load_state(&storage, DEFAULT_CART_KEY),
            Err(CartError::InvalidState(_))
        ));

        assert!(load_state(&MemoryStorage::new(), DEFAULT_CART_KEY)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_read_failure_recovers_empty() {
        let storage = FlakyStorage {
            fail_reads: true,
            ..FlakyStorage::default()
        };
        let store = CartStore::initialize(storage, DEFAULT_CART_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_write_failure_keeps_mutation() {
        let storage = FlakyStorage {
            fail_writes: true,
            ..FlakyStorage::default()
        };
        let mut store = CartStore::initialize(storage, DEFAULT_CART_KEY);

        store.add_item(mousse());
        store.add_item(mousse());

        assert_eq!(store.items()[0].quantity.get(), 2);
        assert_eq!(store.storage().writes, 2);
        assert!(matches!(store.persist(), Err(CartError::Storage(_))));
    }

    #[test]
    fn test_summary() {
        let mut store = empty_store();
        store.add_item(mousse());
        store.add_item(steak());

        let summary = store.summary(TaxRate::default());
        assert_eq!(summary.subtotal, Decimal::from(37));
        assert_eq!(summary.total, Decimal::new(4070, 2));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(i32),
            Remove(i32, bool),
            Clear,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                6 => (0i32..5).prop_map(Op::Add),
                4 => (0i32..5, any::<bool>()).prop_map(|(id, decrement)| Op::Remove(id, decrement)),
                1 => Just(Op::Clear),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

            #[test]
            fn test_slot_always_reloads_to_memory_state(
                ops in prop::collection::vec(op_strategy(), 1..30),
            ) {
                let mut store = CartStore::initialize(MemoryStorage::new(), DEFAULT_CART_KEY);

                for op in ops {
                    match op {
                        Op::Add(id) => {
                            let price = Price::from_unsigned_cents(id.unsigned_abs() * 150 + 99);
                            store.add_item(CartCandidate::new(MenuItemId::new(id), "Dish", price));
                        }
                        Op::Remove(id, decrement) => {
                            store.remove_item(MenuItemId::new(id), decrement);
                        }
                        Op::Clear => store.clear(),
                    }

                    let persisted = load_state(store.storage(), DEFAULT_CART_KEY)
                        .unwrap()
                        .unwrap_or_default();
                    prop_assert_eq!(&persisted, store.state());

                    let reopened = CartStore::initialize(store.storage().clone(), DEFAULT_CART_KEY);
                    prop_assert_eq!(reopened.items(), store.items());
                }
            }
        }
    }
}
