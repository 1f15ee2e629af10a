//! Cart commands.
//!
//! These take the store by reference; `main` owns the only handle.

use std::fmt::Write as _;

use bistro_core::{AddOutcome, MenuItemId, RemoveOutcome, TaxRate};
use bistro_storefront::{CartStorage, CartStore, Menu};

use super::CliError;

/// Render the cart with its totals.
pub fn show<S: CartStorage>(store: &CartStore<S>, tax_rate: TaxRate) -> String {
    if store.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out = String::from("Shopping Cart\n");
    for item in store.items() {
        let _ = writeln!(
            out,
            "  [{:>3}] {:<28} x{:<3} {:>9}",
            item.id.as_i32(),
            item.name,
            item.quantity.get(),
            bistro_core::format_money(item.line_total()),
        );
    }

    let summary = store.summary(tax_rate);
    let _ = writeln!(out, "  {:<40} {:>9}", "Subtotal:", summary.subtotal_display());
    let _ = writeln!(
        out,
        "  {:<40} {:>9}",
        format!("Tax ({}):", summary.tax_rate),
        summary.tax_display()
    );
    let _ = writeln!(out, "  {:<40} {:>9}", "Total:", summary.total_display());
    out
}

/// Add one unit of menu item `id` to the cart.
///
/// # Errors
///
/// Returns [`CliError::UnknownItem`] if `id` is not on the menu.
pub fn add<S: CartStorage>(
    store: &mut CartStore<S>,
    menu: &Menu,
    id: MenuItemId,
) -> Result<String, CliError> {
    let item = menu.find(id).ok_or(CliError::UnknownItem(id))?;

    let message = match store.add_item(item.to_candidate()) {
        AddOutcome::Inserted => format!("Added {} to your cart.\n", item.name),
        AddOutcome::Incremented { quantity } => {
            format!("Added another {} ({quantity} in cart).\n", item.name)
        }
    };
    Ok(message)
}

/// Remove item `id`, or one unit of it with `decrement`.
pub fn remove<S: CartStorage>(store: &mut CartStore<S>, id: MenuItemId, decrement: bool) -> String {
    let name = store.get(id).map(|item| item.name.clone());

    match (store.remove_item(id, decrement), name) {
        (RemoveOutcome::Decremented { quantity }, Some(name)) => {
            format!("Removed one {name} ({quantity} left).\n")
        }
        (RemoveOutcome::Removed, Some(name)) => format!("Removed {name} from your cart.\n"),
        _ => format!("Item {id} is not in your cart.\n"),
    }
}

/// Empty the cart.
pub fn clear<S: CartStorage>(store: &mut CartStore<S>) -> String {
    let units = store.total_quantity();
    store.clear();
    format!("Cleared {units} item(s) from your cart.\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bistro_storefront::{DEFAULT_CART_KEY, MemoryStorage};

    fn store() -> CartStore<MemoryStorage> {
        CartStore::initialize(MemoryStorage::new(), DEFAULT_CART_KEY)
    }

    #[test]
    fn test_show_empty() {
        assert_eq!(show(&store(), TaxRate::default()), "Your cart is empty.\n");
    }

    #[test]
    fn test_add_and_show() {
        let menu = Menu::builtin();
        let mut store = store();

        let first = add(&mut store, &menu, MenuItemId::new(1)).unwrap();
        assert_eq!(first, "Added Duck Liver Mousse to your cart.\n");
        let second = add(&mut store, &menu, MenuItemId::new(1)).unwrap();
        assert_eq!(second, "Added another Duck Liver Mousse (2 in cart).\n");

        let out = show(&store, TaxRate::default());
        assert!(out.contains("Duck Liver Mousse"));
        assert!(out.contains("x2"));
        assert!(out.contains("$18.00"));
        assert!(out.contains("Tax (10%):"));
        assert!(out.contains("$1.80"));
        assert!(out.contains("$19.80"));
    }

    #[test]
    fn test_add_unknown_item() {
        let err = add(&mut store(), &Menu::builtin(), MenuItemId::new(404)).unwrap_err();
        assert!(matches!(err, CliError::UnknownItem(id) if id == MenuItemId::new(404)));
    }

    #[test]
    fn test_remove_messages() {
        let menu = Menu::builtin();
        let mut store = store();
        add(&mut store, &menu, MenuItemId::new(10)).unwrap();
        add(&mut store, &menu, MenuItemId::new(10)).unwrap();

        assert_eq!(
            remove(&mut store, MenuItemId::new(10), true),
            "Removed one Steak Frites (1 left).\n"
        );
        assert_eq!(
            remove(&mut store, MenuItemId::new(10), false),
            "Removed Steak Frites from your cart.\n"
        );
        assert_eq!(
            remove(&mut store, MenuItemId::new(99), false),
            "Item 99 is not in your cart.\n"
        );
    }

    #[test]
    fn test_clear() {
        let menu = Menu::builtin();
        let mut store = store();
        add(&mut store, &menu, MenuItemId::new(1)).unwrap();
        add(&mut store, &menu, MenuItemId::new(20)).unwrap();

        assert_eq!(clear(&mut store), "Cleared 2 item(s) from your cart.\n");
        assert!(store.is_empty());
        assert_eq!(store.storage().get(DEFAULT_CART_KEY), Some("[]"));
    }
}
