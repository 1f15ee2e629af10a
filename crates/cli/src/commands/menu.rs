//! Menu listing.

use std::fmt::Write as _;

use bistro_storefront::{Menu, MenuCategory};

use super::CliError;

/// List category names, or the items of one category.
///
/// # Errors
///
/// Returns [`CliError::UnknownCategory`] if `category` names no category.
pub fn list(menu: &Menu, category: Option<&str>) -> Result<String, CliError> {
    let Some(name) = category else {
        return Ok(render_categories(menu));
    };

    let found = menu.category(name).ok_or_else(|| {
        let available = menu
            .categories()
            .iter()
            .map(|c| c.category.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        CliError::UnknownCategory(name.to_string(), available)
    })?;

    Ok(render_items(found))
}

fn render_categories(menu: &Menu) -> String {
    let mut out = String::from("Our Menu\n");
    for category in menu.categories() {
        let _ = writeln!(out, "  {} ({} items)", category.category, category.items.len());
    }
    out
}

fn render_items(category: &MenuCategory) -> String {
    let mut out = format!("{}\n", category.category);
    for item in &category.items {
        let _ = writeln!(out, "  [{:>3}] {:<28} {:>8}", item.id.as_i32(), item.name, item.price);
        if let Some(description) = &item.description {
            let _ = writeln!(out, "        {description}");
        }
    }
    out
}
