//! Menu catalog.
//!
//! The menu is the producer side of the cart: every "Add to Cart" starts
//! from a [`MenuItem`] turned into a [`CartCandidate`].
//!
//! # Sources
//!
//! - [`Menu::builtin`] - the restaurant's house menu, compiled in
//! - [`Menu::load`] - an operator-supplied YAML file with the same shape:
//!
//! ```yaml
//! - category: Starters
//!   items:
//!     - id: 1
//!       name: Duck Liver Mousse
//!       price: 9
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use bistro_core::{CartCandidate, MenuItemId, Price};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to read menu file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse menu: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Menu has no categories")]
    Empty,

    #[error("Menu category {0:?} has no items")]
    EmptyCategory(String),

    #[error("Menu category {0:?} appears more than once")]
    DuplicateCategory(String),

    #[error("Menu item id {0} appears more than once")]
    DuplicateItem(MenuItemId),
}

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItem {
    /// The cart candidate for this item.
    #[must_use]
    pub fn to_candidate(&self) -> CartCandidate {
        CartCandidate::from(self)
    }
}

impl From<&MenuItem> for CartCandidate {
    fn from(item: &MenuItem) -> Self {
        Self::new(item.id, item.name.clone(), item.price)
    }
}

/// A named group of menu items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// A validated menu.
///
/// Invariants: at least one category, no empty categories, unique category
/// names, and item IDs unique across the whole menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MenuCategory>", into = "Vec<MenuCategory>")]
pub struct Menu {
    categories: Vec<MenuCategory>,
}

impl Menu {
    /// Build a menu, checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`MenuError`] invariant violation found.
    pub fn from_categories(categories: Vec<MenuCategory>) -> Result<Self, MenuError> {
        if categories.is_empty() {
            return Err(MenuError::Empty);
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for category in &categories {
            if !names.insert(category.category.to_lowercase()) {
                return Err(MenuError::DuplicateCategory(category.category.clone()));
            }
            if category.items.is_empty() {
                return Err(MenuError::EmptyCategory(category.category.clone()));
            }
            for item in &category.items {
                if !ids.insert(item.id) {
                    return Err(MenuError::DuplicateItem(item.id));
                }
            }
        }

        Ok(Self { categories })
    }

    /// Parse a menu from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Parse`] for malformed YAML, otherwise as
    /// [`Menu::from_categories`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MenuError> {
        let categories: Vec<MenuCategory> = serde_yaml::from_str(yaml)?;
        Self::from_categories(categories)
    }

    /// Read a menu from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Io`] if the file cannot be read, otherwise as
    /// [`Menu::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let menu = Self::from_yaml_str(&yaml)?;
        tracing::info!(
            path = %path.display(),
            categories = menu.categories.len(),
            "Loaded menu"
        );
        Ok(menu)
    }

    /// All categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    /// The category shown first.
    #[must_use]
    pub fn default_category(&self) -> Option<&MenuCategory> {
        self.categories.first()
    }

    /// The category named `name`, ignoring ASCII case.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&MenuCategory> {
        self.categories
            .iter()
            .find(|c| c.category.eq_ignore_ascii_case(name.trim()))
    }

    /// Items in the category named `name`; empty if there is no such category.
    #[must_use]
    pub fn items_in(&self, name: &str) -> &[MenuItem] {
        match self.category(name) {
            Some(category) => &category.items,
            None => &[],
        }
    }

    /// Every item, category by category.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// The item with `id`.
    #[must_use]
    pub fn find(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items().find(|item| item.id == id)
    }

    /// The house menu.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                MenuCategory {
                    category: "Starters".to_string(),
                    items: vec![
                        item(1, "Duck Liver Mousse", 900, "Port gelée, toasted brioche"),
                        item(2, "French Onion Soup", 1100, "Gruyère crouton"),
                        item(3, "Escargots", 1400, "Garlic parsley butter"),
                        item(4, "Salade Lyonnaise", 1200, "Frisée, lardons, poached egg"),
                    ],
                },
                MenuCategory {
                    category: "Mains".to_string(),
                    items: vec![
                        item(10, "Steak Frites", 2800, "Hanger steak, béarnaise"),
                        item(11, "Moules Marinières", 2200, "White wine, shallots, frites"),
                        item(12, "Coq au Vin", 2600, "Braised chicken, lardons, mushrooms"),
                        item(13, "Ratatouille", 1900, "Provençal vegetables, basil oil"),
                    ],
                },
                MenuCategory {
                    category: "Desserts".to_string(),
                    items: vec![
                        item(20, "Crème Brûlée", 1000, "Vanilla bean custard"),
                        item(21, "Tarte Tatin", 1050, "Crème fraîche"),
                        item(22, "Chocolate Mousse", 950, "Dark chocolate, sea salt"),
                    ],
                },
                MenuCategory {
                    category: "Drinks".to_string(),
                    items: vec![
                        item(30, "House Red", 1200, "Côtes du Rhône, by the glass"),
                        item(31, "Kir Royal", 1400, "Crémant, cassis"),
                        item(32, "Citron Pressé", 600, "Fresh lemon, sparkling water"),
                    ],
                },
            ],
        }
    }
}

fn item(id: i32, name: &str, cents: u32, description: &str) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name: name.to_string(),
        price: Price::from_unsigned_cents(cents),
        description: Some(description.to_string()),
    }
}

impl TryFrom<Vec<MenuCategory>> for Menu {
    type Error = MenuError;

    fn try_from(categories: Vec<MenuCategory>) -> Result<Self, Self::Error> {
        Self::from_categories(categories)
    }
}

impl From<Menu> for Vec<MenuCategory> {
    fn from(menu: Menu) -> Self {
        menu.categories
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_builtin_is_valid() {
        let menu = Menu::builtin();
        assert!(Menu::from_categories(menu.categories().to_vec()).is_ok());
        assert_eq!(menu.default_category().unwrap().category, "Starters");
    }

    #[test]
    fn test_builtin_has_duck_liver_mousse() {
        let menu = Menu::builtin();
        let mousse = menu.find(MenuItemId::new(1)).unwrap();
        assert_eq!(mousse.name, "Duck Liver Mousse");
        assert_eq!(mousse.price.amount(), Decimal::from(9));
    }

    #[test]
    fn test_items_in_ignores_case() {
        let menu = Menu::builtin();
        assert_eq!(menu.items_in("desserts").len(), 3);
        assert!(menu.items_in("Brunch").is_empty());
    }

    #[test]
    fn test_to_candidate() {
        let menu = Menu::builtin();
        let candidate = menu.find(MenuItemId::new(10)).unwrap().to_candidate();
        assert_eq!(candidate.id, MenuItemId::new(10));
        assert_eq!(candidate.name, "Steak Frites");
        assert_eq!(candidate.price, Price::from_unsigned_cents(2800));
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r"
- category: Specials
  items:
    - id: 100
      name: Bouillabaisse
      price: 34.5
    - id: 101
      name: Cassoulet
      price: '31'
      description: Duck confit, Toulouse sausage
";
        let menu = Menu::from_yaml_str(yaml).unwrap();
        assert_eq!(menu.categories().len(), 1);
        assert_eq!(
            menu.find(MenuItemId::new(100)).unwrap().price.amount(),
            Decimal::new(345, 1)
        );
        assert_eq!(
            menu.find(MenuItemId::new(101)).unwrap().description.as_deref(),
            Some("Duck confit, Toulouse sausage")
        );
    }

    #[test]
    fn test_rejects_empty_menu() {
        assert!(matches!(Menu::from_yaml_str("[]"), Err(MenuError::Empty)));
    }

    #[test]
    fn test_rejects_duplicate_item_ids() {
        let yaml = r"
- category: A
  items:
    - {id: 1, name: One, price: 1}
- category: B
  items:
    - {id: 1, name: Again, price: 2}
";
        assert!(matches!(
            Menu::from_yaml_str(yaml),
            Err(MenuError::DuplicateItem(id)) if id == MenuItemId::new(1)
        ));
    }

    #[test]
    fn test_rejects_duplicate_categories() {
        let yaml = r"
- category: Mains
  items:
    - {id: 1, name: One, price: 1}
- category: mains
  items:
    - {id: 2, name: Two, price: 2}
";
        assert!(matches!(
            Menu::from_yaml_str(yaml),
            Err(MenuError::DuplicateCategory(_))
        ));
    }

    #[test]
    fn test_rejects_empty_category() {
        let yaml = "- category: Empty\n  items: []\n";
        assert!(matches!(
            Menu::from_yaml_str(yaml),
            Err(MenuError::EmptyCategory(_))
        ));
    }

    #[test]
    fn test_rejects_negative_price() {
        let yaml = "- category: A\n  items:\n    - {id: 1, name: One, price: -1}\n";
        assert!(matches!(Menu::from_yaml_str(yaml), Err(MenuError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Menu::load(Path::new("/nonexistent/bistro/menu.yaml")).unwrap_err();
        assert!(matches!(err, MenuError::Io { .. }));
    }
}
