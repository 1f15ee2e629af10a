//! Command implementations.
//!
//! Each command returns the text to show the operator; `main` decides where
//! it goes.

pub mod cart;
pub mod menu;

use bistro_core::MenuItemId;
use bistro_storefront::{ConfigError, MenuError};
use thiserror::Error;

/// Errors a command can report to the operator.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Menu error: {0}")]
    Menu(#[from] MenuError),

    #[error("No menu item with id {0}")]
    UnknownItem(MenuItemId),

    #[error("No menu category named {0:?} (available: {1})")]
    UnknownCategory(String, String),
}
