//! Bistro Storefront library.
//!
//! Cart state, its durable storage, the menu that feeds it, and the totals
//! shown to the customer.
//!
//! # Modules
//!
//! - [`cart`] - `CartStore`, the write-through cart container
//! - [`storage`] - Key-value slot backends the cart persists to
//! - [`menu`] - Menu catalog and the cart candidates it produces
//! - [`summary`] - Subtotal, tax and total
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Cart persistence errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod menu;
pub mod storage;
pub mod summary;

pub use cart::{CartStore, DEFAULT_CART_KEY, load_state, save_state};
pub use config::{ConfigError, StorefrontConfig};
pub use error::CartError;
pub use menu::{Menu, MenuCategory, MenuError, MenuItem};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use summary::CartSummary;
