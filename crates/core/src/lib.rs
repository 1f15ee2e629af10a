//! Bistro Core - Shared types library.
//!
//! This crate provides the types shared by every Bistro component:
//! - `storefront` - Cart store, durable storage, menu catalog and totals
//! - `cli` - Command-line front end that drives the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no logging. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for menu item IDs, prices, quantities, tax
//!   rates, and the cart line items built from them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
