//! Bistro CLI - Browse the menu and manage a persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # List menu categories, then the items in one
//! bistro menu
//! bistro menu --category Starters
//!
//! # Put two Duck Liver Mousse in the cart, take one back out
//! bistro cart add 1
//! bistro cart add 1
//! bistro cart remove 1 --decrement
//!
//! # Show lines, subtotal, tax and total
//! bistro cart show
//! ```
//!
//! # Commands
//!
//! - `menu` - List categories or items
//! - `cart show|add|remove|clear` - Inspect and change the cart
//!
//! Cart state lives in `$BISTRO_DATA_DIR/$BISTRO_CART_KEY.json` and survives
//! between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bistro_core::MenuItemId;
use bistro_storefront::{CartStore, FileStorage, Menu, MenuError, StorefrontConfig};
use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "bistro")]
#[command(author, version, about = "Bistro menu and cart tools")]
struct Cli {
    /// YAML menu file to use instead of the built-in menu
    #[arg(long, global = true)]
    menu: Option<PathBuf>,

    /// Directory holding the persisted cart
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu categories, or the items in one category
    Menu {
        /// Category to list items for
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a menu item
    Add {
        /// Menu item id
        id: MenuItemId,
    },
    /// Remove a menu item from the cart
    Remove {
        /// Menu item id
        id: MenuItemId,

        /// Take off a single unit instead of the whole line
        #[arg(short, long)]
        decrement: bool,
    },
    /// Remove every item
    Clear,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => emit(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Install the tracing subscriber.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set; set
/// `BISTRO_LOG_FORMAT=json` for one JSON object per event.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bistro_cli=info,bistro_storefront=info".into());

    let json = std::env::var("BISTRO_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    print!("{output}");
}

fn run(cli: Cli) -> Result<String, CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.menu {
        config.menu_path = Some(path);
    }

    dispatch(cli.command, &config)
}

/// Run one command. Only `menu` and `cart add` read the menu file.
fn dispatch(command: Commands, config: &StorefrontConfig) -> Result<String, CliError> {
    match command {
        Commands::Menu { category } => {
            commands::menu::list(&load_menu(config)?, category.as_deref())
        }
        Commands::Cart { action } => {
            let storage = FileStorage::new(&config.data_dir);
            let mut store = CartStore::initialize(storage, config.cart_key.as_str());

            match action {
                CartAction::Show => Ok(commands::cart::show(&store, config.tax_rate)),
                CartAction::Add { id } => commands::cart::add(&mut store, &load_menu(config)?, id),
                CartAction::Remove { id, decrement } => {
                    Ok(commands::cart::remove(&mut store, id, decrement))
                }
                CartAction::Clear => Ok(commands::cart::clear(&mut store)),
            }
        }
    }
}

fn load_menu(config: &StorefrontConfig) -> Result<Menu, MenuError> {
    match &config.menu_path {
        Some(path) => Menu::load(path),
        None => Ok(Menu::builtin()),
    }
}
