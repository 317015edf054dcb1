//! Trocly CLI - Browse the catalog and manage the local cart and wishlist.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! trocly catalog list --category 2 --sort price-high-low
//! trocly catalog search plush
//! trocly catalog show 10
//!
//! # Cart
//! trocly cart add 10
//! trocly cart quantity 10 2
//! trocly cart summary
//!
//! # Wishlist
//! trocly wishlist toggle 5
//! trocly wishlist move-to-cart 5
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, search, and inspect products
//! - `cart` - Add, update, remove, and summarize cart lines
//! - `wishlist` - Toggle, inspect, and move wishlist entries
//!
//! State lives in `TROCLY_DATA_DIR` (or `--data-dir`), one JSON file per
//! collection.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trocly_core::{Price, ProductId};
use trocly_storefront::{
    Catalog, CatalogQuery, FeaturedTab, FileStorage, ShoppingStore, SortOrder, StorefrontConfig,
};

mod commands;

#[derive(Parser)]
#[command(name = "trocly")]
#[command(author, version, about = "Trocly storefront CLI")]
struct Cli {
    /// Directory holding the cart and wishlist files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products with shop filters
    List {
        /// Category id
        #[arg(short, long)]
        category: Option<String>,

        /// Lowest price to include
        #[arg(long, default_value = "0")]
        min_price: Price,

        /// Highest price to include
        #[arg(long, default_value = "60000")]
        max_price: Price,

        /// Only new arrivals
        #[arg(long)]
        new: bool,

        /// Only sale items
        #[arg(long)]
        sale: bool,

        /// `featured`, `price-low-high`, `price-high-low`, or `rating`
        #[arg(short, long, default_value = "featured")]
        sort: SortOrder,
    },
    /// Search names, descriptions, and categories
    Search { query: String },
    /// Show one product in detail
    Show { id: ProductId },
    /// Featured products: `trending`, `new`, or `sale`
    Featured {
        #[arg(default_value = "trending")]
        tab: FeaturedTab,
    },
    /// List categories with product counts
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines
    List,
    /// Add a product
    Add { id: ProductId },
    /// Set a line's quantity
    Quantity {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product
    Remove { id: ProductId },
    /// Show subtotal, shipping, and total
    Summary,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show wishlisted products
    List,
    /// Add a product, or remove it if already wishlisted
    Toggle { id: ProductId },
    /// Check whether a product is wishlisted
    Status { id: ProductId },
    /// Remove a product
    Remove { id: ProductId },
    /// Add a wishlisted product to the cart
    MoveToCart { id: ProductId },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let storage = FileStorage::open(&config.data_dir)?;
    let store = ShoppingStore::with_config(storage, &config);
    let catalog = Catalog::builtin()?;
    let mut subscription = store.subscribe();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                min_price,
                max_price,
                new,
                sale,
                sort,
            } => {
                let query = CatalogQuery {
                    category_id: category,
                    min_price,
                    max_price,
                    only_new: new,
                    only_sale: sale,
                    sort,
                };
                commands::catalog::list(&mut out, &catalog, &query)?;
            }
            CatalogAction::Search { query } => commands::catalog::search(&mut out, &catalog, &query)?,
            CatalogAction::Show { id } => commands::catalog::show(&mut out, &catalog, id)?,
            CatalogAction::Featured { tab } => commands::catalog::featured(&mut out, &catalog, tab)?,
            CatalogAction::Categories => commands::catalog::categories(&mut out, &catalog)?,
        },
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&mut out, &store)?,
            CartAction::Add { id } => commands::cart::add(&mut out, &store, &catalog, id)?,
            CartAction::Quantity { id, quantity } => {
                commands::cart::quantity(&mut out, &store, id, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut out, &store, id)?,
            CartAction::Summary => commands::cart::summary(&mut out, &store)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::List => commands::wishlist::list(&mut out, &store)?,
            WishlistAction::Toggle { id } => {
                commands::wishlist::toggle(&mut out, &store, &catalog, id)?;
            }
            WishlistAction::Status { id } => commands::wishlist::status(&mut out, &store, id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut out, &store, id)?,
            WishlistAction::MoveToCart { id } => {
                commands::wishlist::move_to_cart(&mut out, &store, id)?;
            }
        },
    }
    out.flush()?;

    for event in subscription.drain() {
        tracing::info!(event = event.name(), "Store updated");
    }
    Ok(())
}
