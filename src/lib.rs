//! BrickLink Pricer - market prices for an XML inventory
//!
//! Reads a BrickLink XML inventory (minifigures, parts, sets), looks up the
//! stock price guide for every unique item and exports priced mass-upload files.

pub mod bricklink;
pub mod config;
pub mod error;
pub mod export;
pub mod inventory;
pub mod models;
pub mod pricing;
pub mod report;

pub use bricklink::{BricklinkClient, PriceSource};
pub use config::{setup_instructions, Credentials};
pub use error::{PricerError, Result};
pub use export::{write_exports, ExportPaths, ExportReport};
pub use inventory::{load_inventory, parse_inventory, InventoryStats, ParsedInventory};
pub use models::{Condition, ItemType, LineItem, LookupOutcome, PriceGuide, PriceLookup};
pub use pricing::{fetch_prices, PricingOptions, QuantityPolicy};
pub use report::{format_price_info, format_price_summary};
