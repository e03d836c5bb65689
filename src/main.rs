//! BrickLink Pricer - command line entry point
//!
//! Looks up prices for minifigures, parts and sets in a BrickLink XML inventory
//! and optionally exports a mass-upload XML with markup applied.

use bricklink_pricer::export::DEFAULT_MARKUP_PERCENT;
use bricklink_pricer::inventory::count_with_condition;
use bricklink_pricer::{
    fetch_prices, format_price_summary, load_inventory, setup_instructions, write_exports,
    BricklinkClient, Condition, Credentials, InventoryStats, PricingOptions, QuantityPolicy,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Inventory files tried, in order, when --xml is not given
const DEFAULT_INVENTORY_FILES: [&str; 3] = ["Minifigures.xml", "Parts.xml", "Sets.xml"];

/// Get prices for items from a BrickLink XML inventory (minifigures, parts, sets)
#[derive(Parser, Debug)]
#[command(name = "bricklink_pricer")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:
  bricklink_pricer --xml Minifigures.xml
  bricklink_pricer --xml Parts.xml --condition N
  bricklink_pricer --xml Minifigures.xml --condition U --export prices --markup 15")]
struct Args {
    /// Path to BrickLink XML inventory file
    #[arg(short = 'x', long)]
    xml: Option<PathBuf>,

    /// Filter by condition: N (new) or U (used)
    #[arg(short, long)]
    condition: Option<Condition>,

    /// Only show price information (no inventory statistics)
    #[arg(short, long, default_value_t = false)]
    prices_only: bool,

    /// Export results (creates .xml, .json and _detailed.json files)
    #[arg(short, long, value_name = "NAME")]
    export: Option<String>,

    /// Markup percentage to add to exported prices
    #[arg(short, long, default_value_t = DEFAULT_MARKUP_PERCENT)]
    markup: f64,

    /// Add up quantities of duplicate entries instead of keeping the first
    #[arg(long, default_value_t = false)]
    sum_duplicates: bool,

    /// Pause between price lookups in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Show setup instructions
    #[arg(long, default_value_t = false)]
    setup: bool,

    /// Enable debug output for API calls
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn find_default_inventory() -> Option<PathBuf> {
    DEFAULT_INVENTORY_FILES
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

fn print_inventory_stats(stats: &InventoryStats, filter_count: Option<(Condition, usize)>) {
    println!("  Unique items: {}", stats.unique_items);
    println!("  Total quantity: {}", stats.total_quantity);
    println!("  Conditions: {}", stats.condition_codes());
    if let Some((condition, count)) = filter_count {
        println!("  Filtering for condition '{condition}': {count} items");
    }
}

fn main() {
    let args = Args::parse();

    // RUST_LOG still overrides the default level chosen here.
    let default_level = if args.debug {
        "info,bricklink_pricer=debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.setup {
        print!("{}", setup_instructions());
        return;
    }

    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("Loaded environment from {}", path.display());
    }

    let xml_path = match args.xml.clone() {
        Some(path) => path,
        None => match find_default_inventory() {
            Some(path) => {
                println!("No XML file specified, using '{}'", path.display());
                path
            }
            None => {
                println!("Error: No XML file specified.");
                println!("Usage: bricklink_pricer --xml your_file.xml");
                return;
            }
        },
    };

    run(&args, &xml_path);
}

fn run(args: &Args, xml_path: &Path) {
    println!("Parsing XML inventory: {}", xml_path.display());
    let inventory = load_inventory(xml_path);

    if inventory.is_empty() {
        println!("No supported items found in XML file!");
        return;
    }
    if inventory.skipped > 0 {
        log::warn!(
            "Skipped {} unsupported or incomplete entries",
            inventory.skipped
        );
    }

    let stats = InventoryStats::from_items(&inventory.items);
    println!(
        "Found {} entries in XML ({})",
        stats.entries,
        stats.type_labels()
    );

    if !args.prices_only {
        let filter_count = args
            .condition
            .map(|c| (c, count_with_condition(&inventory.items, c)));
        print_inventory_stats(&stats, filter_count);
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            log::error!("{}", e);
            println!("\nError: {e}");
            println!("\nRun with --setup for instructions:");
            println!("bricklink_pricer --setup");
            return;
        }
    };

    if args.debug {
        for (name, value) in credentials.redacted() {
            log::debug!("{}: {}", name, value);
        }
    }

    let client = match BricklinkClient::new(credentials) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create API client: {}", e);
            return;
        }
    };
    log::debug!("API Base URL: {}", client.base_url());

    let options = PricingOptions {
        condition_filter: args.condition,
        throttle: Duration::from_millis(args.delay_ms),
        quantity_policy: if args.sum_duplicates {
            QuantityPolicy::Sum
        } else {
            QuantityPolicy::FirstSeen
        },
    };

    let results = fetch_prices(&client, &inventory.items, &options);
    if results.is_empty() {
        println!("No results to display!");
        return;
    }

    print!("{}", format_price_summary(&results));

    if let Some(name) = &args.export {
        let report = write_exports(name, &results, args.markup);
        println!();
        for line in report.status_lines(args.markup) {
            println!("{line}");
        }
    }
}
