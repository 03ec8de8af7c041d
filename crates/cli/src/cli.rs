//! Command-line surface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use daigou_core::OrderId;
use daigou_orders::Status;

#[derive(Parser)]
#[command(name = "daigou")]
#[command(version = "0.1.0")]
#[command(about = "Purchasing-agent order ledger", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Order data file (defaults to the per-user data directory)
    #[arg(long, global = true, env = "DAIGOU_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new order (starts at the checking status)
    Add {
        /// Client code, e.g. A123
        #[arg(long)]
        client: String,
        /// Product name
        #[arg(long)]
        product: String,
        /// Whole-line sale price in TWD
        #[arg(long)]
        total: f64,
        /// Number of units
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        /// Whole-line cost in KRW
        #[arg(long, default_value_t = 0.0)]
        cost_foreign: f64,
        /// Exchange rate: KRW per TWD, or TWD per KRW when at most 1
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
        /// Merchant name
        #[arg(long)]
        store: Option<String>,
        /// Variant such as colour or size
        #[arg(long)]
        spec: Option<String>,
        /// Order date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },

    /// List orders, newest first (in-flight only unless --all)
    List {
        /// Include completed orders
        #[arg(long)]
        all: bool,
    },

    /// Re-enter fields of an existing order
    Edit {
        /// Order id
        id: OrderId,
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        product: Option<String>,
        /// Whole-line sale price in TWD
        #[arg(long)]
        total: Option<f64>,
        #[arg(long)]
        quantity: Option<u32>,
        /// Whole-line cost in KRW
        #[arg(long)]
        cost_foreign: Option<f64>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        store: Option<String>,
        #[arg(long)]
        spec: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        note: Option<String>,
        /// Workflow status identifier (see `daigou status --help`)
        #[arg(long)]
        status: Option<Status>,
    },

    /// Set the workflow status of an order
    ///
    /// Statuses, in workflow order: checking, paid, verified, ordered_kr,
    /// shipped_kr, consolidation, arrived_tw, sorting, pickup, shipped_tw,
    /// completed.
    Status {
        /// Order id
        id: OrderId,
        /// Status identifier
        status: Status,
    },

    /// Mark the goods payment received (or not, with --off)
    Paid {
        /// Order id
        id: OrderId,
        /// Mark as unpaid instead
        #[arg(long)]
        off: bool,
    },

    /// Mark the shipping payment received (or not, with --off)
    ShippingPaid {
        /// Order id
        id: OrderId,
        /// Mark as unpaid instead
        #[arg(long)]
        off: bool,
    },

    /// Delete an order
    Delete {
        /// Order id
        id: OrderId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show revenue, cost, profit, and the status distribution
    Stats,

    /// Write all orders to a backup JSON file
    Export {
        /// Output path (defaults to daigou_backup_<today>.json)
        path: Option<PathBuf>,
    },

    /// Replace ALL orders with the contents of a backup JSON file
    Import {
        /// Backup file to read
        path: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
