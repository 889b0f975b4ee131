//! CLI definition using clap

use bora_domain::model::UrgencyTier;
use bora_domain::service::QueryParams;
use bora_types::OutputFormat;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Motorcycle urgency tier as typed on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UrgencyArg {
    #[default]
    Normal,
    Urgent,
    Rain,
}

impl From<UrgencyArg> for UrgencyTier {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Normal => UrgencyTier::Normal,
            UrgencyArg::Urgent => UrgencyTier::Urgent,
            UrgencyArg::Rain => UrgencyTier::Rain,
        }
    }
}

/// Dispatch history filters shared by `search` and `quote --pick`
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    /// First receipt date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last receipt date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Customer name contains
    #[arg(long)]
    pub customer: Option<String>,

    /// Destination contains ("혼적" also matches the category)
    #[arg(long)]
    pub dest: Option<String>,

    /// Vehicle categories to include (repeatable)
    #[arg(long = "category", short = 'c')]
    pub categories: Vec<String>,

    /// Dataset file (default: configured location)
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

impl FilterArgs {
    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .with_date_range(self.from, self.to)
            .with_customer(self.customer.clone().unwrap_or_default())
            .with_destination(self.dest.clone().unwrap_or_default())
            .with_categories(self.categories.clone())
    }
}

#[derive(Parser)]
#[command(name = "bora")]
#[command(author = "bora-logistics")]
#[command(version)]
#[command(about = "Dispatch history lookup, freight quotes and receipts")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge yearly exports (*y.xlsx, *y.csv) into the consolidated dataset
    Merge {
        /// Folder holding the yearly exports (default: configured data dir)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output dataset path (default: dataset file inside the folder)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Also write an .xlsx copy next to the dataset
        #[arg(long)]
        xlsx: bool,
    },

    /// Show the vehicle category for free-text destinations
    Classify {
        /// Destination text, e.g. "군포/1톤윙"
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Search the dispatch history
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// Maximum rows to print
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },

    /// List vehicle categories present in the dataset, grouped
    Categories {
        /// Dataset file (default: configured location)
        #[arg(long)]
        dataset: Option<PathBuf>,
    },

    /// Price a shipment and optionally issue a receipt.
    ///
    /// Either give --fare (with --customer/--dest printed on the receipt), or
    /// --pick N to quote the Nth row of the matching `search` results.
    Quote {
        /// Base fare in won
        #[arg(long, required_unless_present = "pick")]
        fare: Option<u64>,

        /// Vehicle category (default: classified from --dest)
        #[arg(long)]
        vehicle: Option<String>,

        /// Quote the Nth (1-based) row matched by the filters
        #[arg(long, conflicts_with_all = ["fare", "vehicle"])]
        pick: Option<usize>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Round trip (+70%)
        #[arg(long)]
        round_trip: bool,

        /// Waiting time in minutes (1,000 won per full 10 minutes)
        #[arg(long, default_value = "0")]
        wait: String,

        /// Holiday / night surcharge (+10,000)
        #[arg(long)]
        holiday: bool,

        /// Motorcycle urgency tier
        #[arg(long, value_enum, default_value_t = UrgencyArg::Normal)]
        urgency: UrgencyArg,

        /// Motorcycle rack fee (+5,000)
        #[arg(long)]
        rack: bool,

        /// Do not add 10% VAT
        #[arg(long)]
        no_tax: bool,

        /// Write the receipt workbook to the receipt folder
        #[arg(long)]
        receipt: bool,
    },

    /// Check the update server for a newer build
    Update {
        /// Base URL (overrides config and forces the check)
        #[arg(long)]
        url: Option<String>,
    },

    /// Show or modify configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the data folder
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set the receipt folder
        #[arg(long)]
        set_receipt_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set update server base URL
        #[arg(long)]
        set_update_url: Option<String>,

        /// Enable/disable the startup update check
        #[arg(long)]
        set_update_enabled: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
