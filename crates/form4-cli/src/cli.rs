//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use form4_core::{CompanyFilter, ExportFormat, FilterCriteria, TimeWindow};

/// form4 - Insider trading dashboard
#[derive(Parser)]
#[command(name = "form4")]
#[command(about = "Browse reported insider trades and AI summaries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to DATABASE_URL, then form4.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Ignore FORM4_DB_KEY and open the database unencrypted
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Company and time-window selectors shared by the dashboard views
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Company name, or "All"
    #[arg(short, long, default_value = "All")]
    pub company: String,

    /// Time window: all-time, last-7-days, last-30-days, last-90-days (or 7d, 30d, 90d)
    #[arg(short, long, default_value = "all-time")]
    pub window: TimeWindow,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(CompanyFilter::parse(&self.company), self.window)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the source tables in a new database
    Init,

    /// Show database status (path, encryption, row counts)
    Status,

    /// List the company selector options
    Companies,

    /// Show filtered insider transactions
    Transactions {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show total shares per company as a bar chart
    Chart {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show AI summaries with sentiment coloring
    Summaries {
        /// Company name, or "All"
        #[arg(short, long, default_value = "All")]
        company: String,
    },

    /// Show transactions, chart and summaries together
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print the dashboard as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Export filtered transactions
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output file (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
