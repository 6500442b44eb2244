//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_settings` - Resolve database path and key from flags and environment
//! - `open_db` - Shared utility to open the database
//! - `load_transactions` - Fetch and filter transactions only
//! - `load_dashboard` - Fetch both tables and run the pipeline
//! - `cmd_init` - Create the source tables

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use form4_core::{
    build_dashboard, filter_transactions, Dashboard, Database, FilterCriteria, Settings,
    TransactionRecord,
};
use tracing::debug;

/// Resolve settings: `--db` overrides DATABASE_URL, `--no-encrypt` drops the key
pub fn load_settings(db_path: Option<&Path>, no_encrypt: bool) -> Result<Settings> {
    let mut settings = Settings::from_env().context("Invalid database configuration")?;

    if let Some(path) = db_path {
        settings.db_path = path.to_path_buf();
    }
    if no_encrypt {
        settings.db_key = None;
    }

    Ok(settings)
}

/// Open the configured database
pub fn open_db(settings: &Settings) -> Result<Database> {
    Database::open(settings).with_context(|| {
        format!(
            "Failed to open database at {}",
            settings.db_path.display()
        )
    })
}

/// Reference instant for time-window cutoffs. Stored dates are naive local
/// values, so the cutoff is taken from the local clock.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Fetch and filter transactions without aggregating, so rows with an
/// unknown share count can still be listed and exported
pub fn load_transactions(
    db: &Database,
    criteria: &FilterCriteria,
) -> Result<Vec<TransactionRecord>> {
    let transactions = db
        .fetch_transactions()
        .context("Failed to fetch transactions")?;

    Ok(filter_transactions(&transactions, criteria, now()))
}

/// Fetch transactions and summaries, then filter, aggregate and classify
pub fn load_dashboard(db: &Database, criteria: &FilterCriteria) -> Result<Dashboard> {
    let transactions = db
        .fetch_transactions()
        .context("Failed to fetch transactions")?;
    let summaries = db.fetch_summaries().context("Failed to fetch summaries")?;

    let dashboard = build_dashboard(&transactions, &summaries, criteria, now())
        .context("Failed to build dashboard")?;

    debug!(
        company = %criteria.company,
        window = %criteria.time_window,
        transactions = dashboard.transactions.len(),
        companies = dashboard.aggregates.len(),
        summaries = dashboard.summaries.len(),
        "Dashboard built"
    );

    Ok(dashboard)
}

pub fn cmd_init(settings: &Settings) -> Result<()> {
    println!(
        "🔧 Initializing database at {}...",
        settings.db_path.display()
    );

    let db = open_db(settings)?;
    db.initialize_schema()
        .context("Failed to create database schema")?;

    if db.is_encrypted() {
        println!("   🔒 Encryption: ENABLED");
    } else {
        println!("   ⚠️  Encryption: DISABLED (set FORM4_DB_KEY to enable)");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Load insiders, issuers, transactions and ai_summaries with your ingestion job");
    println!("  2. View the dashboard: form4 dashboard");
    println!("  3. Start web API: form4 serve");

    Ok(())
}
