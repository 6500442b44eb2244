//! Status and company listing commands

use anyhow::{Context, Result};
use form4_core::{company_options, Database};

pub fn cmd_status(db: &Database) -> Result<()> {
    let stats = db.stats().context("Failed to read database status")?;

    let size = std::fs::metadata(db.path()).map(|m| m.len()).unwrap_or(0);

    println!();
    println!("📁 Database Status");
    println!("   ─────────────────────────────");
    println!("   Path: {}", db.path());
    println!("   Size: {:.1} KB", size as f64 / 1024.0);
    if db.is_encrypted() {
        println!("   🔒 Encryption: ENABLED");
    } else {
        println!("   ⚠️  Encryption: DISABLED");
    }
    println!();
    println!("   Insiders:      {:>8}", stats.insiders);
    println!("   Issuers:       {:>8}", stats.issuers);
    println!("   Transactions:  {:>8}", stats.transactions);
    println!("   AI summaries:  {:>8}", stats.summaries);

    Ok(())
}

pub fn cmd_companies(db: &Database) -> Result<()> {
    let transactions = db
        .fetch_transactions()
        .context("Failed to fetch transactions")?;
    let options = company_options(&transactions);

    println!();
    println!("🏢 Companies");
    println!("   ─────────────────────────────");
    for option in &options {
        println!("   {}", option);
    }

    if options.len() == 1 {
        println!();
        println!("   No transactions yet.");
    }

    Ok(())
}
