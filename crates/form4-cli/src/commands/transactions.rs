//! Transaction table command

use anyhow::Result;
use form4_core::{Database, FilterCriteria, TransactionRecord};

use super::{format_money, format_shares, load_transactions, truncate};

pub fn cmd_transactions(db: &Database, criteria: &FilterCriteria) -> Result<()> {
    let transactions = load_transactions(db, criteria)?;

    println!();
    println!(
        "📜 Recent Insider Transactions ({} · {})",
        criteria.company,
        criteria.time_window.label()
    );
    print_transactions(&transactions);

    Ok(())
}

/// Print transactions as a table, newest first as fetched
pub fn print_transactions(transactions: &[TransactionRecord]) {
    println!("   ─────────────────────────────────────────────────────────────────────────────────────────");

    if transactions.is_empty() {
        println!("   No transactions match the current filters.");
        return;
    }

    println!(
        "   {:10} │ {:20} │ {:20} │ {:4} │ {:>10} │ {:>10} │ {:>14}",
        "Date", "Insider", "Company", "Code", "Shares", "Price", "Total value"
    );
    println!("   ───────────┼──────────────────────┼──────────────────────┼──────┼────────────┼────────────┼───────────────");

    for tx in transactions {
        println!(
            "   {:10} │ {:20} │ {:20} │ {:4} │ {:>10} │ {:>10} │ {:>14}",
            tx.transaction_date.format("%Y-%m-%d"),
            truncate(&tx.insider_name, 20),
            truncate(&tx.company_name, 20),
            tx.transaction_code.as_deref().unwrap_or("-"),
            format_shares(tx.shares),
            format_money(tx.price_per_share),
            format_money(tx.total_value),
        );
    }

    println!();
    println!("   {} transaction(s)", transactions.len());
}
