//! Full dashboard command

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use form4_core::{Database, FilterCriteria};

use super::{load_dashboard, print_chart, print_summaries, print_transactions};

pub fn cmd_dashboard(db: &Database, criteria: &FilterCriteria, json: bool) -> Result<()> {
    let dashboard = load_dashboard(db, criteria)?;

    if json {
        let out = serde_json::to_string_pretty(&dashboard)
            .context("Failed to serialize dashboard")?;
        println!("{}", out);
        return Ok(());
    }

    println!();
    println!("📈 Insider Trading Dashboard");
    println!(
        "   Company: {}   Time window: {}",
        criteria.company,
        criteria.time_window.label()
    );
    println!("   Companies: {}", dashboard.companies.join(", "));

    println!();
    println!("📜 Recent Insider Transactions");
    print_transactions(&dashboard.transactions);

    println!();
    println!("📊 Total Insider Shares Bought by Company");
    print_chart(&dashboard.aggregates);

    println!();
    println!("🧠 AI Generated Company Summaries");
    print_summaries(&dashboard.summaries);

    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {}", footer(Local::now().year()));

    Ok(())
}

pub fn footer(year: i32) -> String {
    format!(
        "© {} Insider Trading Dashboard | Version {}",
        year,
        env!("CARGO_PKG_VERSION")
    )
}
