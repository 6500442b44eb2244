//! Shares-by-company bar chart

use anyhow::Result;
use form4_core::{AggregateEntry, Database, FilterCriteria};

use super::{format_shares, load_dashboard, truncate};

/// Width of the longest bar in characters
const BAR_WIDTH: usize = 40;

pub fn cmd_chart(db: &Database, criteria: &FilterCriteria) -> Result<()> {
    let dashboard = load_dashboard(db, criteria)?;

    println!();
    println!(
        "📊 Total Insider Shares Bought by Company ({})",
        criteria.time_window.label()
    );
    print_chart(&dashboard.aggregates);

    Ok(())
}

pub fn print_chart(aggregates: &[AggregateEntry]) {
    println!("   ─────────────────────────────────────────────────────────────");

    if aggregates.is_empty() {
        println!("   No shares to chart for the current filters.");
        return;
    }

    for line in render_bar_chart(aggregates, BAR_WIDTH) {
        println!("   {}", line);
    }
}

/// Render one line per entry, in the order given, with bars scaled to the
/// largest absolute total
pub fn render_bar_chart(aggregates: &[AggregateEntry], width: usize) -> Vec<String> {
    let max = aggregates
        .iter()
        .map(|a| a.total_shares.abs())
        .fold(0.0_f64, f64::max);

    aggregates
        .iter()
        .map(|entry| {
            let len = if max > 0.0 {
                ((entry.total_shares.abs() / max) * width as f64).round() as usize
            } else {
                0
            };
            format!(
                "{:20} │ {:width$} {}",
                truncate(&entry.company_name, 20),
                "█".repeat(len),
                format_shares(Some(entry.total_shares)),
                width = width
            )
        })
        .collect()
}
