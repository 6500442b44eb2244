//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (settings, open_db, dashboard loading) and init
//! - `status` - Status and company listing commands
//! - `transactions` - Filtered transaction table
//! - `chart` - Shares-by-company bar chart
//! - `summaries` - Sentiment-colored AI summaries
//! - `dashboard` - All views on one page
//! - `export` - CSV/JSON export of filtered transactions
//! - `serve` - Web server command

pub mod chart;
pub mod core;
pub mod dashboard;
pub mod export;
pub mod serve;
pub mod status;
pub mod summaries;
pub mod transactions;

// Re-export command functions for main.rs
pub use chart::*;
pub use core::*;
pub use dashboard::*;
pub use export::*;
pub use serve::*;
pub use status::*;
pub use summaries::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a share count, dropping the decimals for whole numbers
pub fn format_shares(shares: Option<f64>) -> String {
    match shares {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Format a currency amount
pub fn format_money(amount: Option<f64>) -> String {
    match amount {
        Some(v) if v < 0.0 => format!("-${:.2}", v.abs()),
        Some(v) => format!("${:.2}", v),
        None => "-".to_string(),
    }
}
