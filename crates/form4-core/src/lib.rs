//! form4 Core Library
//!
//! Shared functionality for the form4 insider trading dashboard:
//! - Read-only database access (transactions and AI summaries)
//! - Filter & aggregate engine (company/time-window filtering, share totals)
//! - Keyword sentiment classification of summaries
//! - CSV/JSON export of filtered transactions
//! - Environment configuration

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod sentiment;

/// Test utilities for seeding fixture data
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Settings;
pub use db::Database;
pub use engine::{
    aggregate_shares_by_company, build_dashboard, company_options, filter_summaries,
    filter_transactions,
};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use models::{
    AggregateEntry, ClassifiedSummary, CompanyFilter, Dashboard, FilterCriteria, SummaryRecord,
    TimeWindow, TransactionRecord,
};
pub use sentiment::{classify_sentiment, Sentiment};
