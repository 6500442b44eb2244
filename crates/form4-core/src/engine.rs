//! Filter & aggregate engine
//!
//! Pure functions over fetched records. Every call takes a complete input
//! snapshot plus the selector state and returns a complete output snapshot;
//! nothing here touches the database or keeps state between calls.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    AggregateEntry, ClassifiedSummary, Dashboard, FilterCriteria, SummaryRecord,
    TransactionRecord, ALL_COMPANIES,
};
use crate::sentiment::classify_sentiment;

/// Keep transactions matching the company selector and time window.
///
/// The window cutoff and each record date are compared at calendar-day
/// precision, inclusively: anything dated on the cutoff day is kept.
pub fn filter_transactions(
    all: &[TransactionRecord],
    criteria: &FilterCriteria,
    now: NaiveDateTime,
) -> Vec<TransactionRecord> {
    let cutoff_day = criteria.time_window.cutoff(now).map(|c| c.date());

    let filtered: Vec<TransactionRecord> = all
        .iter()
        .filter(|tx| criteria.company.matches(&tx.company_name))
        .filter(|tx| match cutoff_day {
            Some(day) => tx.transaction_date.date() >= day,
            None => true,
        })
        .cloned()
        .collect();

    debug!(
        company = %criteria.company,
        window = %criteria.time_window,
        total = all.len(),
        kept = filtered.len(),
        "Filtered transactions"
    );

    filtered
}

/// Sum shares per company, largest total first.
///
/// Companies with equal totals keep the order in which they first appear in
/// `transactions`. A row without a share count aborts the whole aggregation.
pub fn aggregate_shares_by_company(
    transactions: &[TransactionRecord],
) -> Result<Vec<AggregateEntry>> {
    let mut entries: Vec<AggregateEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tx in transactions {
        let shares = tx.shares.ok_or_else(|| {
            Error::DataIntegrity(format!(
                "transaction by {} in {} on {} has no share count",
                tx.insider_name, tx.company_name, tx.transaction_date
            ))
        })?;

        match index.get(tx.company_name.as_str()) {
            Some(&i) => entries[i].total_shares += shares,
            None => {
                index.insert(tx.company_name.as_str(), entries.len());
                entries.push(AggregateEntry {
                    company_name: tx.company_name.clone(),
                    total_shares: shares,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-appearance order
    entries.sort_by(|a, b| b.total_shares.total_cmp(&a.total_shares));

    debug!(companies = entries.len(), "Aggregated shares by company");
    Ok(entries)
}

/// Keep summaries for the selected company. The time window never applies.
pub fn filter_summaries(all: &[SummaryRecord], criteria: &FilterCriteria) -> Vec<SummaryRecord> {
    all.iter()
        .filter(|s| criteria.company.matches(&s.company_name))
        .cloned()
        .collect()
}

/// Attach a sentiment bucket to each summary, preserving order
pub fn classify_summaries(summaries: Vec<SummaryRecord>) -> Vec<ClassifiedSummary> {
    summaries
        .into_iter()
        .map(|summary| {
            let sentiment = classify_sentiment(summary.text());
            ClassifiedSummary { summary, sentiment }
        })
        .collect()
}

/// Company selector options: `All`, then each company in first-appearance order
pub fn company_options(all: &[TransactionRecord]) -> Vec<String> {
    let mut options = vec![ALL_COMPANIES.to_string()];
    let mut seen: HashSet<&str> = HashSet::new();

    for tx in all {
        if seen.insert(tx.company_name.as_str()) {
            options.push(tx.company_name.clone());
        }
    }

    options
}

/// Run the whole pipeline for one request
pub fn build_dashboard(
    transactions: &[TransactionRecord],
    summaries: &[SummaryRecord],
    criteria: &FilterCriteria,
    now: NaiveDateTime,
) -> Result<Dashboard> {
    let filtered = filter_transactions(transactions, criteria, now);
    let aggregates = aggregate_shares_by_company(&filtered)?;
    let classified = classify_summaries(filter_summaries(summaries, criteria));

    Ok(Dashboard {
        criteria: criteria.clone(),
        companies: company_options(transactions),
        transactions: filtered,
        aggregates,
        summaries: classified,
    })
}
