//! Dashboard view handlers: companies, transactions, chart, summaries

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

use crate::{AppError, AppState};
use form4_core::engine::classify_summaries;
use form4_core::{
    aggregate_shares_by_company, build_dashboard, company_options, filter_summaries,
    filter_transactions, AggregateEntry, ClassifiedSummary, CompanyFilter, Dashboard,
    FilterCriteria, TimeWindow, TransactionRecord,
};

/// Query parameters shared by the filtered views
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Company name or "All" (default: All)
    pub company: Option<String>,
    /// Time window: all-time, last-7-days, 7d, ... (default: all-time)
    pub window: Option<String>,
}

impl FilterQuery {
    pub fn criteria(&self) -> Result<FilterCriteria, AppError> {
        let company = self
            .company
            .as_deref()
            .map(CompanyFilter::parse)
            .unwrap_or_default();
        let time_window = match self.window.as_deref() {
            Some(w) => w
                .parse::<TimeWindow>()
                .map_err(|e| AppError::bad_request(&e))?,
            None => TimeWindow::default(),
        };
        Ok(FilterCriteria::new(company, time_window))
    }
}

/// Query parameters for the summaries view
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub company: Option<String>,
}

/// Reference instant for time-window cutoffs, from the local clock to match
/// the naive local dates in the database
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// GET /api/companies - Selector options, "All" first
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, AppError> {
    let transactions = state.db.fetch_transactions()?;
    Ok(Json(company_options(&transactions)))
}

/// GET /api/transactions - Filtered transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterQuery>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let criteria = params.criteria()?;
    let transactions = state.db.fetch_transactions()?;
    let filtered = filter_transactions(&transactions, &criteria, now());

    debug!(
        company = %criteria.company,
        window = %criteria.time_window,
        count = filtered.len(),
        "Listed transactions"
    );

    Ok(Json(filtered))
}

/// GET /api/chart - Total shares per company, largest first
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterQuery>,
) -> Result<Json<Vec<AggregateEntry>>, AppError> {
    let criteria = params.criteria()?;
    let transactions = state.db.fetch_transactions()?;
    let filtered = filter_transactions(&transactions, &criteria, now());
    let aggregates = aggregate_shares_by_company(&filtered)?;

    Ok(Json(aggregates))
}

/// GET /api/summaries - AI summaries with sentiment
pub async fn list_summaries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<Vec<ClassifiedSummary>>, AppError> {
    let company = params
        .company
        .as_deref()
        .map(CompanyFilter::parse)
        .unwrap_or_default();
    let criteria = FilterCriteria::default().company(company);

    let summaries = state.db.fetch_summaries()?;
    Ok(Json(classify_summaries(filter_summaries(
        &summaries, &criteria,
    ))))
}

/// GET /api/dashboard - Every view for one selection
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterQuery>,
) -> Result<Json<Dashboard>, AppError> {
    let criteria = params.criteria()?;
    let transactions = state.db.fetch_transactions()?;
    let summaries = state.db.fetch_summaries()?;

    let dashboard = build_dashboard(&transactions, &summaries, &criteria, now())?;
    Ok(Json(dashboard))
}
