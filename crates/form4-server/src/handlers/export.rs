//! Export handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
};
use serde::Deserialize;
use tracing::info;

use super::dashboard::{now, FilterQuery};
use crate::{AppError, AppState};
use form4_core::export::export_transactions as render_export;
use form4_core::{filter_transactions, ExportFormat};

/// Query parameters for transaction export
#[derive(Debug, Deserialize)]
pub struct TransactionExportQuery {
    /// Output format (default: csv)
    #[serde(default = "default_format")]
    pub format: String,
    pub company: Option<String>,
    pub window: Option<String>,
}

fn default_format() -> String {
    "csv".to_string()
}

/// GET /api/export/transactions - Export filtered transactions to CSV or JSON
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionExportQuery>,
) -> Result<Response<Body>, AppError> {
    let format: ExportFormat = params
        .format
        .parse()
        .map_err(|_| AppError::bad_request("Invalid format. Use 'csv' or 'json'"))?;

    let criteria = FilterQuery {
        company: params.company,
        window: params.window,
    }
    .criteria()?;

    let transactions = state.db.fetch_transactions()?;
    let filtered = filter_transactions(&transactions, &criteria, now());
    let body = render_export(&filtered, format)?;

    info!(
        "Exported {} transactions to {}",
        filtered.len(),
        format.as_str().to_uppercase()
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", format.file_name()),
        )
        .body(Body::from(body))
        .map_err(|e| AppError::internal(&e.to_string()))
}
