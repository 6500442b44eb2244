//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{AppError, AppState};

/// GET /api/health - Liveness plus a cheap database round trip
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let stats = state.db.stats()?;

    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "encrypted": state.db.is_encrypted(),
        "transactions": stats.transactions,
        "summaries": stats.summaries,
    })))
}
