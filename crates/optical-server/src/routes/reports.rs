use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use optical_core::SalesSummary;
use serde::Deserialize;
use serde_json::{json, Value};

use super::allow;
use crate::{error::ApiResult, state::AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/reports/summary", allow(get(sales_summary), "GET"))
        .route("/api/health", allow(get(health), "GET"))
}

#[derive(Debug, Deserialize)]
struct SummaryParams {
    threshold: Option<String>,
}

async fn sales_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> ApiResult<Json<SalesSummary>> {
    let threshold = params
        .threshold
        .and_then(|t| t.trim().parse().ok())
        .unwrap_or(state.config.low_stock_threshold);
    Ok(Json(state.store.sales_summary(threshold)?))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
