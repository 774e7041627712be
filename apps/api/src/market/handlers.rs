//! Axum route handlers for the Market API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::market::health::{analyze_market, MarketAnalysis};
use crate::market::salary::{analyze_salary, SalaryTrends};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SalaryQuery {
    pub location: Option<String>,
}

/// GET /api/v1/market/:title
///
/// Always 200: unknown titles return `{error, similar_roles}`.
pub async fn handle_market_analysis(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Json<MarketAnalysis> {
    Json(analyze_market(
        &title,
        &state.catalog,
        state.projector.as_ref(),
    ))
}

/// GET /api/v1/market/:title/salary?location=
pub async fn handle_salary_trends(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Query(query): Query<SalaryQuery>,
) -> Result<Json<SalaryTrends>, AppError> {
    analyze_salary(&title, query.location.as_deref(), &state.catalog)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job title '{title}' not found")))
}
