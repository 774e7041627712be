//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::analysis::pipeline::{analyze_profile, AnalysisReport};
use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub profile: Profile,
    /// Titles to rank. When omitted, titles are shortlisted from the profile's technical skills.
    #[serde(default)]
    pub candidate_titles: Option<Vec<String>>,
}

/// POST /api/v1/analysis
///
/// Ranks catalog roles for the profile and returns scores, recommended jobs and
/// prioritized missing skills.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let as_of_year = Utc::now().year();

    let report = analyze_profile(
        &request.profile,
        request.candidate_titles.as_deref(),
        &state.catalog,
        state.relevance_scorer.as_ref(),
        as_of_year,
    )?;

    Ok(Json(report))
}
