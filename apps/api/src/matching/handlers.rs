//! Axum route handlers for catalog browsing, single-role matching and skill levels.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::role_match::{analyze_role_match, RoleMatchOutcome};
use crate::matching::skill_levels::{
    analyze_level_gaps, skill_prerequisites, LevelGapReport, MAX_SKILL_LEVEL,
};
use crate::models::catalog::SeniorityTier;
use crate::models::profile::Profile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub title: String,
    pub seniority: SeniorityTier,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoleMatchRequest {
    pub profile: Profile,
    pub target_role: String,
}

/// GET /api/v1/catalog
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<Vec<RoleSummary>> {
    Json(
        state
            .catalog
            .roles()
            .iter()
            .map(|role| RoleSummary {
                title: role.title.clone(),
                seniority: role.seniority,
                required_skills: role.required_skills.clone(),
                preferred_skills: role.preferred_skills.clone(),
            })
            .collect(),
    )
}

/// POST /api/v1/analysis/role-match
///
/// Compares the profile with one role. Unknown roles answer with the list of
/// available roles rather than an error status.
pub async fn handle_role_match(
    State(state): State<AppState>,
    Json(request): Json<RoleMatchRequest>,
) -> Result<Json<RoleMatchOutcome>, AppError> {
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "target_role cannot be empty".to_string(),
        ));
    }

    Ok(Json(analyze_role_match(
        &request.profile,
        &request.target_role,
        &state.catalog,
    )))
}

#[derive(Debug, Deserialize)]
pub struct LevelGapRequest {
    #[serde(default)]
    pub user_skills: BTreeMap<String, u32>,
    pub required_skills: BTreeMap<String, u32>,
}

#[derive(Debug, Serialize)]
pub struct PrerequisitesResponse {
    pub skill: String,
    pub prerequisites: &'static [&'static str],
}

fn check_levels(field: &str, levels: &BTreeMap<String, u32>) -> Result<(), AppError> {
    match levels.iter().find(|(_, level)| **level > MAX_SKILL_LEVEL) {
        Some((skill, level)) => Err(AppError::Validation(format!(
            "{field}.{skill} is {level}; levels must be within 0-{MAX_SKILL_LEVEL}"
        ))),
        None => Ok(()),
    }
}

/// POST /api/v1/skills/gap
pub async fn handle_level_gaps(
    Json(request): Json<LevelGapRequest>,
) -> Result<Json<LevelGapReport>, AppError> {
    check_levels("user_skills", &request.user_skills)?;
    check_levels("required_skills", &request.required_skills)?;

    Ok(Json(analyze_level_gaps(
        &request.user_skills,
        &request.required_skills,
    )))
}

/// GET /api/v1/skills/:skill/prerequisites
pub async fn handle_prerequisites(Path(skill): Path<String>) -> Json<PrerequisitesResponse> {
    Json(PrerequisitesResponse {
        prerequisites: skill_prerequisites(&skill),
        skill,
    })
}
