//! Job Ranker: scores each shortlisted catalog role against a profile and keeps
//! the roles that clear the match threshold.
//!
//! Algorithm, per candidate title with a catalog entry:
//! 1. skill_match = |required ∩ technical skills| / |required|
//! 2. experience_ratio = candidate years / required years (uncapped)
//! 3. match_score = (skill_match × skill_weight + experience_ratio × experience_weight) × 100
//!    where experience_weight is 0.4 for senior roles and 0.3 otherwise
//! 4. keep match_score > 60, stable-sort descending

use std::collections::HashSet;

use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::models::catalog::{JobCatalog, JobRoleDefinition, SalaryRange, SeniorityTier};
use crate::models::profile::Profile;

/// Roles at or below this score are not recommended.
pub const MATCH_THRESHOLD: f64 = 60.0;

const SENIOR_EXPERIENCE_WEIGHT: f64 = 0.4;
const DEFAULT_EXPERIENCE_WEIGHT: f64 = 0.3;

/// A ranked role. Built once by the ranker and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub title: String,
    #[serde(serialize_with = "serialize_one_decimal")]
    pub match_score: f64,
    pub required_skills: Vec<String>,
    pub salary: SalaryRange,
    pub experience_required: f64,
    #[serde(skip)]
    pub seniority: SeniorityTier,
}

fn serialize_one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10.0).round() / 10.0)
}

/// Experience counts for more when the role is senior.
pub fn experience_weight(tier: SeniorityTier) -> f64 {
    match tier {
        SeniorityTier::Senior => SENIOR_EXPERIENCE_WEIGHT,
        SeniorityTier::Junior | SeniorityTier::Mid => DEFAULT_EXPERIENCE_WEIGHT,
    }
}

/// Fraction of the role's required skills present in the profile's technical skills.
pub fn skill_match_ratio(required_skills: &[String], profile: &Profile) -> f64 {
    if required_skills.is_empty() {
        return 0.0;
    }
    let matched = required_skills
        .iter()
        .filter(|skill| profile.has_technical_skill(skill))
        .count();
    matched as f64 / required_skills.len() as f64
}

/// Match score for one role, before thresholding.
pub fn compute_match_score(role: &JobRoleDefinition, profile: &Profile, experience_years: f64) -> f64 {
    let skill_match = skill_match_ratio(&role.required_skills, profile);
    let exp_weight = experience_weight(role.seniority);
    let skill_weight = 1.0 - exp_weight;
    let experience_ratio = experience_years / role.required_experience;

    (skill_match * skill_weight + experience_ratio * exp_weight) * 100.0
}

/// Ranks candidate titles against the catalog.
///
/// Titles without a catalog entry are skipped. Repeated titles are ranked once.
/// Ties keep candidate order.
pub fn rank_jobs<S: AsRef<str>>(
    profile: &Profile,
    candidate_titles: &[S],
    catalog: &JobCatalog,
    as_of_year: i32,
) -> Vec<MatchResult> {
    let experience_years = profile.total_experience_years(as_of_year);
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for title in candidate_titles {
        let title = title.as_ref();
        let Some(role) = catalog.get(title) else {
            warn!("Candidate title '{title}' not in catalog, skipping");
            continue;
        };
        if !seen.insert(role.title.to_lowercase()) {
            continue;
        }

        let match_score = compute_match_score(role, profile, experience_years);
        debug!(
            "Scored '{}' at {:.1} ({:?})",
            role.title, match_score, role.seniority
        );

        if match_score > MATCH_THRESHOLD {
            matches.push(MatchResult {
                title: role.title.clone(),
                match_score,
                required_skills: role.required_skills.clone(),
                salary: role.salary_range,
                experience_required: role.required_experience,
                seniority: role.seniority,
            });
        }
    }

    matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    matches
}
