//! Sub-Score Calculators: skills, experience and education, each 0–100,
//! blended into the overall score by the weight selector.

use serde::Serialize;

use crate::matching::ranker::{skill_match_ratio, MatchResult};
use crate::matching::weights::{select_weights, ScoreWeights};
use crate::models::profile::{EducationEntry, Profile};

/// Number of top-ranked jobs averaged by the skill sub-score.
const TOP_JOBS_FOR_SKILLS: usize = 3;
/// Years of experience at which the years component saturates.
const YEARS_CEILING: f64 = 10.0;
const YEARS_WEIGHT: f64 = 0.6;
const RELEVANCE_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceSummary {
    pub total_years: f64,
    /// Years spent in entries that mention at least one skill.
    pub relevant_years: f64,
}

/// Unrounded sub-scores plus the blended overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileScores {
    pub skills_match: f64,
    pub experience: f64,
    pub education: f64,
    pub overall_score: f64,
    pub weights: ScoreWeights,
}

pub fn summarize_experience(profile: &Profile, as_of_year: i32) -> ExperienceSummary {
    profile.experience_spans(as_of_year).iter().fold(
        ExperienceSummary {
            total_years: 0.0,
            relevant_years: 0.0,
        },
        |mut acc, (entry, span)| {
            acc.total_years += span.years();
            if entry.is_relevant() {
                acc.relevant_years += span.years();
            }
            acc
        },
    )
}

/// Mean required-skill coverage over the top three ranked jobs, ×100. 0 when no jobs are ranked.
pub fn skill_match_score(profile: &Profile, ranked_jobs: &[MatchResult]) -> f64 {
    let top: Vec<_> = ranked_jobs.iter().take(TOP_JOBS_FOR_SKILLS).collect();
    if top.is_empty() {
        return 0.0;
    }
    let total: f64 = top
        .iter()
        .map(|job| skill_match_ratio(&job.required_skills, profile))
        .sum();
    total / top.len() as f64 * 100.0
}

/// (min(years/10, 1) × 0.6 + relevant/total × 0.4) × 100
pub fn experience_score(summary: &ExperienceSummary) -> f64 {
    let years_score = (summary.total_years / YEARS_CEILING).min(1.0);
    let relevance_score = if summary.total_years > 0.0 {
        summary.relevant_years / summary.total_years
    } else {
        0.0
    };
    (years_score * YEARS_WEIGHT + relevance_score * RELEVANCE_WEIGHT) * 100.0
}

/// Highest education level on the fixed scale, ×100. 0 when there are no entries.
pub fn education_score(education: &[EducationEntry]) -> f64 {
    education
        .iter()
        .map(|entry| entry.level.score())
        .fold(0.0, f64::max)
        * 100.0
}

pub fn score_profile(profile: &Profile, ranked_jobs: &[MatchResult], as_of_year: i32) -> ProfileScores {
    let skills_match = skill_match_score(profile, ranked_jobs);
    let experience = experience_score(&summarize_experience(profile, as_of_year));
    let education = education_score(&profile.education);
    let weights = select_weights(ranked_jobs.first());

    ProfileScores {
        skills_match,
        experience,
        education,
        overall_score: weights.blend(skills_match, experience, education),
        weights,
    }
}
