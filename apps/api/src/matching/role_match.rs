//! Role match: how a profile measures up against one named role, with actionable
//! recommendations.

use serde::Serialize;

use crate::models::catalog::{JobCatalog, JobRoleDefinition};
use crate::models::profile::Profile;

const REQUIRED_WEIGHT: f64 = 0.7;
const PREFERRED_WEIGHT: f64 = 0.3;
/// Profiles listing fewer technical skills than this get a diversity nudge.
const MIN_TECHNICAL_SKILLS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct RoleMatch {
    pub role: String,
    pub overall_match: f64,
    pub required_skills_match: f64,
    pub preferred_skills_match: f64,
    pub missing_required_skills: Vec<String>,
    pub missing_preferred_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecommendationKind {
    #[serde(rename = "Critical Skills Gap")]
    CriticalSkillsGap,
    #[serde(rename = "Skill Enhancement")]
    SkillEnhancement,
    #[serde(rename = "Skills Diversity")]
    SkillsDiversity,
    #[serde(rename = "Certifications")]
    Certifications,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RoleMatchOutcome {
    Matched {
        role_match: RoleMatch,
        recommendations: Vec<Recommendation>,
    },
    NotFound {
        error: String,
        available_roles: Vec<String>,
    },
}

/// Splits `skills` into (matched fraction, missing skills). An empty list counts as
/// fully covered.
fn coverage(skills: &[String], profile: &Profile) -> (f64, Vec<String>) {
    if skills.is_empty() {
        return (1.0, Vec::new());
    }
    let missing: Vec<String> = skills
        .iter()
        .filter(|s| !profile.has_technical_skill(s))
        .cloned()
        .collect();
    let matched = skills.len() - missing.len();
    (matched as f64 / skills.len() as f64, missing)
}

pub fn compute_role_match(role: &JobRoleDefinition, profile: &Profile) -> RoleMatch {
    let (required, missing_required_skills) = coverage(&role.required_skills, profile);
    let (preferred, missing_preferred_skills) = coverage(&role.preferred_skills, profile);

    RoleMatch {
        role: role.title.clone(),
        overall_match: (required * REQUIRED_WEIGHT + preferred * PREFERRED_WEIGHT) * 100.0,
        required_skills_match: required * 100.0,
        preferred_skills_match: preferred * 100.0,
        missing_required_skills,
        missing_preferred_skills,
    }
}

pub fn build_recommendations(role_match: Option<&RoleMatch>, profile: &Profile) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(m) = role_match {
        if !m.missing_required_skills.is_empty() {
            recommendations.push(Recommendation {
                kind: RecommendationKind::CriticalSkillsGap,
                description: "Focus on acquiring these required skills".to_string(),
                skills: m.missing_required_skills.clone(),
            });
        }
        if !m.missing_preferred_skills.is_empty() {
            recommendations.push(Recommendation {
                kind: RecommendationKind::SkillEnhancement,
                description: "Consider learning these preferred skills".to_string(),
                skills: m.missing_preferred_skills.clone(),
            });
        }
    }

    if profile.technical_skills.len() < MIN_TECHNICAL_SKILLS {
        recommendations.push(Recommendation {
            kind: RecommendationKind::SkillsDiversity,
            description: "Add more technical skills to your profile".to_string(),
            skills: vec![],
        });
    }

    if profile.certifications.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Certifications,
            description: "Consider adding relevant certifications".to_string(),
            skills: vec![],
        });
    }

    recommendations
}

pub fn analyze_role_match(profile: &Profile, target_role: &str, catalog: &JobCatalog) -> RoleMatchOutcome {
    match catalog.get(target_role) {
        Some(role) => {
            let role_match = compute_role_match(role, profile);
            let recommendations = build_recommendations(Some(&role_match), profile);
            RoleMatchOutcome::Matched {
                role_match,
                recommendations,
            }
        }
        None => RoleMatchOutcome::NotFound {
            error: "Role requirements not found".to_string(),
            available_roles: catalog.titles(),
        },
    }
}
