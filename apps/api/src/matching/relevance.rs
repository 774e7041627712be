//! Skill relevance: pluggable scorer that answers "how much does this skill matter
//! for this role?" with a probability in [0, 1].
//!
//! Default: `CatalogRelevanceScorer` (deterministic, derived from the catalog).
//! `AppState` holds an `Arc<dyn SkillRelevanceScorer>`, so a model-backed scorer can be
//! swapped in without touching the gap analyzer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::catalog::JobCatalog;

pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.6;

const REQUIRED_BASE: f64 = 0.7;
const PREFERRED_BASE: f64 = 0.45;
const UNLISTED_BASE: f64 = 0.2;
const MARKET_SHARE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRelevance {
    pub skill: String,
    pub job_role: String,
    pub relevance_score: f64,
    pub is_relevant: bool,
}

pub trait SkillRelevanceScorer: Send + Sync {
    fn relevance(&self, skill: &str, job_title: &str) -> SkillRelevance;
}

/// Scores relevance from how the role lists the skill and how widely the catalog
/// requires it:
///
/// score = base(required 0.7 | preferred 0.45 | unlisted 0.2) + 0.3 × required share
pub struct CatalogRelevanceScorer {
    catalog: Arc<JobCatalog>,
    threshold: f64,
}

impl CatalogRelevanceScorer {
    pub fn new(catalog: Arc<JobCatalog>, threshold: f64) -> Self {
        Self { catalog, threshold }
    }
}

impl SkillRelevanceScorer for CatalogRelevanceScorer {
    fn relevance(&self, skill: &str, job_title: &str) -> SkillRelevance {
        let base = match self.catalog.get(job_title) {
            Some(role) if role.requires(skill) => REQUIRED_BASE,
            Some(role) if role.prefers(skill) => PREFERRED_BASE,
            _ => UNLISTED_BASE,
        };
        let relevance_score =
            (base + MARKET_SHARE_WEIGHT * self.catalog.required_share(skill)).clamp(0.0, 1.0);

        SkillRelevance {
            skill: skill.to_string(),
            job_role: job_title.to_string(),
            relevance_score,
            is_relevant: relevance_score > self.threshold,
        }
    }
}
