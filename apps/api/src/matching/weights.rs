//! Weight Selector: blending weights for the three sub-scores, chosen by the
//! seniority of the best-matching role.
//!
//! Weights are held in whole percentage points so every table sums to exactly 100.

use serde::{Serialize, Serializer};

use crate::matching::ranker::MatchResult;
use crate::models::catalog::SeniorityTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    skills_pct: u8,
    experience_pct: u8,
    education_pct: u8,
}

/// No match, or a mid-level top match.
pub const BALANCED_WEIGHTS: ScoreWeights = ScoreWeights::from_percent(40, 30, 30);
pub const SENIOR_WEIGHTS: ScoreWeights = ScoreWeights::from_percent(35, 45, 20);
pub const JUNIOR_WEIGHTS: ScoreWeights = ScoreWeights::from_percent(50, 20, 30);

impl ScoreWeights {
    const fn from_percent(skills: u8, experience: u8, education: u8) -> Self {
        let weights = Self {
            skills_pct: skills,
            experience_pct: experience,
            education_pct: education,
        };
        assert!(weights.total_percent() == 100);
        weights
    }

    pub fn skills(&self) -> f64 {
        f64::from(self.skills_pct) / 100.0
    }

    pub fn experience(&self) -> f64 {
        f64::from(self.experience_pct) / 100.0
    }

    pub fn education(&self) -> f64 {
        f64::from(self.education_pct) / 100.0
    }

    pub const fn total_percent(&self) -> u16 {
        self.skills_pct as u16 + self.experience_pct as u16 + self.education_pct as u16
    }

    /// Weighted sum of sub-scores (each 0–100). Stays in 0–100 when the inputs do.
    pub fn blend(&self, skills: f64, experience: f64, education: f64) -> f64 {
        (skills * f64::from(self.skills_pct)
            + experience * f64::from(self.experience_pct)
            + education * f64::from(self.education_pct))
            / 100.0
    }
}

impl Serialize for ScoreWeights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ScoreWeights", 3)?;
        state.serialize_field("skills", &self.skills())?;
        state.serialize_field("experience", &self.experience())?;
        state.serialize_field("education", &self.education())?;
        state.end()
    }
}

pub fn weights_for_tier(tier: SeniorityTier) -> ScoreWeights {
    match tier {
        SeniorityTier::Senior => SENIOR_WEIGHTS,
        SeniorityTier::Junior => JUNIOR_WEIGHTS,
        SeniorityTier::Mid => BALANCED_WEIGHTS,
    }
}

pub fn select_weights(top_match: Option<&MatchResult>) -> ScoreWeights {
    top_match
        .map(|job| weights_for_tier(job.seniority))
        .unwrap_or(BALANCED_WEIGHTS)
}
