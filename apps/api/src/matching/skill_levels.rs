//! Level-based skill gaps: compares the candidate's proficiency per skill (0–100)
//! with the level a target asks for, and bands each shortfall by size.
//!
//! priority: gap ≥ 50 Critical, ≥ 30 High, ≥ 15 Medium, otherwise Low

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::profile::skill_key;

pub const CRITICAL_GAP: u32 = 50;
pub const HIGH_GAP: u32 = 30;
pub const MEDIUM_GAP: u32 = 15;

/// Proficiency levels are percentages.
pub const MAX_SKILL_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GapBand {
    Low,
    Medium,
    High,
    Critical,
}

impl GapBand {
    pub fn from_gap(gap: u32) -> Self {
        match gap {
            g if g >= CRITICAL_GAP => GapBand::Critical,
            g if g >= HIGH_GAP => GapBand::High,
            g if g >= MEDIUM_GAP => GapBand::Medium,
            _ => GapBand::Low,
        }
    }

    fn is_urgent(self) -> bool {
        matches!(self, GapBand::Critical | GapBand::High)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelGap {
    pub current_level: u32,
    pub required_level: u32,
    pub gap: u32,
    pub priority: GapBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LearningPlan {
    #[serde(rename = "Immediate Learning")]
    Immediate,
    #[serde(rename = "Gradual Improvement")]
    Gradual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningRecommendation {
    pub skill: String,
    #[serde(rename = "type")]
    pub plan: LearningPlan,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelGapReport {
    /// Keyed by the skill name as the target spells it.
    pub gaps: BTreeMap<String, LevelGap>,
    pub total_gap_score: u32,
    pub recommendations: Vec<LearningRecommendation>,
}

/// Skills the candidate already meets or exceeds are left out. A skill missing from
/// `current_levels` counts as level 0. Names match case-insensitively.
pub fn analyze_level_gaps(
    current_levels: &BTreeMap<String, u32>,
    required_levels: &BTreeMap<String, u32>,
) -> LevelGapReport {
    let current: HashMap<String, u32> = current_levels
        .iter()
        .map(|(skill, level)| (skill_key(skill), *level))
        .collect();

    let gaps: BTreeMap<String, LevelGap> = required_levels
        .iter()
        .filter_map(|(skill, &required_level)| {
            let current_level = current.get(&skill_key(skill)).copied().unwrap_or(0);
            let gap = required_level.saturating_sub(current_level);
            (gap > 0).then(|| {
                (
                    skill.clone(),
                    LevelGap {
                        current_level,
                        required_level,
                        gap,
                        priority: GapBand::from_gap(gap),
                    },
                )
            })
        })
        .collect();

    let recommendations = gaps
        .iter()
        .map(|(skill, gap)| {
            if gap.priority.is_urgent() {
                LearningRecommendation {
                    skill: skill.clone(),
                    plan: LearningPlan::Immediate,
                    reason: format!("Critical skill gap of {}%", gap.gap),
                }
            } else {
                LearningRecommendation {
                    skill: skill.clone(),
                    plan: LearningPlan::Gradual,
                    reason: format!("Moderate skill gap of {}%", gap.gap),
                }
            }
        })
        .collect();

    LevelGapReport {
        total_gap_score: gaps.values().map(|g| g.gap).sum(),
        gaps,
        recommendations,
    }
}

const PREREQUISITES: &[(&str, &[&str])] = &[
    ("React", &["JavaScript", "HTML", "CSS"]),
    ("Machine Learning", &["Python", "Statistics", "Linear Algebra"]),
    ("Cloud Architecture", &["Networking", "Security", "Operating Systems"]),
];

/// Skills worth having before learning `skill`. Unknown skills have none.
pub fn skill_prerequisites(skill: &str) -> &'static [&'static str] {
    let key = skill_key(skill);
    PREREQUISITES
        .iter()
        .find(|(name, _)| skill_key(name) == key)
        .map(|(_, prerequisites)| *prerequisites)
        .unwrap_or(&[])
}
