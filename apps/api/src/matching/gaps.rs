//! Skill Gap Analyzer: required skills of the best-matching jobs that the profile
//! lacks, kept when the relevance scorer deems them relevant.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::ranker::MatchResult;
use crate::matching::relevance::SkillRelevanceScorer;
use crate::models::profile::{skill_key, Profile};

/// Jobs, in rank order, whose required skills feed the gap list.
const GAP_SOURCE_JOBS: usize = 3;
pub const MAX_SKILL_GAPS: usize = 5;
/// Relevance above this is a high-priority gap.
const HIGH_PRIORITY_RELEVANCE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub priority: GapPriority,
    /// 0–100
    pub relevance: u32,
}

pub fn find_skill_gaps(
    ranked_jobs: &[MatchResult],
    profile: &Profile,
    scorer: &dyn SkillRelevanceScorer,
) -> Vec<SkillGap> {
    let mut seen = HashSet::new();
    let mut gaps = Vec::new();

    for job in ranked_jobs.iter().take(GAP_SOURCE_JOBS) {
        for skill in &job.required_skills {
            if profile.has_technical_skill(skill) || seen.contains(&skill_key(skill)) {
                continue;
            }
            let relevance = scorer.relevance(skill, &job.title);
            if !relevance.is_relevant {
                continue;
            }
            seen.insert(skill_key(skill));
            gaps.push(SkillGap {
                skill: skill.clone(),
                priority: if relevance.relevance_score > HIGH_PRIORITY_RELEVANCE {
                    GapPriority::High
                } else {
                    GapPriority::Medium
                },
                relevance: (relevance.relevance_score.clamp(0.0, 1.0) * 100.0).round() as u32,
            });
        }
    }

    gaps.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    gaps.truncate(MAX_SKILL_GAPS);
    gaps
}
