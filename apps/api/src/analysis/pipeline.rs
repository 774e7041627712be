//! Analysis pipeline: Profile + JobCatalog → scores, rankings and gaps.
//!
//! Steps:
//! 1. shortlist titles (unless the caller supplied them)
//! 2. rank jobs
//! 3. skill gaps from the top three jobs
//! 4. sub-scores blended by seniority weights
//! 5. category-level gap summary
//!
//! Pure: no I/O, no clock. The caller supplies the year used to resolve "present".

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::analysis::shortlist::shortlist_titles;
use crate::matching::gaps::{find_skill_gaps, SkillGap};
use crate::matching::ranker::{rank_jobs, MatchResult};
use crate::matching::relevance::SkillRelevanceScorer;
use crate::matching::sub_scores::score_profile;
use crate::models::catalog::JobCatalog;
use crate::models::profile::Profile;

/// Recommended jobs returned to the caller.
const MAX_RECOMMENDED_JOBS: usize = 5;
/// Skills at or above this confidence are not reported as gaps.
const STRONG_CONFIDENCE: f64 = 0.8;
/// Slack for float noise when checking the 0–100 bound.
const SCORE_EPSILON: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{name} score {value} is outside 0-100")]
    ScoreOutOfRange { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGap {
    pub category: String,
    /// 0–100
    pub gap: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGapSummary {
    pub technical: Vec<CategoryGap>,
    pub soft: Vec<CategoryGap>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub overall_score: u32,
    pub skills_match: u32,
    pub experience: u32,
    pub education: u32,
    pub missing_skills: Vec<SkillGap>,
    pub recommended_jobs: Vec<MatchResult>,
    pub skill_gaps: SkillGapSummary,
}

fn to_percent(name: &'static str, value: f64) -> Result<u32, AnalysisError> {
    if !value.is_finite() || value < -SCORE_EPSILON || value > 100.0 + SCORE_EPSILON {
        return Err(AnalysisError::ScoreOutOfRange { name, value });
    }
    Ok(value.round().clamp(0.0, 100.0) as u32)
}

fn gap_percent(confidence: f64) -> u32 {
    ((1.0 - confidence) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// One entry per skill category touched by the ranked jobs' required skills, where
/// the profile's best skill in that category is below `STRONG_CONFIDENCE`.
fn technical_category_gaps(
    ranked_jobs: &[MatchResult],
    profile: &Profile,
    catalog: &JobCatalog,
) -> Vec<CategoryGap> {
    let categories: BTreeSet<&str> = ranked_jobs
        .iter()
        .flat_map(|job| job.required_skills.iter())
        .filter_map(|skill| catalog.skill_category(skill))
        .collect();

    categories
        .into_iter()
        .filter_map(|category| {
            let best = profile
                .technical_skills
                .values()
                .filter(|record| catalog.skill_category(&record.name) == Some(category))
                .map(|record| record.confidence)
                .fold(0.0, f64::max);
            (best < STRONG_CONFIDENCE).then(|| CategoryGap {
                category: category.to_string(),
                gap: gap_percent(best),
            })
        })
        .collect()
}

fn soft_skill_gaps(profile: &Profile) -> Vec<CategoryGap> {
    profile
        .soft_skills
        .values()
        .filter(|record| record.confidence < STRONG_CONFIDENCE)
        .map(|record| CategoryGap {
            category: record.name.clone(),
            gap: gap_percent(record.confidence),
        })
        .collect()
}

pub fn analyze_profile(
    profile: &Profile,
    candidate_titles: Option<&[String]>,
    catalog: &JobCatalog,
    scorer: &dyn SkillRelevanceScorer,
    as_of_year: i32,
) -> Result<AnalysisReport, AnalysisError> {
    let shortlisted;
    let titles = match candidate_titles {
        Some(titles) => titles,
        None => {
            shortlisted = shortlist_titles(profile, catalog);
            &shortlisted[..]
        }
    };

    let mut ranked = rank_jobs(profile, titles, catalog, as_of_year);
    let missing_skills = find_skill_gaps(&ranked, profile, scorer);
    let scores = score_profile(profile, &ranked, as_of_year);
    let skill_gaps = SkillGapSummary {
        technical: technical_category_gaps(&ranked, profile, catalog),
        soft: soft_skill_gaps(profile),
    };

    ranked.truncate(MAX_RECOMMENDED_JOBS);

    let report = AnalysisReport {
        overall_score: to_percent("overall", scores.overall_score)?,
        skills_match: to_percent("skills", scores.skills_match)?,
        experience: to_percent("experience", scores.experience)?,
        education: to_percent("education", scores.education)?,
        missing_skills,
        recommended_jobs: ranked,
        skill_gaps,
    };

    info!(
        "Analyzed profile against {} candidate titles: {} recommended, overall {}/100",
        titles.len(),
        report.recommended_jobs.len(),
        report.overall_score
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::matching::relevance::{CatalogRelevanceScorer, DEFAULT_RELEVANCE_THRESHOLD};
    use crate::models::catalog::tests::make_role;
    use crate::models::profile::{
        EducationEntry, EducationLevel, ExperienceEntry, ProfileInput, SkillRecord, YearSpec,
    };

    fn make_scorer(catalog: &Arc<JobCatalog>) -> CatalogRelevanceScorer {
        CatalogRelevanceScorer::new(Arc::clone(catalog), DEFAULT_RELEVANCE_THRESHOLD)
    }

    fn make_example_profile() -> Profile {
        Profile::from(ProfileInput {
            technical_skills: vec![SkillRecord::new("python", 0.9), SkillRecord::new("sql", 0.85)],
            soft_skills: vec![
                SkillRecord::new("Communication", 0.9),
                SkillRecord::new("Leadership", 0.7),
            ],
            experience: vec![ExperienceEntry::new(
                YearSpec::Number(2019),
                YearSpec::Text("present".to_string()),
                vec!["python".to_string()],
            )],
            education: vec![EducationEntry::new(EducationLevel::Bachelors)],
            certifications: vec![],
        })
    }

    fn make_full_profile() -> Profile {
        Profile::from(ProfileInput {
            technical_skills: ["Python", "SQL", "Docker", "AWS", "JavaScript", "React"]
                .iter()
                .map(|s| SkillRecord::new(*s, 0.85))
                .collect(),
            experience: vec![
                ExperienceEntry::new(
                    YearSpec::Number(2015),
                    YearSpec::Number(2019),
                    vec!["Python".to_string()],
                ),
                ExperienceEntry::new(
                    YearSpec::Number(2019),
                    YearSpec::Text("present".to_string()),
                    vec![],
                ),
            ],
            education: vec![EducationEntry::new(EducationLevel::Masters)],
            ..Default::default()
        })
    }

    #[test]
    fn test_backend_developer_example() {
        let catalog = Arc::new(
            JobCatalog::from_roles(vec![make_role(
                "Backend Developer",
                &["python", "java", "sql"],
                &[],
                3.0,
            )])
            .unwrap(),
        );
        let profile = make_example_profile();
        let report =
            analyze_profile(&profile, None, &catalog, &make_scorer(&catalog), 2026).unwrap();

        assert_eq!(report.recommended_jobs.len(), 1);
        assert_eq!(report.recommended_jobs[0].title, "Backend Developer");
        // 2/3 coverage
        assert_eq!(report.skills_match, 67);
        // 7 years, all relevant: (0.7 × 0.6 + 1.0 × 0.4) × 100 = 82
        assert_eq!(report.experience, 82);
        assert_eq!(report.education, 80);
        // 0.4 × 66.67 + 0.3 × 82 + 0.3 × 80 = 75.27
        assert_eq!(report.overall_score, 75);

        // java: 0.7 + 0.3 × 1/1 = 1.0 → High
        assert_eq!(report.missing_skills.len(), 1);
        assert_eq!(report.missing_skills[0].skill, "java");
        assert_eq!(report.missing_skills[0].relevance, 100);

        assert_eq!(
            report.skill_gaps.soft,
            vec![CategoryGap {
                category: "Leadership".to_string(),
                gap: 30
            }]
        );
    }

    #[test]
    fn test_empty_profile_yields_zero_and_no_recommendations() {
        let catalog = Arc::new(JobCatalog::bundled().unwrap());
        let report = analyze_profile(
            &Profile::default(),
            None,
            &catalog,
            &make_scorer(&catalog),
            2026,
        )
        .unwrap();
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.skills_match, 0);
        assert_eq!(report.experience, 0);
        assert_eq!(report.education, 0);
        assert!(report.recommended_jobs.is_empty());
        assert!(report.missing_skills.is_empty());
    }

    #[test]
    fn test_empty_profile_with_explicit_titles_still_below_threshold() {
        let catalog = Arc::new(JobCatalog::bundled().unwrap());
        let titles = catalog.titles();
        let report = analyze_profile(
            &Profile::default(),
            Some(titles.as_slice()),
            &catalog,
            &make_scorer(&catalog),
            2026,
        )
        .unwrap();
        assert!(report.recommended_jobs.is_empty());
    }

    #[test]
    fn test_report_invariants_on_bundled_catalog() {
        let catalog = Arc::new(JobCatalog::bundled().unwrap());
        let report = analyze_profile(
            &make_full_profile(),
            None,
            &catalog,
            &make_scorer(&catalog),
            2026,
        )
        .unwrap();

        for score in [
            report.overall_score,
            report.skills_match,
            report.experience,
            report.education,
        ] {
            assert!(score <= 100);
        }

        assert!(!report.recommended_jobs.is_empty());
        assert!(report.recommended_jobs.len() <= 5);
        assert!(report
            .recommended_jobs
            .iter()
            .all(|job| job.match_score > 60.0));
        assert!(report
            .recommended_jobs
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));

        assert!(report.missing_skills.len() <= 5);
        assert!(report
            .missing_skills
            .windows(2)
            .all(|w| w[0].relevance >= w[1].relevance));
        let unique: BTreeSet<_> = report
            .missing_skills
            .iter()
            .map(|g| g.skill.to_lowercase())
            .collect();
        assert_eq!(unique.len(), report.missing_skills.len());
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let catalog = Arc::new(JobCatalog::bundled().unwrap());
        let scorer = make_scorer(&catalog);
        let profile = make_full_profile();
        let first = analyze_profile(&profile, None, &catalog, &scorer, 2026).unwrap();
        let second = analyze_profile(&profile, None, &catalog, &scorer, 2026).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_technical_gaps_report_weak_categories() {
        let catalog = JobCatalog::from_json(
            r#"{
                "roles": [{
                    "title": "Backend Developer",
                    "required_skills": ["Python", "SQL", "Docker"],
                    "salary_range": [85000, 145000],
                    "required_experience": 3,
                    "demand": 84,
                    "growth": 10
                }],
                "skill_categories": {
                    "Python": "programming_languages",
                    "Go": "programming_languages",
                    "SQL": "databases",
                    "Docker": "cloud_platforms"
                }
            }"#,
        )
        .unwrap();
        let profile = Profile::from(ProfileInput {
            technical_skills: vec![
                SkillRecord::new("Go", 0.9),
                SkillRecord::new("Python", 0.7),
                SkillRecord::new("SQL", 0.75),
            ],
            ..Default::default()
        });
        let ranked = vec![MatchResult {
            title: "Backend Developer".to_string(),
            match_score: 70.0,
            required_skills: vec!["Python".into(), "SQL".into(), "Docker".into()],
            salary: catalog.roles()[0].salary_range,
            experience_required: 3.0,
            seniority: catalog.roles()[0].seniority,
        }];

        let gaps = technical_category_gaps(&ranked, &profile, &catalog);
        assert_eq!(
            gaps,
            vec![
                CategoryGap {
                    category: "cloud_platforms".to_string(),
                    gap: 100
                },
                CategoryGap {
                    category: "databases".to_string(),
                    gap: 25
                },
            ]
        );
    }

    #[test]
    fn test_out_of_range_score_is_an_error() {
        assert!(to_percent("overall", 100.4).is_err());
        assert!(to_percent("overall", f64::NAN).is_err());
        assert!(to_percent("overall", -1.0).is_err());
        assert_eq!(to_percent("overall", 99.5).unwrap(), 100);
        assert_eq!(to_percent("overall", 100.0 + 1e-12).unwrap(), 100);
    }

    #[test]
    fn test_report_field_names() {
        let catalog = Arc::new(JobCatalog::bundled().unwrap());
        let report = analyze_profile(
            &make_full_profile(),
            None,
            &catalog,
            &make_scorer(&catalog),
            2026,
        )
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "overallScore",
            "skillsMatch",
            "experience",
            "education",
            "missingSkills",
            "recommendedJobs",
            "skillGaps",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["skillGaps"]["technical"].is_array());
        assert!(json["skillGaps"]["soft"].is_array());
    }
}
