//! Market Health Evaluator: demand, growth and salary of one role folded into a
//! single health score, with a short-term outlook.
//!
//! health = demand/100 × 0.4 + growth/20 × 0.3 + (salary_max − 80k)/120k × 0.3
//!
//! Components are not clamped: a role paying under 80k or growing faster than 20%
//! pushes its component outside [0, 1] and the score reflects that.

use serde::Serialize;

use crate::market::outlook::{round2, FutureOutlook, OutlookProjector};
use crate::models::catalog::{JobCatalog, JobRoleDefinition, SalaryRange};

const DEMAND_WEIGHT: f64 = 0.4;
const GROWTH_WEIGHT: f64 = 0.3;
const SALARY_WEIGHT: f64 = 0.3;

/// Growth rate (percent per year) treated as a full growth score.
const GROWTH_CEILING: f64 = 20.0;
/// Salary anchors: a max salary of 80k scores 0, 200k scores 1.
const SALARY_FLOOR: f64 = 80_000.0;
const SALARY_SPAN: f64 = 120_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Moderate,
    Challenging,
}

impl HealthStatus {
    pub fn from_score(health: f64) -> Self {
        match health {
            h if h >= 0.8 => HealthStatus::Excellent,
            h if h >= 0.6 => HealthStatus::Good,
            h if h >= 0.4 => HealthStatus::Moderate,
            _ => HealthStatus::Challenging,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthComponents {
    pub demand_score: f64,
    pub growth_score: f64,
    pub salary_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketHealth {
    /// Health × 100, two decimals.
    pub score: f64,
    pub status: HealthStatus,
    pub components: HealthComponents,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketHealthReport {
    pub job_title: String,
    pub market_demand: f64,
    pub growth_rate: f64,
    pub salary_range: SalaryRange,
    pub market_health: MarketHealth,
    pub future_outlook: FutureOutlook,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarketAnalysis {
    Report(Box<MarketHealthReport>),
    NotFound {
        error: String,
        similar_roles: Vec<String>,
    },
}

pub fn health_components(role: &JobRoleDefinition) -> HealthComponents {
    HealthComponents {
        demand_score: role.demand / 100.0,
        growth_score: role.growth / GROWTH_CEILING,
        salary_score: (role.salary_range.max - SALARY_FLOOR) / SALARY_SPAN,
    }
}

pub fn compute_market_health(role: &JobRoleDefinition) -> MarketHealth {
    let components = health_components(role);
    let health = components.demand_score * DEMAND_WEIGHT
        + components.growth_score * GROWTH_WEIGHT
        + components.salary_score * SALARY_WEIGHT;

    MarketHealth {
        score: round2(health * 100.0),
        status: HealthStatus::from_score(health),
        components,
    }
}

/// Catalog titles sharing a word with `job_title` (case-insensitive substring match).
pub fn find_similar_roles(job_title: &str, catalog: &JobCatalog) -> Vec<String> {
    let words: Vec<String> = job_title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    catalog
        .roles()
        .iter()
        .filter(|role| {
            let title = role.title.to_lowercase();
            words.iter().any(|word| title.contains(word.as_str()))
        })
        .map(|role| role.title.clone())
        .collect()
}

/// Market analysis for one title. Unknown titles are not an error: the result lists
/// similarly named roles instead.
pub fn analyze_market(
    job_title: &str,
    catalog: &JobCatalog,
    projector: &dyn OutlookProjector,
) -> MarketAnalysis {
    let Some(role) = catalog.get(job_title) else {
        return MarketAnalysis::NotFound {
            error: "Job title not found in database".to_string(),
            similar_roles: find_similar_roles(job_title, catalog),
        };
    };

    MarketAnalysis::Report(Box::new(MarketHealthReport {
        job_title: role.title.clone(),
        market_demand: role.demand,
        growth_rate: role.growth,
        salary_range: role.salary_range,
        market_health: compute_market_health(role),
        future_outlook: projector.project(role.demand, role.growth),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::outlook::{LinearProjector, Projection};
    use crate::models::catalog::tests::make_role;

    struct FixedProjector;

    impl OutlookProjector for FixedProjector {
        fn project(&self, _demand: f64, _growth: f64) -> FutureOutlook {
            let projection = Projection {
                projected_demand: 50.0,
                confidence: 0.5,
            };
            FutureOutlook {
                six_month_outlook: projection,
                one_year_outlook: projection,
            }
        }
    }

    fn make_market_role(title: &str, demand: f64, growth: f64, salary: (f64, f64)) -> JobRoleDefinition {
        JobRoleDefinition {
            demand,
            growth,
            salary_range: salary.into(),
            ..make_role(title, &["Python"], &[], 3.0)
        }
    }

    fn make_catalog() -> JobCatalog {
        JobCatalog::from_roles(vec![
            make_market_role("ML Engineer", 92.0, 18.0, (100000.0, 180000.0)),
            make_market_role("Data Scientist", 90.0, 15.0, (90000.0, 160000.0)),
            make_market_role("Full Stack Developer", 85.0, 12.0, (80000.0, 150000.0)),
            make_market_role("DevOps Engineer", 88.0, 14.0, (95000.0, 165000.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_ml_engineer_health_is_excellent() {
        let role = make_market_role("ML Engineer", 92.0, 18.0, (100000.0, 180000.0));
        let health = compute_market_health(&role);
        assert!((health.components.demand_score - 0.92).abs() < 1e-9);
        assert!((health.components.growth_score - 0.9).abs() < 1e-9);
        assert!((health.components.salary_score - 100000.0 / 120000.0).abs() < 1e-9);
        // 0.368 + 0.27 + 0.25 = 0.888
        assert_eq!(health.score, 88.8);
        assert_eq!(health.status, HealthStatus::Excellent);
    }

    #[test]
    fn test_salary_score_is_not_clamped() {
        let role = make_market_role("Support Technician", 20.0, 2.0, (30000.0, 50000.0));
        let health = compute_market_health(&role);
        assert!((health.components.salary_score - (-0.25)).abs() < 1e-9);
        // 0.08 + 0.03 − 0.075 = 0.035
        assert_eq!(health.score, 3.5);
        assert_eq!(health.status, HealthStatus::Challenging);

        let role = make_market_role("Quant Researcher", 95.0, 30.0, (200000.0, 350000.0));
        let health = compute_market_health(&role);
        assert!(health.components.salary_score > 1.0);
        assert!(health.components.growth_score > 1.0);
        assert!(health.score > 100.0);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(HealthStatus::from_score(0.8), HealthStatus::Excellent);
        assert_eq!(HealthStatus::from_score(0.79), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(0.6), HealthStatus::Good);
        assert_eq!(HealthStatus::from_score(0.4), HealthStatus::Moderate);
        assert_eq!(HealthStatus::from_score(0.39), HealthStatus::Challenging);
        assert_eq!(HealthStatus::from_score(-0.2), HealthStatus::Challenging);
    }

    #[test]
    fn test_analyze_market_uses_injected_projector() {
        let catalog = make_catalog();
        match analyze_market("ml engineer", &catalog, &FixedProjector) {
            MarketAnalysis::Report(report) => {
                assert_eq!(report.job_title, "ML Engineer");
                assert_eq!(report.market_demand, 92.0);
                assert_eq!(report.future_outlook.one_year_outlook.projected_demand, 50.0);
            }
            other => panic!("Expected report, got {other:?}"),
        }
    }

    #[test]
    fn test_analyze_market_linear_outlook() {
        let catalog = make_catalog();
        let MarketAnalysis::Report(report) = analyze_market("ML Engineer", &catalog, &LinearProjector)
        else {
            panic!("Expected report");
        };
        assert_eq!(report.future_outlook.six_month_outlook.projected_demand, 100.28);
        assert_eq!(report.future_outlook.one_year_outlook.projected_demand, 108.56);
    }

    #[test]
    fn test_unknown_title_lists_similar_roles() {
        let catalog = make_catalog();
        match analyze_market("Senior Data Engineer", &catalog, &LinearProjector) {
            MarketAnalysis::NotFound {
                error,
                similar_roles,
            } => {
                assert_eq!(error, "Job title not found in database");
                assert_eq!(
                    similar_roles,
                    vec!["ML Engineer", "Data Scientist", "DevOps Engineer"]
                );
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_title_with_no_overlap_has_empty_similar_roles() {
        let catalog = make_catalog();
        let result = analyze_market("Astronaut", &catalog, &LinearProjector);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "Job title not found in database");
        assert_eq!(json["similar_roles"], serde_json::json!([]));
    }

    #[test]
    fn test_report_serializes_flat() {
        let catalog = make_catalog();
        let json = serde_json::to_value(analyze_market("Data Scientist", &catalog, &LinearProjector))
            .unwrap();
        assert_eq!(json["job_title"], "Data Scientist");
        assert_eq!(json["salary_range"], serde_json::json!([90000.0, 160000.0]));
        // 0.36 + 0.225 + 0.2 = 0.785
        assert_eq!(json["market_health"]["status"], "Good");
        assert_eq!(json["market_health"]["score"], 78.5);
    }
}
