//! Salary trends: a role's salary band adjusted for location.

use serde::Serialize;

use crate::models::catalog::{JobCatalog, SalaryRange};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryPercentiles {
    #[serde(rename = "25th")]
    pub p25: f64,
    #[serde(rename = "50th")]
    pub p50: f64,
    #[serde(rename = "75th")]
    pub p75: f64,
}

/// What moves pay within a band. The same for every role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryFactors {
    pub experience: &'static str,
    pub skills: &'static [&'static str],
    pub certifications: &'static [&'static str],
    pub company_size: &'static str,
}

pub const SALARY_FACTORS: SalaryFactors = SalaryFactors {
    experience: "High impact: 10-20% increase per year of experience",
    skills: &["Technical expertise", "Leadership", "Domain knowledge"],
    certifications: &["Role-specific certifications can increase salary by 5-15%"],
    company_size: "Larger companies typically offer 10-30% higher salaries",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryTrends {
    pub job_title: String,
    pub location: Option<String>,
    pub location_multiplier: f64,
    pub salary_range: SalaryRange,
    pub median: f64,
    pub percentiles: SalaryPercentiles,
    pub factors: SalaryFactors,
}

/// Returns `None` when the title is not in the catalog.
pub fn analyze_salary(
    job_title: &str,
    location: Option<&str>,
    catalog: &JobCatalog,
) -> Option<SalaryTrends> {
    let role = catalog.get(job_title)?;
    let location = location.map(str::trim).filter(|l| !l.is_empty());
    let multiplier = location
        .map(|l| catalog.location_multiplier(l))
        .unwrap_or(1.0);
    let adjusted = role.salary_range.scaled(multiplier);

    Some(SalaryTrends {
        job_title: role.title.clone(),
        location: location.map(str::to_string),
        location_multiplier: multiplier,
        salary_range: adjusted,
        median: adjusted.midpoint(),
        percentiles: SalaryPercentiles {
            p25: adjusted.min,
            p50: adjusted.midpoint(),
            p75: adjusted.max,
        },
        factors: SALARY_FACTORS,
    })
}
