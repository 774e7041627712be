//! Job catalog: read-only role definitions and market attributes, validated once at load.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::skill_key;

/// Catalog shipped with the binary; used when `CATALOG_PATH` is not set.
const BUNDLED_CATALOG: &str = include_str!("../../catalog/default_catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Role '{0}' has no required skills")]
    EmptyRequiredSkills(String),

    #[error("Role '{title}' has non-positive required experience ({years})")]
    InvalidRequiredExperience { title: String, years: f64 },

    #[error("Role '{title}' has salary min {min} above max {max}")]
    InvalidSalaryRange { title: String, min: f64, max: f64 },

    #[error("Role '{title}' has demand {demand} outside 0-100")]
    InvalidDemand { title: String, demand: f64 },

    #[error("Duplicate role title '{0}'")]
    DuplicateTitle(String),
}

/// Seniority inferred from a role title, computed once when the catalog is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityTier {
    Junior,
    #[default]
    Mid,
    Senior,
}

impl SeniorityTier {
    pub fn from_title(title: &str) -> Self {
        let lower = title.to_lowercase();
        if lower.contains("senior") {
            SeniorityTier::Senior
        } else if lower.contains("junior") {
            SeniorityTier::Junior
        } else {
            SeniorityTier::Mid
        }
    }
}

/// Annual salary band, serialized as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }
}

impl From<(f64, f64)> for SalaryRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<SalaryRange> for (f64, f64) {
    fn from(range: SalaryRange) -> Self {
        (range.min, range.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRoleDefinition {
    pub title: String,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    pub salary_range: SalaryRange,
    /// Years of experience the role expects. Always > 0.
    pub required_experience: f64,
    /// Market demand index, 0–100.
    pub demand: f64,
    /// Yearly growth in percent.
    pub growth: f64,
    #[serde(skip)]
    pub seniority: SeniorityTier,
}

impl JobRoleDefinition {
    pub fn requires(&self, skill: &str) -> bool {
        let key = skill_key(skill);
        self.required_skills.iter().any(|s| skill_key(s) == key)
    }

    pub fn prefers(&self, skill: &str) -> bool {
        let key = skill_key(skill);
        self.preferred_skills.iter().any(|s| skill_key(s) == key)
    }

    /// Skill lists become sets: trimmed, blanks dropped, case-insensitive duplicates
    /// removed with the first spelling kept.
    fn normalize_skills(&mut self) {
        self.required_skills = dedup_skill_names(std::mem::take(&mut self.required_skills));
        self.preferred_skills = dedup_skill_names(std::mem::take(&mut self.preferred_skills));
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.required_skills.is_empty() {
            return Err(CatalogError::EmptyRequiredSkills(self.title.clone()));
        }
        if !(self.required_experience > 0.0) {
            return Err(CatalogError::InvalidRequiredExperience {
                title: self.title.clone(),
                years: self.required_experience,
            });
        }
        if self.salary_range.min > self.salary_range.max {
            return Err(CatalogError::InvalidSalaryRange {
                title: self.title.clone(),
                min: self.salary_range.min,
                max: self.salary_range.max,
            });
        }
        if !(0.0..=100.0).contains(&self.demand) {
            return Err(CatalogError::InvalidDemand {
                title: self.title.clone(),
                demand: self.demand,
            });
        }
        Ok(())
    }
}

fn dedup_skill_names(skills: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(skills.len());
    skills
        .into_iter()
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty() && seen.insert(skill_key(skill)))
        .collect()
}

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    pub roles: Vec<JobRoleDefinition>,
    /// skill name → category (e.g. "PostgreSQL" → "databases")
    #[serde(default)]
    pub skill_categories: BTreeMap<String, String>,
    /// location → salary multiplier
    #[serde(default)]
    pub location_multipliers: BTreeMap<String, f64>,
}

/// Immutable, validated catalog. Roles keep their document order; lookups are
/// case-insensitive.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    roles: Vec<JobRoleDefinition>,
    index: HashMap<String, usize>,
    skill_categories: HashMap<String, String>,
    location_multipliers: HashMap<String, f64>,
}

impl JobCatalog {
    pub fn new(document: CatalogDocument) -> Result<Self, CatalogError> {
        let mut roles = document.roles;
        let mut index = HashMap::with_capacity(roles.len());

        for (idx, role) in roles.iter_mut().enumerate() {
            role.title = role.title.trim().to_string();
            role.normalize_skills();
            role.validate()?;
            role.seniority = SeniorityTier::from_title(&role.title);
            if index.insert(role.title.to_lowercase(), idx).is_some() {
                return Err(CatalogError::DuplicateTitle(role.title.clone()));
            }
        }

        let skill_categories = document
            .skill_categories
            .into_iter()
            .map(|(skill, category)| (skill_key(&skill), category))
            .collect();
        let location_multipliers = document
            .location_multipliers
            .into_iter()
            .map(|(location, factor)| (location.trim().to_lowercase(), factor))
            .collect();

        Ok(Self {
            roles,
            index,
            skill_categories,
            location_multipliers,
        })
    }

    #[cfg(test)]
    pub fn from_roles(roles: Vec<JobRoleDefinition>) -> Result<Self, CatalogError> {
        Self::new(CatalogDocument {
            roles,
            ..Default::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn get(&self, title: &str) -> Option<&JobRoleDefinition> {
        self.index
            .get(&title.trim().to_lowercase())
            .map(|&idx| &self.roles[idx])
    }

    pub fn roles(&self) -> &[JobRoleDefinition] {
        &self.roles
    }

    pub fn titles(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.title.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn skill_category(&self, skill: &str) -> Option<&str> {
        self.skill_categories
            .get(&skill_key(skill))
            .map(String::as_str)
    }

    /// Salary multiplier for a location; unknown locations pay the base band.
    pub fn location_multiplier(&self, location: &str) -> f64 {
        self.location_multipliers
            .get(&location.trim().to_lowercase())
            .copied()
            .unwrap_or(1.0)
    }

    /// Fraction of catalog roles that list `skill` as required.
    pub fn required_share(&self, skill: &str) -> f64 {
        if self.roles.is_empty() {
            return 0.0;
        }
        let count = self.roles.iter().filter(|r| r.requires(skill)).count();
        count as f64 / self.roles.len() as f64
    }
}
