//! Candidate profile: the extraction collaborator's output, normalized for scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Extraction never claims more than 95% certainty about a skill.
pub const MAX_SKILL_CONFIDENCE: f64 = 0.95;

/// Confidence assigned when the extractor omits one (single unqualified mention).
const BASE_SKILL_CONFIDENCE: f64 = 0.7;

fn default_confidence() -> f64 {
    BASE_SKILL_CONFIDENCE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl SkillRecord {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
        .normalized()
    }

    /// Case-insensitive lookup key.
    pub fn key(&self) -> String {
        skill_key(&self.name)
    }

    fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.confidence = if self.confidence.is_finite() {
            self.confidence.clamp(0.0, MAX_SKILL_CONFIDENCE)
        } else {
            0.0
        };
        self
    }
}

/// Normalizes a skill name into the key used by every skill map and set.
pub fn skill_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A year field as the extractor emits it: a number, a numeric string, or "present".
/// Anything else is kept as `Unrecognized` so one bad entry cannot fail the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearSpec {
    Number(i64),
    Text(String),
    Unrecognized(serde_json::Value),
}

impl YearSpec {
    fn resolve(&self, as_of_year: i32, allow_present: bool) -> Option<i32> {
        match self {
            YearSpec::Number(n) => i32::try_from(*n).ok().filter(|y| *y >= 0),
            YearSpec::Text(text) => {
                let text = text.trim();
                if allow_present && text.eq_ignore_ascii_case("present") {
                    Some(as_of_year)
                } else {
                    text.parse::<i32>().ok().filter(|y| *y >= 0)
                }
            }
            YearSpec::Unrecognized(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub start: Option<YearSpec>,
    /// `None` means the extractor could not find an end year; "present" is spelled out.
    pub end: Option<YearSpec>,
    #[serde(default)]
    pub skills_mentioned: Vec<String>,
}

/// A resolved experience period, `end >= start` guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceSpan {
    pub start: i32,
    pub end: i32,
}

impl ExperienceSpan {
    pub fn years(&self) -> f64 {
        f64::from(self.end - self.start)
    }
}

impl ExperienceEntry {
    #[cfg(test)]
    pub fn new(start: YearSpec, end: YearSpec, skills_mentioned: Vec<String>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            skills_mentioned,
        }
    }

    /// Resolves the period against `as_of_year`. Returns `None` for a missing or
    /// non-numeric year and for periods that end before they start.
    pub fn span(&self, as_of_year: i32) -> Option<ExperienceSpan> {
        let start = self.start.as_ref()?.resolve(as_of_year, false)?;
        let end = self.end.as_ref()?.resolve(as_of_year, true)?;
        (end >= start).then_some(ExperienceSpan { start, end })
    }

    pub fn is_relevant(&self) -> bool {
        !self.skills_mentioned.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub enum EducationLevel {
    Other,
    Bachelors,
    Masters,
    PhD,
}

impl EducationLevel {
    /// Fixed ordinal scale used by the education sub-score.
    pub fn score(self) -> f64 {
        match self {
            EducationLevel::PhD => 1.0,
            EducationLevel::Masters => 0.9,
            EducationLevel::Bachelors => 0.8,
            EducationLevel::Other => 0.6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EducationLevel::PhD => "PhD",
            EducationLevel::Masters => "Master's",
            EducationLevel::Bachelors => "Bachelor's",
            EducationLevel::Other => "Other",
        }
    }
}

/// Accepts the canonical labels as well as free-form degree text ("Master of Science").
impl From<String> for EducationLevel {
    fn from(raw: String) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("phd") || lower.contains("doctorate") {
            EducationLevel::PhD
        } else if lower.contains("master") {
            EducationLevel::Masters
        } else if lower.contains("bachelor") {
            EducationLevel::Bachelors
        } else {
            EducationLevel::Other
        }
    }
}

impl Serialize for EducationLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub level: EducationLevel,
    #[serde(default)]
    pub description: Option<String>,
}

impl EducationEntry {
    #[cfg(test)]
    pub fn new(level: EducationLevel) -> Self {
        Self {
            level,
            description: None,
        }
    }
}

/// Wire shape of a profile. Skills arrive as lists and may repeat with different casing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub technical_skills: Vec<SkillRecord>,
    #[serde(default)]
    pub soft_skills: Vec<SkillRecord>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Normalized candidate profile. Skill maps are keyed by `skill_key`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ProfileInput")]
pub struct Profile {
    pub technical_skills: BTreeMap<String, SkillRecord>,
    pub soft_skills: BTreeMap<String, SkillRecord>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<String>,
}

impl From<ProfileInput> for Profile {
    fn from(input: ProfileInput) -> Self {
        Profile {
            technical_skills: dedup_skills(input.technical_skills),
            soft_skills: dedup_skills(input.soft_skills),
            experience: input.experience,
            education: input.education,
            certifications: input.certifications,
        }
    }
}

/// Collapses case-insensitive duplicates, keeping the most confident record.
fn dedup_skills(records: Vec<SkillRecord>) -> BTreeMap<String, SkillRecord> {
    let mut skills: BTreeMap<String, SkillRecord> = BTreeMap::new();
    for record in records.into_iter().map(SkillRecord::normalized) {
        let key = record.key();
        if key.is_empty() {
            continue;
        }
        match skills.get(&key) {
            Some(existing) if existing.confidence >= record.confidence => {}
            _ => {
                skills.insert(key, record);
            }
        }
    }
    skills
}

impl Profile {
    pub fn has_technical_skill(&self, name: &str) -> bool {
        self.technical_skills.contains_key(&skill_key(name))
    }

    #[cfg(test)]
    pub fn technical_confidence(&self, name: &str) -> Option<f64> {
        self.technical_skills
            .get(&skill_key(name))
            .map(|record| record.confidence)
    }

    /// Resolved experience periods paired with their entries. Malformed entries are
    /// skipped one by one.
    pub fn experience_spans(&self, as_of_year: i32) -> Vec<(&ExperienceEntry, ExperienceSpan)> {
        self.experience
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| match entry.span(as_of_year) {
                Some(span) => Some((entry, span)),
                None => {
                    warn!(
                        "Skipping malformed experience entry #{idx}: start={:?} end={:?}",
                        entry.start, entry.end
                    );
                    None
                }
            })
            .collect()
    }

    /// Total years across all well-formed experience entries.
    pub fn total_experience_years(&self, as_of_year: i32) -> f64 {
        self.experience_spans(as_of_year)
            .iter()
            .map(|(_, span)| span.years())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: i64) -> YearSpec {
        YearSpec::Number(y)
    }

    fn text(s: &str) -> YearSpec {
        YearSpec::Text(s.to_string())
    }

    #[test]
    fn test_confidence_capped_at_095() {
        let record = SkillRecord::new("Python", 1.4);
        assert_eq!(record.confidence, MAX_SKILL_CONFIDENCE);
        assert_eq!(SkillRecord::new("Go", -0.2).confidence, 0.0);
    }

    #[test]
    fn test_skills_dedup_case_insensitively_keeping_highest_confidence() {
        let profile = Profile::from(ProfileInput {
            technical_skills: vec![
                SkillRecord::new("Python", 0.7),
                SkillRecord::new("python ", 0.9),
                SkillRecord::new("PYTHON", 0.8),
            ],
            ..Default::default()
        });
        assert_eq!(profile.technical_skills.len(), 1);
        assert_eq!(profile.technical_confidence("PyThOn"), Some(0.9));
        assert!(profile.has_technical_skill("python"));
    }

    #[test]
    fn test_profile_deserializes_from_wire_shape() {
        let json = r#"{
            "technical_skills": [{"name": "SQL", "confidence": 0.85}, {"name": "Rust"}],
            "soft_skills": [{"name": "Leadership", "confidence": 0.6}],
            "experience": [{"start": 2019, "end": "present", "skills_mentioned": ["Rust"]}],
            "education": [{"level": "Master's"}, {"level": "Diploma"}]
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.technical_confidence("sql"), Some(0.85));
        assert_eq!(profile.technical_confidence("rust"), Some(0.7));
        assert_eq!(profile.soft_skills.len(), 1);
        assert_eq!(profile.education[0].level, EducationLevel::Masters);
        assert_eq!(profile.education[1].level, EducationLevel::Other);
        assert!(profile.certifications.is_empty());
    }

    #[test]
    fn test_present_resolves_to_as_of_year() {
        let entry = ExperienceEntry::new(year(2019), text("Present"), vec![]);
        let span = entry.span(2026).unwrap();
        assert_eq!(span.years(), 7.0);
    }

    #[test]
    fn test_numeric_string_years_are_accepted() {
        let entry = ExperienceEntry::new(text("2015"), text("2018"), vec![]);
        assert_eq!(entry.span(2026).unwrap().years(), 3.0);
    }

    #[test]
    fn test_malformed_entries_are_skipped_individually() {
        let profile = Profile {
            experience: vec![
                ExperienceEntry::new(year(2018), year(2020), vec!["Go".to_string()]),
                ExperienceEntry {
                    start: Some(year(2020)),
                    end: None,
                    skills_mentioned: vec![],
                },
                ExperienceEntry::new(text("twenty"), year(2022), vec![]),
                ExperienceEntry::new(year(2024), year(2021), vec![]),
                ExperienceEntry::new(text("present"), year(2022), vec![]),
            ],
            ..Default::default()
        };
        assert_eq!(profile.experience_spans(2026).len(), 1);
        assert_eq!(profile.total_experience_years(2026), 2.0);
    }

    #[test]
    fn test_unrecognized_year_values_skip_only_their_entry() {
        let json = r#"{
            "technical_skills": [{"name": "Go"}],
            "experience": [
                {"start": 2018, "end": 2021, "skills_mentioned": ["Go"]},
                {"start": 2020.5, "end": "present"},
                {"start": true, "end": 2022},
                {"start": 2019, "end": {"year": 2023}}
            ]
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.experience.len(), 4);
        assert!(matches!(profile.experience[1].start, Some(YearSpec::Unrecognized(_))));
        assert_eq!(profile.experience_spans(2026).len(), 1);
        assert_eq!(profile.total_experience_years(2026), 3.0);
    }

    #[test]
    fn test_education_scale_is_ordered() {
        assert!(EducationLevel::PhD > EducationLevel::Masters);
        assert!(EducationLevel::Masters > EducationLevel::Bachelors);
        assert!(EducationLevel::Bachelors > EducationLevel::Other);
        assert_eq!(EducationLevel::Bachelors.score(), 0.8);
    }

    #[test]
    fn test_education_level_parses_free_form_degrees() {
        assert_eq!(
            EducationLevel::from("Master of Science".to_string()),
            EducationLevel::Masters
        );
        assert_eq!(
            EducationLevel::from("Doctorate in Physics".to_string()),
            EducationLevel::PhD
        );
        assert_eq!(
            serde_json::to_string(&EducationLevel::Bachelors).unwrap(),
            r#""Bachelor's""#
        );
    }
}
