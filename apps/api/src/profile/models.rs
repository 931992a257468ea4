use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Seniority bucket inferred from a résumé. Never absent; `Mid` by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    Entry,
    #[default]
    #[serde(rename = "Mid Level")]
    Mid,
    #[serde(rename = "Senior Level")]
    Senior,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Mid => "Mid Level",
            ExperienceLevel::Senior => "Senior Level",
        }
    }

    /// Interprets a user-supplied level such as "Senior Level", "junior" or
    /// "Executive". Returns `None` for anything unrecognized.
    pub fn parse_hint(hint: &str) -> Option<Self> {
        let normalized = hint.trim().to_ascii_lowercase();
        let head = normalized
            .strip_suffix(" level")
            .unwrap_or(&normalized)
            .trim();

        match head {
            "entry" | "junior" | "intern" | "graduate" => Some(ExperienceLevel::Entry),
            "mid" | "intermediate" => Some(ExperienceLevel::Mid),
            "senior" | "lead" | "executive" | "principal" => Some(ExperienceLevel::Senior),
            _ => None,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Structured view of a résumé. Built once per submission and not changed
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateProfile {
    /// Lexicon entries found in the résumé, canonical casing, lexicon order.
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub education: BTreeSet<String>,
    #[serde(default)]
    pub job_titles: BTreeSet<String>,
    /// At most five lines, in résumé order.
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub contact: ContactInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_level_serializes_as_label() {
        let json = serde_json::to_string(&ExperienceLevel::Mid).unwrap();
        assert_eq!(json, r#""Mid Level""#);
        let level: ExperienceLevel = serde_json::from_str(r#""Senior Level""#).unwrap();
        assert_eq!(level, ExperienceLevel::Senior);
    }

    #[test]
    fn test_default_level_is_mid() {
        assert_eq!(ExperienceLevel::default(), ExperienceLevel::Mid);
    }

    #[test]
    fn test_parse_hint_accepts_form_labels() {
        assert_eq!(ExperienceLevel::parse_hint("Entry Level"), Some(ExperienceLevel::Entry));
        assert_eq!(ExperienceLevel::parse_hint("mid level"), Some(ExperienceLevel::Mid));
        assert_eq!(ExperienceLevel::parse_hint("Executive"), Some(ExperienceLevel::Senior));
        assert_eq!(ExperienceLevel::parse_hint("  junior "), Some(ExperienceLevel::Entry));
        assert_eq!(ExperienceLevel::parse_hint("wizard"), None);
    }

    #[test]
    fn test_profile_deserializes_with_only_skills() {
        let profile: CandidateProfile =
            serde_json::from_str(r#"{"skills": ["Python", "React"]}"#).unwrap();
        assert_eq!(profile.skills, vec!["Python", "React"]);
        assert_eq!(profile.experience_level, ExperienceLevel::Mid);
        assert!(profile.contact.email.is_none());
    }

    #[test]
    fn test_profile_rejects_unknown_fields() {
        let result = serde_json::from_str::<CandidateProfile>(
            r#"{"skills": [], "favourite_color": "blue"}"#,
        );
        assert!(result.is_err());
    }
}
