//! Match Scorer: bounded fitness of one posting for one candidate profile.
//!
//! `KeywordMatchScorer` combines three sub-scores with `MatchWeights`:
//! - skills (0.7): verbatim skill hit 1.0, any word of the skill 0.7, averaged
//!   over the profile's skills
//! - experience (0.2): level keyword 1.0, matching years band 0.9, else 0.5
//! - title (0.1): share of skills with a word among the title's words
//!
//! Matching is plain substring containment on lowercased text, so short
//! skills can hit inside longer words ("r" in "developer").

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{Posting, ScoredPosting};
use crate::profile::{CandidateProfile, ExperienceLevel};

/// Credit for a skill whose full text appears in the posting.
const VERBATIM_CREDIT: f64 = 1.0;
/// Credit for a skill where only some of its words appear.
const PARTIAL_CREDIT: f64 = 0.7;

const EXPERIENCE_KEYWORD_SCORE: f64 = 1.0;
const EXPERIENCE_YEARS_SCORE: f64 = 0.9;
const NEUTRAL_SCORE: f64 = 0.5;

static REQUIRED_YEARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:years?|yrs?)").expect("valid years regex"));

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub title: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.7,
            experience: 0.2,
            title: 0.1,
        }
    }
}

/// Unweighted sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub title: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    /// 0.0 – 1.0
    pub score: f64,
    /// Profile skills found in the posting, in profile order and casing.
    pub matched_skills: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

impl MatchScore {
    pub fn into_scored(self, posting: Posting) -> ScoredPosting {
        ScoredPosting {
            posting,
            match_score: self.score,
            matched_skills: self.matched_skills,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one posting for one profile. Must be deterministic and return a
/// score in [0, 1].
pub trait MatchScorer: Send + Sync {
    fn score(&self, profile: &CandidateProfile, posting: &Posting) -> MatchScore;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct KeywordMatchScorer {
    weights: MatchWeights,
}

impl KeywordMatchScorer {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }
}

impl MatchScorer for KeywordMatchScorer {
    fn score(&self, profile: &CandidateProfile, posting: &Posting) -> MatchScore {
        let text = posting.searchable_text();
        let lowered_skills: Vec<String> = profile.skills.iter().map(|s| s.to_lowercase()).collect();

        let breakdown = ScoreBreakdown {
            skills: skills_score(&text, &lowered_skills),
            experience: experience_score(&text, profile.experience_level),
            title: title_score(&posting.title, &lowered_skills),
        };

        let total = breakdown.skills * self.weights.skills
            + breakdown.experience * self.weights.experience
            + breakdown.title * self.weights.title;

        let matched_skills = profile
            .skills
            .iter()
            .zip(&lowered_skills)
            .filter(|(_, lowered)| skill_credit(&text, lowered) > 0.0)
            .map(|(display, _)| display.clone())
            .collect();

        MatchScore {
            score: total.clamp(0.0, 1.0),
            matched_skills,
            breakdown,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-scores
// ────────────────────────────────────────────────────────────────────────────

fn skill_credit(text: &str, skill: &str) -> f64 {
    if text.contains(skill) {
        VERBATIM_CREDIT
    } else if skill.split_whitespace().any(|word| text.contains(word)) {
        PARTIAL_CREDIT
    } else {
        0.0
    }
}

/// `text` and `skills` must already be lowercase.
pub fn skills_score(text: &str, skills: &[String]) -> f64 {
    if skills.is_empty() {
        return 0.0;
    }
    let credit: f64 = skills.iter().map(|skill| skill_credit(text, skill)).sum();
    (credit / skills.len() as f64).min(1.0)
}

fn level_keywords(level: ExperienceLevel) -> &'static [&'static str] {
    match level {
        ExperienceLevel::Entry => &[
            "entry", "junior", "graduate", "intern", "trainee", "associate",
        ],
        ExperienceLevel::Mid => &["mid", "intermediate", "experienced", "professional"],
        ExperienceLevel::Senior => &[
            "senior", "lead", "principal", "architect", "manager", "director",
        ],
    }
}

fn years_fit(level: ExperienceLevel, years: u64) -> bool {
    match level {
        ExperienceLevel::Entry => years <= 2,
        ExperienceLevel::Mid => (3..=7).contains(&years),
        ExperienceLevel::Senior => years >= 5,
    }
}

/// `text` must already be lowercase.
pub fn experience_score(text: &str, level: ExperienceLevel) -> f64 {
    if level_keywords(level).iter().any(|kw| text.contains(kw)) {
        return EXPERIENCE_KEYWORD_SCORE;
    }

    let required = REQUIRED_YEARS
        .captures_iter(text)
        .map(|caps| caps[1].parse::<u64>().unwrap_or(u64::MAX))
        .max();

    match required {
        Some(years) if years_fit(level, years) => EXPERIENCE_YEARS_SCORE,
        _ => NEUTRAL_SCORE,
    }
}

/// `skills` must already be lowercase; `title` is lowercased here.
pub fn title_score(title: &str, skills: &[String]) -> f64 {
    if skills.is_empty() {
        return NEUTRAL_SCORE;
    }
    let title = title.to_lowercase();
    let title_words: Vec<&str> = title.split_whitespace().collect();

    let hits = skills
        .iter()
        .filter(|skill| skill.split_whitespace().any(|word| title_words.contains(&word)))
        .count();

    (hits as f64 / skills.len() as f64).min(1.0)
}
