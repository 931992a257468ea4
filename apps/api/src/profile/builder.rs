//! Profile Builder: turns résumé text into a `CandidateProfile`.
//!
//! Every heuristic here is a pure function over the text so it can be tested
//! without documents or I/O. Skills match by substring with no word
//! boundaries; the output is best-effort, not semantic.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::profile::lexicon::SkillLexicon;
use crate::profile::models::{CandidateProfile, ContactInfo, ExperienceLevel};

const SENIOR_INDICATORS: &[&str] = &[
    "senior", "lead", "principal", "architect", "director", "manager",
];
const ENTRY_INDICATORS: &[&str] = &["intern", "graduate", "junior", "entry", "trainee"];
const COMPANY_INDICATORS: &[&str] = &["inc", "llc", "corp", "ltd", "company", "technologies"];

const MAX_COMPANIES: usize = 5;
const MAX_COMPANY_LINE_CHARS: usize = 50;

static YEARS_OF_EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\+?\s*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)")
        .expect("years-of-experience pattern")
});

static EDUCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "Bachelor's degree", "Master of Science"
        r"(?i)\b(?:bachelor|master|phd|doctorate|associate)[^\n]*?\b(?:degree|of\s+\w+)",
        // Dotted abbreviations: "B.S.", "M.A", "Ph.D."
        r"(?i)\b(?:ph\.?\s?d\b\.?|[bm]\.[ase]\b\.?)",
        // Bare abbreviations only in capitals, so "me"/"be" in prose don't count
        r"\b(?:BA|BS|BE|MA|MS|ME|BSc|MSc|MBA)\b",
        // "University of Toronto"
        r"(?i)\b(?:university|college|institute)\s+of\s+\w+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("education pattern"))
    .collect()
});

static JOB_TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)software engineer|developer|programmer|analyst|manager|director|consultant",
        r"(?i)data scientist|machine learning|ai engineer|devops|product manager",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("job title pattern"))
    .collect()
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?1?[-.\s]?)?\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})").expect("phone pattern")
});

/// Builds a profile. The hint only applies when the text carries no
/// experience signal of its own.
pub fn build_profile_with_hint(
    text: &str,
    lexicon: &SkillLexicon,
    level_hint: Option<ExperienceLevel>,
) -> CandidateProfile {
    let lowered = text.to_lowercase();

    CandidateProfile {
        skills: extract_skills(&lowered, lexicon),
        experience_level: infer_experience_level(&lowered)
            .or(level_hint)
            .unwrap_or_default(),
        education: extract_education(text),
        job_titles: extract_job_titles(text),
        companies: extract_companies(text),
        contact: extract_contact(text),
    }
}

/// Lexicon entries contained anywhere in the (already lowercased) text.
pub fn extract_skills(lowered_text: &str, lexicon: &SkillLexicon) -> Vec<String> {
    lexicon
        .iter()
        .filter(|(_, lower)| lowered_text.contains(lower))
        .map(|(canonical, _)| canonical.to_string())
        .collect()
}

/// Applies the inference rules in priority order. `None` means no rule fired.
pub fn infer_experience_level(lowered_text: &str) -> Option<ExperienceLevel> {
    if let Some(years) = max_years_of_experience(lowered_text) {
        return Some(match years {
            y if y >= 8 => ExperienceLevel::Senior,
            y if y >= 3 => ExperienceLevel::Mid,
            _ => ExperienceLevel::Entry,
        });
    }

    if SENIOR_INDICATORS.iter().any(|k| lowered_text.contains(k)) {
        return Some(ExperienceLevel::Senior);
    }

    if ENTRY_INDICATORS.iter().any(|k| lowered_text.contains(k)) {
        return Some(ExperienceLevel::Entry);
    }

    None
}

/// Digit runs too long for `u64` saturate rather than being skipped.
fn max_years_of_experience(lowered_text: &str) -> Option<u64> {
    YEARS_OF_EXPERIENCE
        .captures_iter(lowered_text)
        .map(|cap| cap[1].parse::<u64>().unwrap_or(u64::MAX))
        .max()
}

pub fn extract_education(text: &str) -> BTreeSet<String> {
    collect_matches(&EDUCATION_PATTERNS, text)
}

pub fn extract_job_titles(text: &str) -> BTreeSet<String> {
    collect_matches(&JOB_TITLE_PATTERNS, text)
}

fn collect_matches(patterns: &[Regex], text: &str) -> BTreeSet<String> {
    patterns
        .iter()
        .flat_map(|re| re.find_iter(text))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lines mentioning a corporate suffix, truncated, first five in order.
pub fn extract_companies(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            COMPANY_INDICATORS.iter().any(|k| lower.contains(k))
        })
        .map(|line| line.trim().chars().take(MAX_COMPANY_LINE_CHARS).collect())
        .take(MAX_COMPANIES)
        .collect()
}

pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: EMAIL.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE.captures(text).map(|cap| {
            let country = cap
                .get(1)
                .map_or(false, |prefix| prefix.as_str().contains('1'));
            let number = format!("({}) {}-{}", &cap[2], &cap[3], &cap[4]);
            if country {
                format!("+1 {number}")
            } else {
                number
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\
        jane.doe@example.com | (555) 123-4567\n\
        Senior Software Engineer with 9 years of experience in Python and React.\n\
        Acme Technologies Inc, 2018 - present\n\
        Globex Corp, 2014 - 2018\n\
        Bachelor of Science, University of Waterloo\n\
        Skills: Docker, Kubernetes, PostgreSQL, machine learning\n";

    fn lexicon() -> SkillLexicon {
        SkillLexicon::builtin()
    }

    fn build_profile(text: &str, lexicon: &SkillLexicon) -> CandidateProfile {
        build_profile_with_hint(text, lexicon, None)
    }

    #[test]
    fn test_skills_are_lexicon_entries_in_canonical_case() {
        let profile = build_profile(RESUME, &lexicon());
        for skill in ["Python", "React", "Docker", "Kubernetes", "PostgreSQL", "Machine Learning"] {
            assert!(profile.skills.contains(&skill.to_string()), "missing {skill}");
        }
        let lexicon = lexicon();
        assert!(profile.skills.iter().all(|s| lexicon.entries().contains(s)));
    }

    #[test]
    fn test_skill_substrings_inside_words_count() {
        // "R" is inside "Developer"; accepted imprecision.
        let profile = build_profile("Developer", &SkillLexicon::new(["R"]));
        assert_eq!(profile.skills, vec!["R"]);
    }

    #[test]
    fn test_skills_not_duplicated() {
        let profile = build_profile("python PYTHON Python", &lexicon());
        assert_eq!(profile.skills.iter().filter(|s| *s == "Python").count(), 1);
    }

    #[test]
    fn test_build_profile_is_deterministic() {
        let lexicon = lexicon();
        assert_eq!(build_profile(RESUME, &lexicon), build_profile(RESUME, &lexicon));
    }

    #[test]
    fn test_years_pattern_decides_level() {
        assert_eq!(
            infer_experience_level("5 years of experience"),
            Some(ExperienceLevel::Mid)
        );
        assert_eq!(
            infer_experience_level("10 yrs exp leading teams"),
            Some(ExperienceLevel::Senior)
        );
        assert_eq!(
            infer_experience_level("2 years experience"),
            Some(ExperienceLevel::Entry)
        );
        assert_eq!(
            infer_experience_level("5+ years of experience"),
            Some(ExperienceLevel::Mid)
        );
    }

    #[test]
    fn test_years_pattern_takes_maximum_and_beats_keywords() {
        // "senior" would say Senior, but the years rule fires first.
        assert_eq!(
            infer_experience_level("senior intern, 1 year experience, 4 years of experience"),
            Some(ExperienceLevel::Mid)
        );
    }

    #[test]
    fn test_keyword_rules_in_priority_order() {
        assert_eq!(
            infer_experience_level("principal architect"),
            Some(ExperienceLevel::Senior)
        );
        assert_eq!(
            infer_experience_level("summer intern and trainee"),
            Some(ExperienceLevel::Entry)
        );
        assert_eq!(
            infer_experience_level("junior dev, later team lead"),
            Some(ExperienceLevel::Senior)
        );
        assert_eq!(infer_experience_level("built things"), None);
    }

    #[test]
    fn test_oversized_year_count_still_counts() {
        let level = infer_experience_level("99999999999999999999999 years of experience");
        assert_eq!(level, Some(ExperienceLevel::Senior));
    }

    #[test]
    fn test_five_years_without_keywords_is_mid_level() {
        let profile = build_profile("I have 5 years of experience building APIs.", &lexicon());
        assert_eq!(profile.experience_level, ExperienceLevel::Mid);
        assert_eq!(profile.experience_level.label(), "Mid Level");
    }

    #[test]
    fn test_default_level_is_mid_and_hint_fills_the_gap() {
        let lexicon = lexicon();
        assert_eq!(
            build_profile("Built things with Rust.", &lexicon).experience_level,
            ExperienceLevel::Mid
        );
        assert_eq!(
            build_profile_with_hint(
                "Built things with Rust.",
                &lexicon,
                Some(ExperienceLevel::Senior),
            )
            .experience_level,
            ExperienceLevel::Senior
        );
        // Inference overrides the hint.
        assert_eq!(
            build_profile_with_hint("Junior developer", &lexicon, Some(ExperienceLevel::Senior))
                .experience_level,
            ExperienceLevel::Entry
        );
    }

    #[test]
    fn test_education_fragments() {
        let education = extract_education(RESUME);
        assert!(education.contains("Bachelor of Science"));
        assert!(education.contains("University of Waterloo"));

        let abbreviated = extract_education("M.S. in CS, Ph.D. in Physics, BS Math");
        assert!(abbreviated.contains("M.S."));
        assert!(abbreviated.contains("Ph.D."));
        assert!(abbreviated.contains("BS"));
    }

    #[test]
    fn test_bare_lowercase_abbreviations_are_ignored() {
        assert!(extract_education("please contact me, happy to be here").is_empty());
    }

    #[test]
    fn test_job_titles_are_deduplicated() {
        let titles = extract_job_titles("Developer, then Developer again, then Product Manager");
        assert!(titles.contains("Developer"));
        assert!(titles.contains("Product Manager"));
        assert!(titles.contains("Manager"));
        assert_eq!(titles.iter().filter(|t| *t == "Developer").count(), 1);
    }

    #[test]
    fn test_companies_keep_line_order_and_cap() {
        let companies = extract_companies(RESUME);
        assert_eq!(companies[0], "Acme Technologies Inc, 2018 - present");
        assert_eq!(companies[1], "Globex Corp, 2014 - 2018");

        let many = (0..8)
            .map(|i| format!("Company {i} LLC"))
            .collect::<Vec<_>>()
            .join("\n");
        let companies = extract_companies(&many);
        assert_eq!(companies.len(), 5);
        assert_eq!(companies[4], "Company 4 LLC");
    }

    #[test]
    fn test_company_lines_are_truncated() {
        let line = format!("{} Inc", "x".repeat(80));
        let companies = extract_companies(&line);
        assert_eq!(companies[0].chars().count(), 50);
    }

    #[test]
    fn test_contact_first_match_each() {
        let contact = extract_contact(RESUME);
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(contact.phone.as_deref(), Some("(555) 123-4567"));

        let contact = extract_contact("call +1 555.987.6543 or 555-000-1111");
        assert_eq!(contact.email, None);
        assert_eq!(contact.phone.as_deref(), Some("+1 (555) 987-6543"));
    }

    #[test]
    fn test_empty_text_gives_empty_profile() {
        let profile = build_profile("", &lexicon());
        assert!(profile.skills.is_empty());
        assert_eq!(profile.experience_level, ExperienceLevel::Mid);
        assert!(profile.education.is_empty());
        assert!(profile.companies.is_empty());
        assert_eq!(profile.contact, ContactInfo::default());
    }
}
