// Résumé-to-profile extraction.
// Implements: skill lexicon loading, experience-level inference, education /
// job-title / company / contact heuristics.
// Everything below `lexicon` loading is pure: same text in, same profile out.

pub mod builder;
pub mod lexicon;
pub mod models;

pub use builder::build_profile_with_hint;
pub use lexicon::SkillLexicon;
pub use models::{CandidateProfile, ExperienceLevel};
