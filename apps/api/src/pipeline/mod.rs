// Pipeline: one résumé submission end to end.
// document → text → profile → acquisition → scoring → top-K ranking.
// Only an unsupported document format fails a run; everything else degrades
// into `PipelineWarning`s carried on the report.

pub mod handlers;
pub mod services;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::Document;
use crate::matching::rank;
use crate::models::{PipelineWarning, Posting, ScoredPosting};
use crate::profile::{build_profile_with_hint, CandidateProfile, ExperienceLevel, SkillLexicon};

pub use services::{LiveServices, MatchServices, SyntheticServices};

/// Everything a caller supplies for one run.
#[derive(Debug, Clone)]
pub struct Submission {
    pub document: Document,
    pub location: String,
    pub job_type: String,
    pub level_hint: Option<ExperienceLevel>,
}

/// Limits applied to every run, taken from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct RunLimits {
    pub max_jobs: usize,
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileOutcome {
    pub profile: CandidateProfile,
    pub warnings: Vec<PipelineWarning>,
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub backend: String,
    pub location: String,
    pub job_type: String,
    pub profile: CandidateProfile,
    /// Best first, at most `top_k`.
    pub matches: Vec<ScoredPosting>,
    pub postings_considered: usize,
    pub used_fallback: bool,
    pub warnings: Vec<PipelineWarning>,
}

/// Extracts the document and builds the candidate profile.
pub async fn build_candidate(
    services: &dyn MatchServices,
    lexicon: &SkillLexicon,
    document: &Document,
    level_hint: Option<ExperienceLevel>,
) -> ProfileOutcome {
    let extraction = services.extract_text(document).await;

    let mut warnings = Vec::new();
    if extraction.degraded {
        warnings.push(PipelineWarning::ExtractionDegraded {
            detail: extraction
                .detail
                .clone()
                .unwrap_or_else(|| "document could not be read".to_string()),
        });
    }

    let profile = build_profile_with_hint(&extraction.text, lexicon, level_hint);
    info!(
        "Profile built: {} skills, {}",
        profile.skills.len(),
        profile.experience_level
    );
    if profile.skills.is_empty() {
        warn!("No lexicon skills found in the résumé; continuing with an empty skill set");
    }

    ProfileOutcome { profile, warnings }
}

/// Scores `postings` for `profile` and keeps the best `top_k`.
pub fn score_and_rank(
    services: &dyn MatchServices,
    profile: &CandidateProfile,
    postings: Vec<Posting>,
    top_k: usize,
) -> Vec<ScoredPosting> {
    let scored = postings
        .into_iter()
        .map(|posting| services.score(profile, &posting).into_scored(posting))
        .collect();
    rank(scored, top_k)
}

pub async fn run_pipeline(
    services: &dyn MatchServices,
    lexicon: &SkillLexicon,
    submission: Submission,
    limits: RunLimits,
) -> MatchReport {
    let run_id = Uuid::new_v4();
    info!(
        "Run {run_id}: {} ({}), {} / {} ({} backend)",
        submission.document.file_name.as_deref().unwrap_or("unnamed upload"),
        submission.document.format.mime(),
        submission.location,
        submission.job_type,
        services.backend()
    );

    let ProfileOutcome {
        profile,
        mut warnings,
    } = build_candidate(services, lexicon, &submission.document, submission.level_hint).await;

    let acquisition = services
        .acquire_jobs(
            &profile.skills,
            &submission.location,
            &submission.job_type,
            limits.max_jobs,
        )
        .await;
    warnings.extend(acquisition.warnings);

    let postings_considered = acquisition.postings.len();
    let matches = score_and_rank(services, &profile, acquisition.postings, limits.top_k);
    info!(
        "Run {run_id}: ranked {} of {postings_considered} postings",
        matches.len()
    );
    if !warnings.is_empty() {
        let kinds: Vec<&str> = warnings.iter().map(PipelineWarning::kind).collect();
        warn!("Run {run_id}: finished with warnings [{}]", kinds.join(", "));
    }

    MatchReport {
        run_id,
        generated_at: Utc::now(),
        backend: services.backend().to_string(),
        location: submission.location,
        job_type: submission.job_type,
        profile,
        matches,
        postings_considered,
        used_fallback: acquisition.used_fallback,
        warnings,
    }
}

/// Maps caller-supplied skills onto lexicon spellings, dropping unknown ones.
pub fn normalize_profile(
    profile: CandidateProfile,
    lexicon: &SkillLexicon,
) -> (CandidateProfile, Option<PipelineWarning>) {
    let mut known: Vec<String> = Vec::new();
    let mut unknown = Vec::new();

    for skill in &profile.skills {
        match lexicon.canonical(skill) {
            Some(canonical) => {
                if !known.iter().any(|k| k == canonical) {
                    known.push(canonical.to_string());
                }
            }
            None => unknown.push(skill.clone()),
        }
    }

    let warning = if unknown.is_empty() {
        None
    } else {
        warn!("Ignoring {} skills not in the lexicon", unknown.len());
        Some(PipelineWarning::UnknownSkillsIgnored { skills: unknown })
    };

    (
        CandidateProfile {
            skills: known,
            ..profile
        },
        warning,
    )
}
