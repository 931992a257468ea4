//! Axum route handlers for the matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::Document;
use crate::matching::DisplayPosting;
use crate::models::{PipelineWarning, Posting, ScoredPosting};
use crate::pipeline::{
    build_candidate, normalize_profile, run_pipeline, score_and_rank, MatchReport,
    ProfileOutcome, RunLimits, Submission,
};
use crate::profile::{CandidateProfile, ExperienceLevel};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub count: usize,
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub backend: String,
    pub skills: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub matches: Vec<DisplayPosting>,
    pub warnings: Vec<PipelineWarning>,
}

impl From<MatchReport> for MatchSummary {
    fn from(report: MatchReport) -> Self {
        Self {
            run_id: report.run_id,
            generated_at: report.generated_at,
            backend: report.backend,
            matches: report.matches.iter().map(DisplayPosting::from).collect(),
            skills: report.profile.skills,
            experience_level: report.profile.experience_level,
            warnings: report.warnings,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankRequest {
    pub profile: CandidateProfile,
    pub postings: Vec<Posting>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub matches: Vec<ScoredPosting>,
    pub warnings: Vec<PipelineWarning>,
}

/// Fields read from a multipart résumé upload. Unknown parts are ignored.
#[derive(Debug, Default)]
struct UploadForm {
    resume: Option<ResumeUpload>,
    location: Option<String>,
    job_type: Option<String>,
    experience_level: Option<String>,
}

#[derive(Debug)]
struct ResumeUpload {
    bytes: Bytes,
    content_type: Option<String>,
    file_name: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => {
                    let content_type = field.content_type().map(String::from);
                    let file_name = field.file_name().map(String::from);
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("could not read resume upload: {e}"))
                    })?;
                    form.resume = Some(ResumeUpload {
                        bytes,
                        content_type,
                        file_name,
                    });
                }
                "location" | "job_type" | "experience_level" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("could not read field '{name}': {e}"))
                    })?;
                    let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
                    match name.as_str() {
                        "location" => form.location = value,
                        "job_type" => form.job_type = value,
                        _ => form.experience_level = value,
                    }
                }
                other => debug!("Ignoring unknown multipart field '{other}'"),
            }
        }

        Ok(form)
    }

    fn document(&self) -> Result<Document, AppError> {
        let upload = self
            .resume
            .as_ref()
            .ok_or_else(|| AppError::Validation("a 'resume' file part is required".to_string()))?;
        if upload.bytes.is_empty() {
            return Err(AppError::Validation("the uploaded resume is empty".to_string()));
        }
        Ok(Document::classify(
            upload.bytes.clone(),
            upload.content_type.as_deref(),
            upload.file_name.as_deref(),
        )?)
    }

    fn level_hint(&self) -> Option<ExperienceLevel> {
        let raw = self.experience_level.as_deref()?;
        let level = ExperienceLevel::parse_hint(raw);
        if level.is_none() {
            debug!("Unrecognized experience level hint '{raw}'");
        }
        level
    }

    fn into_submission(self, state: &AppState) -> Result<Submission, AppError> {
        let document = self.document()?;
        let level_hint = self.level_hint();
        Ok(Submission {
            document,
            location: self
                .location
                .unwrap_or_else(|| state.config.default_location.clone()),
            job_type: self
                .job_type
                .unwrap_or_else(|| state.config.default_job_type.clone()),
            level_hint,
        })
    }
}

fn run_limits(state: &AppState) -> RunLimits {
    RunLimits {
        max_jobs: state.config.max_jobs,
        top_k: state.config.top_k,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        count: state.lexicon.len(),
        skills: state.lexicon.entries().to_vec(),
    })
}

/// POST /api/v1/profile
///
/// Extracts a résumé upload into a candidate profile without searching.
pub async fn handle_build_profile(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProfileOutcome>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let document = form.document()?;

    let outcome = build_candidate(
        state.services.as_ref(),
        &state.lexicon,
        &document,
        form.level_hint(),
    )
    .await;

    Ok(Json(outcome))
}

/// POST /api/v1/matches
///
/// Full pipeline: extract → profile → acquire → score → rank.
pub async fn handle_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchReport>, AppError> {
    let submission = UploadForm::read(multipart).await?.into_submission(&state)?;

    let report = run_pipeline(
        state.services.as_ref(),
        &state.lexicon,
        submission,
        run_limits(&state),
    )
    .await;

    Ok(Json(report))
}

/// POST /api/v1/matches/summary
///
/// Same pipeline as `/matches`, rendered for list display.
pub async fn handle_match_summary(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchSummary>, AppError> {
    let submission = UploadForm::read(multipart).await?.into_submission(&state)?;

    let report = run_pipeline(
        state.services.as_ref(),
        &state.lexicon,
        submission,
        run_limits(&state),
    )
    .await;

    Ok(Json(MatchSummary::from(report)))
}

/// POST /api/v1/matches/rank
///
/// Scores caller-supplied postings against a caller-supplied profile.
/// No document extraction and no job search.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let top_k = request.top_k.unwrap_or(state.config.top_k);
    if top_k == 0 {
        return Err(AppError::Validation("top_k must be at least 1".to_string()));
    }

    let (profile, warning) = normalize_profile(request.profile, &state.lexicon);
    info!(
        "Ranking {} supplied postings for {} skills",
        request.postings.len(),
        profile.skills.len()
    );

    let matches = score_and_rank(state.services.as_ref(), &profile, request.postings, top_k);

    Ok(Json(RankResponse {
        matches,
        warnings: warning.into_iter().collect(),
    }))
}
