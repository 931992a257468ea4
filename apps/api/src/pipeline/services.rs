//! Match services: the capabilities one pipeline run needs, behind a trait.
//!
//! `LiveServices` searches the real job boards. `SyntheticServices` answers
//! every search with the fallback postings and never touches the network,
//! for demos and offline runs. `AppState` holds an `Arc<dyn MatchServices>`
//! chosen at startup from `PIPELINE_MODE`.

use async_trait::async_trait;
use tracing::{error, warn};

use crate::acquisition::fallback::sample_postings;
use crate::acquisition::{Acquisition, JobAcquisitionCoordinator};
use crate::extraction::{self, Document, Extraction};
use crate::matching::{KeywordMatchScorer, MatchScore, MatchScorer};
use crate::models::Posting;
use crate::profile::CandidateProfile;

#[async_trait]
pub trait MatchServices: Send + Sync {
    /// Short name reported with every match report.
    fn backend(&self) -> &'static str;

    async fn extract_text(&self, document: &Document) -> Extraction;

    async fn acquire_jobs(
        &self,
        skills: &[String],
        location: &str,
        job_type: &str,
        max_jobs: usize,
    ) -> Acquisition;

    fn score(&self, profile: &CandidateProfile, posting: &Posting) -> MatchScore;
}

/// Runs extraction on the blocking pool. A panic that escapes the extractor
/// degrades the document instead of failing the request.
async fn extract_off_runtime(document: &Document) -> Extraction {
    let document = document.clone();
    match tokio::task::spawn_blocking(move || extraction::extract_text(&document)).await {
        Ok(extraction) => {
            if extraction.degraded {
                warn!(
                    "Document extraction degraded: {}",
                    extraction.detail.as_deref().unwrap_or("unknown cause")
                );
            }
            extraction
        }
        Err(e) => {
            error!("Extraction task failed: {e}");
            Extraction::degraded(String::new(), format!("extraction task failed: {e}"))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LiveServices
// ────────────────────────────────────────────────────────────────────────────

pub struct LiveServices {
    coordinator: JobAcquisitionCoordinator,
    scorer: KeywordMatchScorer,
}

impl LiveServices {
    pub fn new(coordinator: JobAcquisitionCoordinator, scorer: KeywordMatchScorer) -> Self {
        Self {
            coordinator,
            scorer,
        }
    }
}

#[async_trait]
impl MatchServices for LiveServices {
    fn backend(&self) -> &'static str {
        "live"
    }

    async fn extract_text(&self, document: &Document) -> Extraction {
        extract_off_runtime(document).await
    }

    async fn acquire_jobs(
        &self,
        skills: &[String],
        location: &str,
        job_type: &str,
        max_jobs: usize,
    ) -> Acquisition {
        self.coordinator
            .acquire_jobs(skills, location, job_type, max_jobs)
            .await
    }

    fn score(&self, profile: &CandidateProfile, posting: &Posting) -> MatchScore {
        self.scorer.score(profile, posting)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SyntheticServices
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct SyntheticServices {
    scorer: KeywordMatchScorer,
}

impl SyntheticServices {
    pub fn new(scorer: KeywordMatchScorer) -> Self {
        Self { scorer }
    }
}

#[async_trait]
impl MatchServices for SyntheticServices {
    fn backend(&self) -> &'static str {
        "synthetic"
    }

    async fn extract_text(&self, document: &Document) -> Extraction {
        extract_off_runtime(document).await
    }

    async fn acquire_jobs(
        &self,
        skills: &[String],
        location: &str,
        job_type: &str,
        max_jobs: usize,
    ) -> Acquisition {
        let mut postings = sample_postings(skills, location, job_type);
        postings.truncate(max_jobs.max(1));
        Acquisition {
            postings,
            warnings: Vec::new(),
            used_fallback: true,
        }
    }

    fn score(&self, profile: &CandidateProfile, posting: &Posting) -> MatchScore {
        self.scorer.score(profile, posting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::fallback::FALLBACK_SOURCE;
    use crate::extraction::DocumentFormat;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_synthetic_acquisition_has_no_warnings() {
        let services = SyntheticServices::default();
        let acquisition = services
            .acquire_jobs(&["Rust".to_string()], "Remote", "Full-time", 3)
            .await;

        assert_eq!(acquisition.postings.len(), 3);
        assert!(acquisition.warnings.is_empty());
        assert!(acquisition.used_fallback);
        assert!(acquisition.postings.iter().all(|p| p.source == FALLBACK_SOURCE));
    }

    #[tokio::test]
    async fn test_extraction_runs_off_runtime() {
        let services = SyntheticServices::default();
        let document = Document::new(
            DocumentFormat::Docx,
            Bytes::from(crate::extraction::docx::docx_fixture(&["Rust developer"])),
        );
        let extraction = services.extract_text(&document).await;
        assert_eq!(extraction.text, "Rust developer\n");
        assert!(!extraction.degraded);
    }
}
