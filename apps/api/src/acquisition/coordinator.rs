use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::acquisition::fallback::sample_postings;
use crate::acquisition::sources::{JobSource, SourceError};
use crate::models::{PipelineWarning, Posting};

/// Skills beyond this many are left out of the search query.
pub const QUERY_SKILL_LIMIT: usize = 5;

/// Postings from one acquisition, plus whatever degraded along the way.
#[derive(Debug, Clone)]
pub struct Acquisition {
    /// Deduplicated, never empty.
    pub postings: Vec<Posting>,
    pub warnings: Vec<PipelineWarning>,
    pub used_fallback: bool,
}

/// Fans a search out to every configured source and merges the results.
pub struct JobAcquisitionCoordinator {
    sources: Vec<Arc<dyn JobSource>>,
    timeout: Duration,
}

impl JobAcquisitionCoordinator {
    /// Sources are queried concurrently but merged in this order.
    pub fn new(sources: Vec<Arc<dyn JobSource>>, timeout: Duration) -> Self {
        Self { sources, timeout }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn acquire_jobs(
        &self,
        skills: &[String],
        location: &str,
        job_type: &str,
        max_jobs: usize,
    ) -> Acquisition {
        let query = build_query(skills);
        let per_source = (max_jobs / self.sources.len().max(1)).max(1);
        info!(
            "Searching {} sources for '{query}' in {location} ({per_source} each)",
            self.sources.len()
        );

        // Only the exchange itself is timed; the politeness delay follows it.
        let calls = self.sources.iter().map(|source| {
            let query = query.as_str();
            async move {
                let fetch = source.fetch(query, location, per_source);
                let result = match tokio::time::timeout(self.timeout, fetch).await {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::Timeout(self.timeout)),
                };
                source.throttle().pause().await;
                result
            }
        });
        let results = join_all(calls).await;

        let mut warnings = Vec::new();
        let mut collected = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(postings) => collected.extend(postings),
                Err(e) => {
                    warn!("[{}] source unavailable: {e}", source.name());
                    warnings.push(PipelineWarning::SourceUnavailable {
                        source: source.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut postings = dedup_postings(collected);
        postings.truncate(max_jobs);

        if postings.is_empty() {
            warn!(
                "No postings from {} sources, using fallback postings",
                self.sources.len()
            );
            warnings.push(PipelineWarning::AcquisitionExhausted {
                sources_tried: self.sources.len(),
            });
            return Acquisition {
                postings: sample_postings(skills, location, job_type),
                warnings,
                used_fallback: true,
            };
        }

        info!("Acquired {} unique postings", postings.len());
        Acquisition {
            postings,
            warnings,
            used_fallback: false,
        }
    }
}

/// First `QUERY_SKILL_LIMIT` skills in profile order, space separated.
pub fn build_query(skills: &[String]) -> String {
    skills
        .iter()
        .take(QUERY_SKILL_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps the first posting for each `(lowercase title, lowercase company)`.
pub fn dedup_postings(postings: Vec<Posting>) -> Vec<Posting> {
    let mut seen = HashSet::new();
    postings
        .into_iter()
        .filter(|p| seen.insert(p.dedup_key()))
        .collect()
}
