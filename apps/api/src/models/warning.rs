use serde::Serialize;

/// A condition that degraded a pipeline run without failing it.
/// Logged at WARN where it happens and returned to the caller with the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// The résumé could not be read, fully or in part.
    ExtractionDegraded { detail: String },
    /// One job source failed, timed out, or had unusable markup.
    SourceUnavailable { source: String, reason: String },
    /// No live source produced a posting; synthetic postings were used.
    AcquisitionExhausted { sources_tried: usize },
    /// Caller-supplied skills that are not in the lexicon were dropped.
    UnknownSkillsIgnored { skills: Vec<String> },
}

impl PipelineWarning {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineWarning::ExtractionDegraded { .. } => "extraction_degraded",
            PipelineWarning::SourceUnavailable { .. } => "source_unavailable",
            PipelineWarning::AcquisitionExhausted { .. } => "acquisition_exhausted",
            PipelineWarning::UnknownSkillsIgnored { .. } => "unknown_skills_ignored",
        }
    }
}
