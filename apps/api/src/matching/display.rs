use serde::Serialize;

use crate::models::ScoredPosting;

/// Descriptions longer than this are cut and suffixed with "...".
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;
/// Rendered in place of a link that is not an http(s) URL.
pub const PLACEHOLDER_LINK: &str = "#";

/// Presentation view of a scored posting for list displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub url: String,
    pub description: String,
    pub source: String,
    pub posted_date: String,
    pub match_score: f64,
    /// e.g. "85.0%"
    pub match_percentage: String,
    pub matched_skills: Vec<String>,
}

impl From<&ScoredPosting> for DisplayPosting {
    fn from(scored: &ScoredPosting) -> Self {
        let posting = &scored.posting;
        Self {
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            job_type: posting.job_type.clone(),
            url: display_link(&posting.url),
            description: preview(&posting.description),
            source: posting.source.clone(),
            posted_date: posting.posted_date.clone(),
            match_score: scored.match_score,
            match_percentage: format!("{:.1}%", scored.match_score * 100.0),
            matched_skills: scored.matched_skills.clone(),
        }
    }
}

fn display_link(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        PLACEHOLDER_LINK.to_string()
    }
}

fn preview(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}
