use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel stored in `Posting::url` when a listing has no usable link.
pub const URL_UNAVAILABLE: &str = "unavailable";
/// Placeholder for a title or company the source markup did not provide.
pub const FIELD_MISSING: &str = "N/A";

fn url_unavailable() -> String {
    URL_UNAVAILABLE.to_string()
}

/// Blank links from callers collapse to the sentinel.
fn url_or_unavailable<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let url = String::deserialize(deserializer)?;
    if url.trim().is_empty() {
        Ok(url_unavailable())
    } else {
        Ok(url)
    }
}

/// One job listing, from a live source or the fallback generator.
/// Never modified after acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Posting {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    /// A link, or `URL_UNAVAILABLE`. Never empty.
    #[serde(default = "url_unavailable", deserialize_with = "url_or_unavailable")]
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Adapter identifier, or "fallback".
    #[serde(default)]
    pub source: String,
    /// Free text as published ("Recently", "2 days ago").
    #[serde(default)]
    pub posted_date: String,
}

impl Posting {
    /// `(lowercase title, lowercase company)`; equal keys mean the same listing.
    pub fn dedup_key(&self) -> (String, String) {
        (self.title.to_lowercase(), self.company.to_lowercase())
    }

    /// Lowercased "title description" text the scorer matches against.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

/// A posting together with its fitness score. Derived, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPosting {
    #[serde(flatten)]
    pub posting: Posting,
    /// 0.0 – 1.0
    pub match_score: f64,
    pub matched_skills: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, company: &str) -> Posting {
        Posting {
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            url: URL_UNAVAILABLE.to_string(),
            description: String::new(),
            source: "indeed".to_string(),
            posted_date: "Recently".to_string(),
        }
    }

    #[test]
    fn test_dedup_key_ignores_case() {
        assert_eq!(
            posting("Data Scientist", "Acme").dedup_key(),
            posting("data scientist", "ACME").dedup_key()
        );
    }

    #[test]
    fn test_missing_url_deserializes_to_sentinel() {
        let p: Posting =
            serde_json::from_str(r#"{"title": "Rust Engineer", "company": "Ferrous"}"#).unwrap();
        assert_eq!(p.url, URL_UNAVAILABLE);
    }

    #[test]
    fn test_blank_url_deserializes_to_sentinel() {
        for url in ["", "   "] {
            let raw = serde_json::json!({
                "title": "Rust Engineer",
                "company": "Ferrous",
                "url": url
            });
            let p: Posting = serde_json::from_value(raw).unwrap();
            assert_eq!(p.url, URL_UNAVAILABLE);
        }
    }

    #[test]
    fn test_supplied_url_is_kept() {
        let raw = serde_json::json!({
            "title": "Rust Engineer",
            "company": "Ferrous",
            "url": "https://example.com/jobs/1"
        });
        let p: Posting = serde_json::from_value(raw).unwrap();
        assert_eq!(p.url, "https://example.com/jobs/1");
    }

    #[test]
    fn test_scored_posting_flattens_fields() {
        let scored = ScoredPosting {
            posting: posting("Rust Engineer", "Ferrous"),
            match_score: 0.5,
            matched_skills: vec!["Rust".to_string()],
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["title"], "Rust Engineer");
        assert_eq!(value["match_score"], 0.5);
        assert_eq!(value["matched_skills"][0], "Rust");
    }
}
