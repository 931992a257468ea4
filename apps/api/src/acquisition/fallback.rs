use crate::models::posting::URL_UNAVAILABLE;
use crate::models::Posting;

pub const FALLBACK_SOURCE: &str = "fallback";

/// Fixed synthetic postings returned when every source came back empty.
///
/// Titles and descriptions are filled from the leading profile skills so the
/// scorer still has something to rank; with no skills, generic wording is used.
pub fn sample_postings(skills: &[String], location: &str, job_type: &str) -> Vec<Posting> {
    let first = skills.first().map(String::as_str);
    let second = skills.get(1).map(String::as_str);

    let listed = |n: usize, otherwise: &str| -> String {
        if skills.is_empty() {
            otherwise.to_string()
        } else {
            skills.iter().take(n).map(String::as_str).collect::<Vec<_>>().join(", ")
        }
    };

    let samples = [
        (
            format!("{} Developer", first.unwrap_or("Software")),
            "Tech Solutions Inc",
            format!("Looking for someone with {} skills", listed(3, "programming")),
            "Today",
        ),
        (
            format!("Senior {} Engineer", second.unwrap_or("Software")),
            "Innovation Corp",
            format!(
                "Expert level position requiring {} expertise",
                listed(2, "technical")
            ),
            "2 days ago",
        ),
        (
            "Full Stack Developer".to_string(),
            "StartupXYZ",
            "Join our dynamic team and work with cutting-edge technologies".to_string(),
            "1 week ago",
        ),
        (
            format!("{} Analyst", first.unwrap_or("Data")),
            "DataTech Solutions",
            "Analyze complex datasets and provide insights".to_string(),
            "3 days ago",
        ),
        (
            "Product Manager".to_string(),
            "Global Enterprises",
            "Lead product development and strategy initiatives".to_string(),
            "5 days ago",
        ),
    ];

    samples
        .into_iter()
        .map(|(title, company, description, posted_date)| Posting {
            title,
            company: company.to_string(),
            location: location.to_string(),
            job_type: job_type.to_string(),
            url: URL_UNAVAILABLE.to_string(),
            description,
            source: FALLBACK_SOURCE.to_string(),
            posted_date: posted_date.to_string(),
        })
        .collect()
}
