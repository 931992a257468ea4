use crate::models::ScoredPosting;

pub const DEFAULT_TOP_K: usize = 5;

/// Orders postings best-first and keeps the leading `top_k`.
/// The sort is stable: equal scores keep their acquisition order.
pub fn rank(mut scored: Vec<ScoredPosting>, top_k: usize) -> Vec<ScoredPosting> {
    scored.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    scored.truncate(top_k);
    scored
}
