// Matching: weighted keyword scoring of postings against a candidate profile,
// stable top-K ranking, and the display view served by the summary endpoint.
// Pure functions only; nothing here performs I/O.

pub mod display;
pub mod ranker;
pub mod scorer;

pub use display::DisplayPosting;
pub use ranker::{rank, DEFAULT_TOP_K};
pub use scorer::{KeywordMatchScorer, MatchScore, MatchScorer, MatchWeights};
