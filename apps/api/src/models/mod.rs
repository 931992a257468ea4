pub mod posting;
pub mod warning;

pub use posting::{Posting, ScoredPosting};
pub use warning::PipelineWarning;
