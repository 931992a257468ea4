//! Job Source Adapters: one per external job board.
//!
//! Each adapter issues a single GET against its search page and reads the
//! listing blocks out of the HTML. Field misses degrade to placeholders; an
//! unreadable block is skipped on its own; anything that breaks the whole call
//! comes back as a `SourceError` for the coordinator to fold.

pub mod indeed;
pub mod markup;
pub mod simplyhired;

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

use crate::models::Posting;

pub use indeed::IndeedSource;
pub use simplyhired::SimplyHiredSource;

/// Job type stamped on scraped listings; neither board exposes it in markup.
pub const DEFAULT_JOB_TYPE: &str = "Full-time";
/// Posted date stamped on scraped listings.
pub const DEFAULT_POSTED_DATE: &str = "Recently";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid search URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("markup error: {0}")]
    Markup(String),
}

/// A single external job board.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Stable identifier, also stamped into `Posting::source`.
    fn name(&self) -> &str;

    /// Delay the caller waits after each `fetch`, successful or not.
    fn throttle(&self) -> Throttle {
        Throttle::disabled()
    }

    /// Fetches up to `limit` postings matching `query` near `location`.
    /// A non-success HTTP status is an empty result, not an error.
    async fn fetch(
        &self,
        query: &str,
        location: &str,
        limit: usize,
    ) -> Result<Vec<Posting>, SourceError>;
}

/// Randomized politeness delay applied after each request to a job board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    min_ms: u64,
    max_ms: u64,
}

impl Throttle {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    pub fn next_delay(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..=self.max_ms))
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
