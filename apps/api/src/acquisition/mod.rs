// Job acquisition: per-source HTML adapters, concurrent fan-out with per-call
// timeouts, (title, company) dedup, and synthetic fallback postings.
// Adapters return Result; the coordinator folds failures into warnings and
// never fails its caller.

pub mod coordinator;
pub mod fallback;
pub mod sources;

use std::time::Duration;

use reqwest::Client;

pub use coordinator::{Acquisition, JobAcquisitionCoordinator};
pub use sources::{JobSource, Throttle};

/// Builds the HTTP client shared by every adapter for connection reuse.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}
