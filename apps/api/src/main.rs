mod acquisition;
mod config;
mod errors;
mod extraction;
mod matching;
mod models;
mod pipeline;
mod profile;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::acquisition::sources::{IndeedSource, SimplyHiredSource};
use crate::acquisition::{build_http_client, JobAcquisitionCoordinator, JobSource, Throttle};
use crate::config::{Config, PipelineMode};
use crate::matching::{KeywordMatchScorer, MatchWeights};
use crate::pipeline::{LiveServices, MatchServices, SyntheticServices};
use crate::profile::SkillLexicon;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobScout API v{}", env!("CARGO_PKG_VERSION"));

    // Load the skill lexicon (built-in list when the file is missing or bad)
    let lexicon = Arc::new(SkillLexicon::load(&config.skills_db_path));
    info!("Skill lexicon ready: {} skills", lexicon.len());

    // Initialize match services for the configured mode
    let services = build_services(&config)?;
    info!("Pipeline backend: {}", services.backend());

    // Build app state
    let state = AppState {
        config: config.clone(),
        lexicon,
        services,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Live mode wires both job boards behind one shared HTTP client.
fn build_services(config: &Config) -> Result<Arc<dyn MatchServices>> {
    let scorer = KeywordMatchScorer::new(MatchWeights::default());

    match config.pipeline_mode {
        PipelineMode::Synthetic => Ok(Arc::new(SyntheticServices::new(scorer))),
        PipelineMode::Live => {
            let timeout = Duration::from_secs(config.source_timeout_secs);
            let client = build_http_client(&config.user_agent, timeout)
                .context("Failed to build HTTP client")?;
            let throttle = Throttle::new(config.throttle_min_ms, config.throttle_max_ms);

            let indeed: Arc<dyn JobSource> = Arc::new(
                IndeedSource::new(client.clone(), &config.indeed_base_url, throttle)
                    .context("INDEED_BASE_URL is not a valid URL")?,
            );
            let simplyhired: Arc<dyn JobSource> = Arc::new(
                SimplyHiredSource::new(client, &config.simplyhired_base_url, throttle)
                    .context("SIMPLYHIRED_BASE_URL is not a valid URL")?,
            );
            let sources = vec![indeed, simplyhired];
            let coordinator = JobAcquisitionCoordinator::new(sources, timeout);
            info!("Job sources: {}", coordinator.source_names().join(", "));

            Ok(Arc::new(LiveServices::new(coordinator, scorer)))
        }
    }
}
