use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::DEFAULT_TOP_K;

pub const DEFAULT_INDEED_BASE_URL: &str = "https://www.indeed.com/jobs";
pub const DEFAULT_SIMPLYHIRED_BASE_URL: &str = "https://www.simplyhired.com/search";
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
);

/// Which implementation of the match services the pipeline runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// Real document extraction and live job sources.
    Live,
    /// Real document extraction, synthetic postings, no network.
    Synthetic,
}

impl FromStr for PipelineMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(PipelineMode::Live),
            "synthetic" | "offline" => Ok(PipelineMode::Synthetic),
            other => bail!("PIPELINE_MODE must be 'live' or 'synthetic', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub pipeline_mode: PipelineMode,
    pub skills_db_path: PathBuf,
    pub max_jobs: usize,
    pub top_k: usize,
    pub source_timeout_secs: u64,
    pub throttle_min_ms: u64,
    pub throttle_max_ms: u64,
    pub user_agent: String,
    pub default_location: String,
    pub default_job_type: String,
    pub indeed_base_url: String,
    pub simplyhired_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            pipeline_mode: parse_env("PIPELINE_MODE", PipelineMode::Live)?,
            skills_db_path: PathBuf::from(env_or("SKILLS_DB_PATH", "data/skills_database.json")),
            max_jobs: parse_env("MAX_JOBS", 50)?,
            top_k: parse_env("TOP_K", DEFAULT_TOP_K)?,
            source_timeout_secs: parse_env("SOURCE_TIMEOUT_SECS", 10)?,
            throttle_min_ms: parse_env("THROTTLE_MIN_MS", 1000)?,
            throttle_max_ms: parse_env("THROTTLE_MAX_MS", 2000)?,
            user_agent: env_or("SCRAPER_USER_AGENT", DEFAULT_USER_AGENT),
            default_location: env_or("DEFAULT_LOCATION", "Remote"),
            default_job_type: env_or("DEFAULT_JOB_TYPE", "Full-time"),
            indeed_base_url: env_or("INDEED_BASE_URL", DEFAULT_INDEED_BASE_URL),
            simplyhired_base_url: env_or("SIMPLYHIRED_BASE_URL", DEFAULT_SIMPLYHIRED_BASE_URL),
        };

        if config.max_jobs == 0 {
            bail!("MAX_JOBS must be at least 1");
        }
        if config.top_k == 0 {
            bail!("TOP_K must be at least 1");
        }

        Ok(config)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
