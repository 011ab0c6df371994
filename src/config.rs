//! Environment-driven configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const MIN_REVALIDATION_SECRET_LEN: usize = 32;
/// Matches the five minute page revalidation of the dashboard frontend
const DEFAULT_VIEW_CACHE_TTL_SECS: u64 = 300;

/// Current deployment environment (`APP_ENV`), defaulting to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production() -> bool {
    matches!(get_environment().as_str(), "production" | "prod")
}

pub fn get_database_url() -> Option<String> {
    env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// How the external analysis pipeline is launched
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub working_dir: PathBuf,
    pub program: String,
    pub script: String,
    pub export_target: String,
    pub timeout: Duration,
}

impl PipelineConfig {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            program: "python".to_string(),
            script: "main.py".to_string(),
            export_target: "firebase".to_string(),
            timeout: Duration::from_secs(180),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `None` when `PIPELINE_PATH` is unset: trigger routes answer 503.
    pub fn from_env() -> Option<Self> {
        let path = env::var("PIPELINE_PATH").ok().filter(|p| !p.trim().is_empty())?;
        let defaults = Self::new(path);
        Some(Self {
            program: env::var("PIPELINE_PROGRAM").unwrap_or(defaults.program.clone()),
            script: env::var("PIPELINE_SCRIPT").unwrap_or(defaults.script.clone()),
            export_target: env::var("PIPELINE_EXPORT").unwrap_or(defaults.export_target.clone()),
            timeout: Duration::from_secs(parse_var("PIPELINE_TIMEOUT_SECONDS", 180)),
            ..defaults
        })
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub environment: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub pipeline: Option<PipelineConfig>,
    pub revalidation_secret: Option<String>,
    pub view_cache_ttl: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: 8080,
            database_url: None,
            pipeline: None,
            revalidation_secret: None,
            view_cache_ttl: Duration::from_secs(DEFAULT_VIEW_CACHE_TTL_SECS),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        let revalidation_secret = env::var("REVALIDATION_SECRET").ok().filter(|secret| {
            if secret.len() < MIN_REVALIDATION_SECRET_LEN {
                tracing::warn!(
                    min_len = MIN_REVALIDATION_SECRET_LEN,
                    "REVALIDATION_SECRET is too short, revalidation endpoint disabled"
                );
                false
            } else {
                true
            }
        });

        Self {
            environment: get_environment(),
            port: parse_var("PORT", 8080),
            database_url: get_database_url(),
            pipeline: PipelineConfig::from_env(),
            revalidation_secret,
            view_cache_ttl: Duration::from_secs(parse_var(
                "VIEW_CACHE_TTL_SECONDS",
                DEFAULT_VIEW_CACHE_TTL_SECS,
            )),
        }
    }

    pub fn with_revalidation_secret(mut self, secret: impl Into<String>) -> Self {
        self.revalidation_secret = Some(secret.into());
        self
    }

    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = Some(pipeline);
        self
    }
}
