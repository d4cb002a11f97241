//! Layered settings: built-in defaults, an optional file, then `JOBS_*`
//! environment variables (`JOBS_FETCH__RETRIES=5`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "remote_jobs.toml";
const ENV_PREFIX: &str = "JOBS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub timeout_secs: u64,
    pub retries: u32,
    pub backoff_secs: f64,
    pub jitter_secs: f64,
    pub seed: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        FetchSettings {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "application/json,text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 30,
            retries: 3,
            backoff_secs: 1.2,
            jitter_secs: 0.4,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub remoteok_limit: usize,
    pub remotive_limit: usize,
    pub remotive_category: Option<String>,
    pub remotive_search: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            remoteok_limit: 150,
            remotive_limit: 150,
            remotive_category: Some("software-dev".to_string()),
            remotive_search: Some("data".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fetch: FetchSettings,
    pub sources: SourceSettings,
    /// JSON file replacing the built-in skill/role/region vocabulary.
    pub vocabulary: Option<PathBuf>,
}

impl Settings {
    /// `path` must exist when given; otherwise `remote_jobs.toml` is read
    /// only if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        debug!(?settings, "Loaded settings");
        Ok(settings)
    }
}

// ── Tests ──
