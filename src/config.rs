// IMPORTANT:
// Keep ALL numeric values centralized here (repo rule: no hardcoded numeric values scattered around).

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context};

// NOTE: HOST_VERSION must stay in sync with the `version` field in Cargo.toml.
pub const HOST_VERSION: &str = "0.3.0";

pub mod logging {
    pub const DEFAULT_LOG_SPEC: &str = "info";
    pub const LOG_FILE_BASENAME: &str = "cook_api";

    pub const LOG_ROTATE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
    pub const LOG_ROTATE_KEEP_FILES: usize = 5;
}

pub mod matching {
    // Similarity floor for accepting a fuzzy resolution. "fries" vs "rice" scores 0.67.
    pub const RESOLVE_CUTOFF: f64 = 0.72;
    // Similarity floor for listing a near miss as a suggestion.
    pub const SUGGEST_CUTOFF: f64 = 0.55;

    pub const DEFAULT_SUGGEST_LIMIT: usize = 8;
    pub const MAX_SUGGEST_LIMIT: usize = 50;

    // Longest query (in chars) that is scored against the index. Similarity is
    // quadratic in length; longer input is rejected at the HTTP boundary and never
    // reaches the fuzzy stage.
    pub const MAX_QUERY_CHARS: usize = 128;
}

pub mod env {
    pub const DB_PATH: &str = "DB_PATH";
    pub const BIND_ADDR: &str = "COOK_BIND_ADDR";
    pub const MODE_POLICY: &str = "COOK_MODE_POLICY";
    pub const LOG_DIR: &str = "COOK_LOG_DIR";
}

pub mod defaults {
    pub const DB_PATH: &str = "philips_manual_extract.json";
    pub const BIND_ADDR: &str = "0.0.0.0:8000";
}

/// What `/cook` does when the requested mode does not exist for the resolved food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModePolicy {
    /// Answer `found: false` with the modes the food does have.
    #[default]
    Strict,
    /// Serve the food's first declared mode and attach a warning.
    FallbackFirst,
}

impl ModePolicy {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "fallback-first" | "fallback_first" | "fallback" => Ok(Self::FallbackFirst),
            other => bail!("unknown mode policy {other:?} (expected \"strict\" or \"fallback-first\")"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::FallbackFirst => "fallback-first",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub mode_policy: ModePolicy,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = PathBuf::from(get(env::DB_PATH).unwrap_or_else(|| defaults::DB_PATH.to_string()));

        let bind_raw = get(env::BIND_ADDR).unwrap_or_else(|| defaults::BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {} value {bind_raw:?}", env::BIND_ADDR))?;

        let mode_policy = match get(env::MODE_POLICY) {
            Some(raw) => ModePolicy::parse(&raw).with_context(|| format!("invalid {}", env::MODE_POLICY))?,
            None => ModePolicy::default(),
        };

        let log_dir = get(env::LOG_DIR).map(PathBuf::from);

        Ok(Self {
            db_path,
            bind_addr,
            mode_policy,
            log_dir,
        })
    }
}
