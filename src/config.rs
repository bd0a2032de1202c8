use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::cache::DEFAULT_MAX_AGE;
use crate::wiki::config::WikiConfig;

pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_TOP_N: usize = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub wiki: WikiConfig,
    pub cache_dir: PathBuf,
    pub cache_max_age: Duration,
    /// Pages fetched at once during aggregation.
    pub concurrency: usize,
    pub top_n: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            wiki: WikiConfig::default(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_max_age: DEFAULT_MAX_AGE,
            concurrency: DEFAULT_CONCURRENCY,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl AnalyzerConfig {
    /// Reads settings from the process environment (and `.env`), falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let concurrency = parse_var(&lookup, "WIKI_CONCURRENCY")?.unwrap_or(defaults.concurrency);
        if concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "WIKI_CONCURRENCY",
                value: concurrency.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            wiki: WikiConfig::from_lookup(&lookup)?,
            cache_dir: lookup("WIKI_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            cache_max_age: parse_var(&lookup, "WIKI_CACHE_MAX_AGE_HOURS")?
                .map(|hours: u64| Duration::from_secs(hours * 60 * 60))
                .unwrap_or(defaults.cache_max_age),
            concurrency,
            top_n: parse_var(&lookup, "WIKI_TOP_N")?.unwrap_or(defaults.top_n),
        })
    }
}

pub(crate) fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
