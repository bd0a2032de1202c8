use std::time::Duration;

use crate::config::{parse_var, ConfigError};
use crate::wiki::types::MAX_MEMBER_LIMIT;

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

pub const DEFAULT_USER_AGENT: &str = concat!(
    "wiki-word-freq/",
    env!("CARGO_PKG_VERSION"),
    " (category word-frequency analyzer)"
);

#[derive(Debug, Clone, PartialEq)]
pub struct WikiConfig {
    pub api_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub member_limit: u32,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            member_limit: MAX_MEMBER_LIMIT,
        }
    }
}

impl WikiConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let member_limit = parse_var(lookup, "WIKI_MEMBER_LIMIT")?.unwrap_or(defaults.member_limit);
        if member_limit == 0 || member_limit > MAX_MEMBER_LIMIT {
            return Err(ConfigError::Invalid {
                key: "WIKI_MEMBER_LIMIT",
                value: member_limit.to_string(),
                reason: format!("must be between 1 and {MAX_MEMBER_LIMIT}"),
            });
        }

        Ok(Self {
            api_url: lookup("WIKI_API_URL").unwrap_or(defaults.api_url),
            user_agent: lookup("WIKI_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout: parse_var(lookup, "WIKI_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            member_limit,
        })
    }
}
