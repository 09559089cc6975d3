// Runtime configuration for the data core.
// Defaults identify the portfolio owner; environment variables override them.

use std::env;
use std::time::Duration;

const DEFAULT_USER: &str = "DhruvWebDev";
const DEFAULT_ORG: &str = "SolanaCore";

const GITHUB_API_BASE: &str = "https://api.github.com";
const CONTRIBUTIONS_API_BASE: &str = "https://github-contributions-api.jogruber.de";

/// How long the complete stats snapshot stays cached: 15 minutes.
const SNAPSHOT_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub handle whose profile is rendered.
    pub user: String,
    /// Organization whose repositories are mixed into the project list.
    pub org: String,
    /// GitHub REST API base URL.
    pub api_base: String,
    /// Contribution-calendar aggregator base URL.
    pub contributions_base: String,
    /// TTL for the complete stats snapshot.
    pub snapshot_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            org: DEFAULT_ORG.to_string(),
            api_base: GITHUB_API_BASE.to_string(),
            contributions_base: CONTRIBUTIONS_API_BASE.to_string(),
            snapshot_ttl: SNAPSHOT_TTL,
        }
    }
}

impl Config {
    /// Build a configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(user) = env::var("FOLIO_USER") {
            config.user = user;
        }
        if let Ok(org) = env::var("FOLIO_ORG") {
            config.org = org;
        }
        if let Ok(base) = env::var("FOLIO_API_BASE") {
            config.api_base = base;
        }
        if let Ok(base) = env::var("FOLIO_CONTRIBUTIONS_API_BASE") {
            config.contributions_base = base;
        }
        config
    }
}
