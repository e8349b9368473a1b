use std::time::Duration;

use research_core::{FetchInterval, FetchPeriod};

const DEFAULT_MAX_CONCURRENCY: usize = 5;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 300;

/// Pipeline tuning, collected from the environment once at startup.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Concurrent analysis runs allowed in a batch.
    pub max_concurrency: usize,
    /// Upper bound for each side of the market/news fan-out.
    pub fetch_timeout: Duration,
    pub period: FetchPeriod,
    pub interval: FetchInterval,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            period: FetchPeriod::default(),
            interval: FetchInterval::Daily,
        }
    }
}

impl OrchestratorConfig {
    /// Read overrides from the environment (and a `.env` file when present).
    /// Unparseable values fall back to defaults with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("RESEARCH_MAX_CONCURRENCY") {
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => config.max_concurrency = n,
                _ => tracing::warn!(
                    value = %raw,
                    "invalid RESEARCH_MAX_CONCURRENCY, using default"
                ),
            }
        }
        if let Ok(raw) = std::env::var("RESEARCH_FETCH_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.fetch_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    value = %raw,
                    "invalid RESEARCH_FETCH_TIMEOUT_SECS, using default"
                ),
            }
        }
        config
    }
}
