use std::time::Duration;

use router_match::{DEFAULT_PATTERNS, DEFAULT_THRESHOLD};

/// Tunables for the routing pipeline. Read once at construction time; the
/// router never re-reads configuration per request.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub patterns: Vec<String>,
    pub coverage_threshold: f64,
    pub llm_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect(),
            coverage_threshold: DEFAULT_THRESHOLD,
            llm_timeout: Duration::from_secs(10),
        }
    }
}

impl RouterConfig {
    /// Build config from environment variables, falling back to defaults:
    /// `ROUTER_COVERAGE_THRESHOLD`, `ROUTER_LLM_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("ROUTER_COVERAGE_THRESHOLD") {
            if let Ok(parsed) = v.parse::<f64>() {
                config.coverage_threshold = parsed;
            }
        }
        if let Ok(v) = std::env::var("ROUTER_LLM_TIMEOUT_MS") {
            if let Ok(parsed) = v.parse::<u64>() {
                config.llm_timeout = Duration::from_millis(parsed);
            }
        }
        config
    }

    pub fn with_coverage_threshold(mut self, threshold: f64) -> Self {
        self.coverage_threshold = threshold;
        self
    }

    pub fn with_llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = timeout;
        self
    }
}
