//! Runtime configuration: defaults, then environment, then CLI overrides.

use url::Url;

/// Default base URL both reef services are mounted on.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Fixed span, in degrees, of every scan target box.
pub const DEFAULT_SCAN_SPAN_DEG: f64 = 0.30;

/// Configuration for a grid session and the CLI.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Base URL both services are mounted on.
    pub service_url: Url,
    pub request_timeout_ms: u64,
    pub scan_span_deg: f64,
}

impl RuntimeConfig {
    /// Defaults plus `REEFGUARD_SERVICE_URL` / `REEFGUARD_TIMEOUT_MS`
    /// overrides. Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("REEFGUARD_SERVICE_URL") {
            match Url::parse(&raw) {
                Ok(url) => config.service_url = url,
                Err(e) => tracing::warn!("ignoring invalid REEFGUARD_SERVICE_URL: {e}"),
            }
        }
        if let Ok(raw) = std::env::var("REEFGUARD_TIMEOUT_MS") {
            match raw.parse() {
                Ok(ms) => config.request_timeout_ms = ms,
                Err(e) => tracing::warn!("ignoring invalid REEFGUARD_TIMEOUT_MS: {e}"),
            }
        }
        config
    }

    /// Apply CLI flag overrides on top of this config.
    pub fn with_overrides(
        mut self,
        service_url: Option<&str>,
        timeout_ms: Option<u64>,
    ) -> Result<Self, url::ParseError> {
        if let Some(raw) = service_url {
            self.service_url = Url::parse(raw)?;
        }
        if let Some(ms) = timeout_ms {
            self.request_timeout_ms = ms;
        }
        Ok(self)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            service_url: Url::parse(DEFAULT_SERVICE_URL).unwrap(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            scan_span_deg: DEFAULT_SCAN_SPAN_DEG,
        }
    }
}
