use std::time::Duration;

use conflog_core::sanitize::parse_flag;

use crate::error::AgentError;
use crate::pump::PACING_INTERVAL;

/// Default HTTP timeout for bootstrap and delivery requests.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Agent configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Root URL of the receiving server, e.g. `http://localhost:3000`.
    pub server_url: String,
    /// Hook label of the page being observed.
    pub page_hook: String,
    /// URL reported as the page each error happened on.
    pub page_url: String,
    /// Whether the observed page is an administration page.
    pub is_admin: bool,
    /// Spacing between deliveries.
    pub pacing: Duration,
    pub http_timeout: Duration,
}

impl AgentConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                     | Required | Default     |
    /// |-----------------------------|----------|-------------|
    /// | `CONFLOG_SERVER_URL`        | **yes**  | --          |
    /// | `CONFLOG_PAGE_HOOK`         | no       | `frontend`  |
    /// | `CONFLOG_PAGE_URL`          | no       | server URL  |
    /// | `CONFLOG_IS_ADMIN`          | no       | `false`     |
    /// | `CONFLOG_PACING_MS`         | no       | `1000`      |
    /// | `CONFLOG_HTTP_TIMEOUT_SECS` | no       | `10`        |
    pub fn from_env() -> Result<Self, AgentError> {
        let server_url = std::env::var("CONFLOG_SERVER_URL")
            .map_err(|_| AgentError::Config("CONFLOG_SERVER_URL must be set".into()))?;
        if server_url.trim().is_empty() {
            return Err(AgentError::Config("CONFLOG_SERVER_URL must not be empty".into()));
        }

        let page_hook = std::env::var("CONFLOG_PAGE_HOOK").unwrap_or_else(|_| "frontend".into());
        let page_url = std::env::var("CONFLOG_PAGE_URL").unwrap_or_else(|_| server_url.clone());
        let is_admin = std::env::var("CONFLOG_IS_ADMIN")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let pacing = match std::env::var("CONFLOG_PACING_MS") {
            Ok(v) => Duration::from_millis(v.parse().map_err(|_| {
                AgentError::Config("CONFLOG_PACING_MS must be a valid u64".into())
            })?),
            Err(_) => PACING_INTERVAL,
        };

        let http_timeout_secs: u64 = match std::env::var("CONFLOG_HTTP_TIMEOUT_SECS") {
            Ok(v) => v.parse().map_err(|_| {
                AgentError::Config("CONFLOG_HTTP_TIMEOUT_SECS must be a valid u64".into())
            })?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            server_url,
            page_hook,
            page_url,
            is_admin,
            pacing,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}
