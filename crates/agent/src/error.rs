/// Errors raised on the capturing side.
///
/// None of these ever reach the page: delivery failures are swallowed by the
/// pump, and the rest only occur during startup.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
