//! Page-facing wire types.
//!
//! These cross the boundary between the capturing page and the receiving
//! server, so they use the camelCase field names the page script expects.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::sanitize::parse_flag;
use crate::types::{ActiveComponent, ErrorRecord};

/// Anti-forgery action name for error ingestion.
pub const ACTION_LOG_ERROR: &str = "log_error";

/// Path of the ingest endpoint, relative to the server root.
pub const INGEST_PATH: &str = "/api/v1/errors";

/// Path of the page bootstrap endpoint, relative to the server root.
pub const PAGE_CONTEXT_PATH: &str = "/api/v1/page-context";

/// Body of a single error delivery.
///
/// Every field defaults when absent, and a field of the wrong JSON type is
/// coerced (or defaulted) rather than failing the whole body: a report is
/// never refused for malformed optional data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorReport {
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(deserialize_with = "lenient_string")]
    pub source: String,
    /// Signed on the wire so that garbage input degrades instead of failing
    /// deserialization; normalised to its absolute value on receipt.
    #[serde(deserialize_with = "lenient_int")]
    pub line: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub column: i64,
    #[serde(deserialize_with = "lenient_string")]
    pub stack: String,
    #[serde(deserialize_with = "lenient_string")]
    pub page_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub page_hook: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_admin: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub nonce: String,
}

impl ErrorReport {
    /// Build a delivery body from a captured record plus page context.
    pub fn from_record(record: &ErrorRecord, page: &PageContext, page_url: &str) -> Self {
        Self {
            message: record.message.clone(),
            source: record.source.clone(),
            line: i64::from(record.line),
            column: i64::from(record.column),
            stack: record.stack.clone(),
            page_url: page_url.to_string(),
            page_hook: page.current_page.clone(),
            is_admin: page.is_admin,
            nonce: page.nonce.clone(),
        }
    }
}

/// Everything a page needs to start capturing errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageContext {
    /// Ingest endpoint path, relative to the server root.
    pub ingest_url: String,
    pub nonce: String,
    pub active_components: Vec<ActiveComponent>,
    /// Hook label of the page being rendered, e.g. `frontend` or `dashboard`.
    pub current_page: String,
    pub is_admin: bool,
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

/// Strings pass through; numbers and booleans are stringified; anything
/// else is empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Integers pass through; floats and numeric strings are truncated toward
/// zero; anything else is zero.
fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_default(),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or_default()
        }
        Value::Bool(b) => i64::from(b),
        _ => 0,
    })
}

/// Booleans pass through; non-zero numbers and flag strings such as `"1"`
/// are true; anything else is false.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => parse_flag(&s),
        _ => false,
    })
}
