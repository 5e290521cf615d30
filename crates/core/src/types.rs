//! Shared domain types for captured errors and the component snapshot.

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// An error as captured on the page, before delivery.
///
/// Has no identity of its own; it is consumed by the delivery pump once
/// handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    /// Script URL the error originated from, or a sentinel such as `Promise`.
    pub source: String,
    pub line: u32,
    pub column: u32,
    pub stack: String,
}

/// An enabled component as reported by the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveComponent {
    /// Host-relative entry path, e.g. `my-extension/my-extension.php`.
    pub path: String,
    pub name: String,
    pub version: String,
}

/// The host's active theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTheme {
    /// Folder-level identifier of the theme (its stylesheet directory).
    pub id: String,
    pub name: String,
}

/// Read-only view of what the host has enabled, refreshed once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    #[serde(default)]
    pub components: Vec<ActiveComponent>,
    #[serde(default)]
    pub theme: ActiveTheme,
}

/// Qualitative attribution certainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
}

/// The component most likely responsible for an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectedComponent {
    pub path: String,
    pub name: String,
    pub confidence: Confidence,
}

/// A received error, enriched and attributed, as kept in the bounded log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizedLogEntry {
    /// Assigned by the log on append when empty; never reused.
    #[serde(default)]
    pub id: String,
    pub timestamp: Timestamp,
    pub message: String,
    pub source: String,
    pub line: u32,
    pub column: u32,
    pub stack: String,
    pub page_url: String,
    pub page_hook: String,
    pub is_admin: bool,
    pub user_agent: String,
    #[serde(default)]
    pub active_components: Vec<ActiveComponent>,
    #[serde(default)]
    pub suspected_component: Option<SuspectedComponent>,
}
