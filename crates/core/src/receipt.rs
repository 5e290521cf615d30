//! Turning a delivered [`ErrorReport`] into a [`FinalizedLogEntry`].

use crate::attribution::attribute;
use crate::sanitize::{abs_int, text_field, textarea_field, url_field};
use crate::types::{ComponentSnapshot, FinalizedLogEntry, Timestamp};
use crate::wire::ErrorReport;

/// Sanitize, snapshot and attribute a received report.
///
/// Missing fields arrive as defaults and are kept as such; nothing here
/// rejects a report. The returned entry has no id yet; the log assigns one
/// on append.
pub fn finalize_report(
    report: ErrorReport,
    user_agent: &str,
    snapshot: &ComponentSnapshot,
    received_at: Timestamp,
) -> FinalizedLogEntry {
    let source = url_field(&report.source);
    let stack = textarea_field(&report.stack);
    let suspected_component = attribute(&source, &stack, &snapshot.components, &snapshot.theme);

    FinalizedLogEntry {
        id: String::new(),
        timestamp: received_at,
        message: text_field(&report.message),
        source,
        line: abs_int(report.line),
        column: abs_int(report.column),
        stack,
        page_url: url_field(&report.page_url),
        page_hook: text_field(&report.page_hook),
        is_admin: report.is_admin,
        user_agent: text_field(user_agent),
        active_components: snapshot.components.clone(),
        suspected_component,
    }
}
