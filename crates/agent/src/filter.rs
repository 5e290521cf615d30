//! Noise filter applied before anything is queued.

use std::sync::LazyLock;

use regex::RegexSet;

/// File name of the page-side capture script. Errors raised from it are
/// never reported, so a failing delivery cannot feed back into the queue.
pub const CAPTURE_SCRIPT_FILENAME: &str = "error-logger.js";

/// Known-benign messages, matched case-insensitively.
const IGNORE_PATTERNS: &[&str] = &[
    r"(?i)ResizeObserver loop",
    r"(?i)Script error\.?$",
    r"(?i)Failed to fetch",
    r"(?i)Load failed",
    r"(?i)NetworkError",
    r"(?i)AbortError",
    r"(?i)ChunkLoadError",
];

static IGNORE_SET: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(IGNORE_PATTERNS).expect("ignore patterns are valid regexes"));

/// Whether an error is not worth reporting at all.
pub fn should_ignore(message: &str, source: &str) -> bool {
    if source.contains(CAPTURE_SCRIPT_FILENAME) {
        return true;
    }
    IGNORE_SET.is_match(message)
}
