//! Normalisation of untrusted text received from pages.
//!
//! Inputs are never rejected here; they are cleaned and clamped.

/// Maximum retained length of a single text field, in characters.
pub const MAX_FIELD_CHARS: usize = 10_000;

/// Single-line text: control characters become spaces, whitespace runs
/// collapse to one space, ends are trimmed.
pub fn text_field(input: &str) -> String {
    let collapsed = input
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(collapsed, MAX_FIELD_CHARS)
}

/// Multi-line text such as stack traces: line breaks are kept (CRLF folded
/// to LF), other control characters are dropped, ends are trimmed.
pub fn textarea_field(input: &str) -> String {
    let cleaned: String = input
        .replace("\r\n", "\n")
        .chars()
        .filter(|c| *c == '\n' || *c == '\t' || !c.is_control())
        .collect();
    truncate_chars(cleaned.trim().to_string(), MAX_FIELD_CHARS)
}

/// URL-ish text: all whitespace and control characters are removed.
pub fn url_field(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    truncate_chars(cleaned, MAX_FIELD_CHARS)
}

/// Absolute value of a signed wire integer, saturated to `u32`.
pub fn abs_int(value: i64) -> u32 {
    u32::try_from(value.unsigned_abs()).unwrap_or(u32::MAX)
}

/// Loose boolean flag as sent by pages and environment variables: `1`,
/// `true`, `yes` and `on` (any case) are true, everything else is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}
