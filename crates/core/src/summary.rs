//! Per-component error tallies for the operator review screen.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::FinalizedLogEntry;

/// Label used for entries with no suspected component.
pub const UNKNOWN_COMPONENT: &str = "Unknown";

/// Visual weight of a component tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Info,
    Warning,
    Danger,
}

impl Badge {
    /// `danger` above 5 errors, `warning` above 2, `info` otherwise.
    pub fn for_count(count: usize) -> Self {
        match count {
            c if c > 5 => Badge::Danger,
            c if c > 2 => Badge::Warning,
            _ => Badge::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentTally {
    pub name: String,
    pub count: usize,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    pub total: usize,
    /// Number of distinct tally groups, `Unknown` included.
    pub components_involved: usize,
    pub by_component: Vec<ComponentTally>,
}

/// Group entries by suspected component name, most frequent first.
///
/// Ties are broken by name so the output is stable.
pub fn summarize(entries: &[FinalizedLogEntry]) -> LogSummary {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        let name = entry
            .suspected_component
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or(UNKNOWN_COMPONENT);
        *counts.entry(name).or_default() += 1;
    }

    let mut by_component: Vec<ComponentTally> = counts
        .into_iter()
        .map(|(name, count)| ComponentTally {
            name: name.to_string(),
            count,
            badge: Badge::for_count(count),
        })
        .collect();
    by_component.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    LogSummary {
        total: entries.len(),
        components_involved: by_component.len(),
        by_component,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{Confidence, SuspectedComponent};

    fn entry(suspect: Option<&str>) -> FinalizedLogEntry {
        FinalizedLogEntry {
            id: String::new(),
            timestamp: Utc::now(),
            message: "m".into(),
            source: String::new(),
            line: 0,
            column: 0,
            stack: String::new(),
            page_url: String::new(),
            page_hook: String::new(),
            is_admin: true,
            user_agent: String::new(),
            active_components: Vec::new(),
            suspected_component: suspect.map(|name| SuspectedComponent {
                path: format!("{name}/{name}.php"),
                name: name.into(),
                confidence: Confidence::High,
            }),
        }
    }

    #[test]
    fn badge_thresholds() {
        assert_eq!(Badge::for_count(1), Badge::Info);
        assert_eq!(Badge::for_count(2), Badge::Info);
        assert_eq!(Badge::for_count(3), Badge::Warning);
        assert_eq!(Badge::for_count(5), Badge::Warning);
        assert_eq!(Badge::for_count(6), Badge::Danger);
    }

    #[test]
    fn empty_log_has_no_tallies() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.components_involved, 0);
        assert!(summary.by_component.is_empty());
    }

    #[test]
    fn groups_sorted_by_count_then_name() {
        let mut entries = vec![entry(None)];
        entries.extend((0..3).map(|_| entry(Some("Slider"))));
        entries.push(entry(Some("Forms")));

        let summary = summarize(&entries);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.components_involved, 3);
        assert_eq!(summary.by_component[0].name, "Slider");
        assert_eq!(summary.by_component[0].badge, Badge::Warning);
        assert_eq!(summary.by_component[1].name, "Forms");
        assert_eq!(summary.by_component[2].name, UNKNOWN_COMPONENT);
    }
}
