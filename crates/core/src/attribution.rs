//! Culprit inference from an error's source location and stack text.
//!
//! The heuristic is a plain case-insensitive substring search: the first
//! active component (in host order) whose folder name appears anywhere in
//! `source` or `stack` is blamed. If none match, the active theme is checked.
//! A component folder that coincidentally appears in an unrelated frame URL
//! produces a false positive. Matches are not ranked: host order decides.

use crate::types::{ActiveComponent, ActiveTheme, Confidence, SuspectedComponent};

/// Prefix used for theme attributions in [`SuspectedComponent::path`].
pub const THEME_PATH_PREFIX: &str = "theme:";

/// Folder-level identifier of a component path.
///
/// Returns `None` for paths with no directory part (single-file components
/// living directly in the host's component root), which cannot be told apart
/// from the host itself.
pub fn component_folder(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    let folder = match trimmed.rfind('/') {
        Some(idx) => trimmed[..idx].trim_end_matches('/'),
        None => return None,
    };
    if folder.is_empty() || folder == "." {
        None
    } else {
        Some(folder)
    }
}

/// Infer the component most likely responsible for an error.
pub fn attribute(
    source: &str,
    stack: &str,
    components: &[ActiveComponent],
    theme: &ActiveTheme,
) -> Option<SuspectedComponent> {
    let haystack = format!("{source} {stack}").to_lowercase();

    for component in components {
        let Some(folder) = component_folder(&component.path) else {
            continue;
        };
        if haystack.contains(&folder.to_lowercase()) {
            let name = if component.name.trim().is_empty() {
                folder.to_string()
            } else {
                component.name.clone()
            };
            return Some(SuspectedComponent {
                path: component.path.clone(),
                name,
                confidence: Confidence::High,
            });
        }
    }

    // An empty theme id would match every error.
    if !theme.id.is_empty() && haystack.contains(&theme.id.to_lowercase()) {
        return Some(SuspectedComponent {
            path: format!("{THEME_PATH_PREFIX}{}", theme.id),
            name: theme.name.clone(),
            confidence: Confidence::High,
        });
    }

    None
}
