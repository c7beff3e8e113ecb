//! Route pattern canonicalisation
//!
//! Declared patterns are keyed by their canonical form so that
//! `/dashboard/`, `dashboard` and `/dashboard` all declare the same route.

use std::borrow::Cow;

/// Checks whether a pattern is already in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
///
/// # Examples
///
/// ```
/// use rhtmx_routes::path::is_canonical;
///
/// assert!(is_canonical("/"));
/// assert!(is_canonical("/blog/[slug]"));
/// assert!(!is_canonical("blog"));
/// assert!(!is_canonical("/blog/"));
/// assert!(!is_canonical("/blog//[slug]"));
/// ```
pub fn is_canonical(pattern: &str) -> bool {
    if !pattern.starts_with('/') {
        return false;
    }

    if pattern.contains("//") || pattern.contains('\\') {
        return false;
    }

    pattern == "/" || !pattern.ends_with('/')
}

/// Normalize a route pattern to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::path::canonical_pattern;
///
/// assert_eq!(canonical_pattern("/about"), "/about");
/// assert_eq!(canonical_pattern("about/"), "/about");
/// assert_eq!(canonical_pattern("\\docs\\[...path]"), "/docs/[...path]");
/// assert_eq!(canonical_pattern(""), "/");
/// ```
pub fn canonical_pattern(pattern: &str) -> Cow<'_, str> {
    if is_canonical(pattern) {
        return Cow::Borrowed(pattern);
    }

    let normalized = pattern
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}
