//! Segment classification for route patterns
//!
//! Pure functional parsing of file-route patterns into typed segments.
//! All functions are **pure**: same input → same output, no side effects.

/// Kind of a single route pattern segment
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{classify_segment, SegmentKind};
///
/// assert_eq!(classify_segment("about").kind, SegmentKind::Static);
/// assert_eq!(classify_segment("[id]").kind, SegmentKind::Dynamic);
/// assert_eq!(classify_segment("[...slug]").kind, SegmentKind::CatchAll);
/// assert_eq!(classify_segment("[[...slug]]").kind, SegmentKind::OptionalCatchAll);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Literal text
    Static,
    /// `[name]`: exactly one path component
    Dynamic,
    /// `[...name]`: one or more path components
    CatchAll,
    /// `[[...name]]`: zero or more path components
    OptionalCatchAll,
}

impl SegmentKind {
    /// Whether this kind is written with brackets and takes a parameter
    pub fn is_param(self) -> bool {
        !matches!(self, SegmentKind::Static)
    }
}

/// One classified segment of a route pattern
///
/// `name` is the bracket-stripped name used for navigation; for static
/// segments it equals `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentSpec {
    pub raw: String,
    pub kind: SegmentKind,
    pub name: String,
}

impl SegmentSpec {
    /// A static segment whose text is `text`
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: text.clone(),
            kind: SegmentKind::Static,
            name: text,
        }
    }

    fn param(raw: &str, kind: SegmentKind, name: &str) -> Self {
        Self {
            raw: raw.to_string(),
            kind,
            name: name.to_string(),
        }
    }

    /// Whether this pattern segment accepts `name` at its position
    ///
    /// Static segments need literal equality; any bracket form matches anything.
    pub fn accepts(&self, name: &str) -> bool {
        self.kind.is_param() || self.raw == name
    }
}

impl AsRef<SegmentSpec> for SegmentSpec {
    fn as_ref(&self) -> &SegmentSpec {
        self
    }
}

/// Parameter names may not be empty or contain bracket / separator characters
fn is_param_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['[', ']', '/'])
}

/// Classifies a single fragment into a [`SegmentSpec`] (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Optional catch-all**: `[[...name]]`
/// 2. **Catch-all**: `[...name]`
/// 3. **Dynamic**: `[name]`
/// 4. **Static**: any other text, including malformed bracket text
///
/// Never fails.
pub fn classify_segment(fragment: &str) -> SegmentSpec {
    if let Some(name) = fragment
        .strip_prefix("[[...")
        .and_then(|s| s.strip_suffix("]]"))
    {
        if is_param_name(name) {
            return SegmentSpec::param(fragment, SegmentKind::OptionalCatchAll, name);
        }
    }

    match fragment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => match inner.strip_prefix("...") {
            Some(name) if is_param_name(name) => {
                SegmentSpec::param(fragment, SegmentKind::CatchAll, name)
            }
            None if is_param_name(inner) => SegmentSpec::param(fragment, SegmentKind::Dynamic, inner),
            _ => SegmentSpec::literal(fragment),
        },
        None => SegmentSpec::literal(fragment),
    }
}

/// Splits a route pattern on `/` and classifies every non-empty fragment
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{parse_pattern, SegmentKind};
///
/// let segments = parse_pattern("/users/[id]/posts");
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].name, "id");
/// assert_eq!(segments[1].kind, SegmentKind::Dynamic);
///
/// assert!(parse_pattern("/").is_empty());
/// ```
pub fn parse_pattern(pattern: &str) -> Vec<SegmentSpec> {
    pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(classify_segment)
        .collect()
}
