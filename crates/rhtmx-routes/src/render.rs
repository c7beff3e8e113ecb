//! Path rendering
//!
//! Substitutes validated parameter values into classified segments and joins
//! them into a concrete path string.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, RouteError};
use crate::segment::{SegmentKind, SegmentSpec};

/// What to do when a dynamic or catch-all segment has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingParamPolicy {
    /// Leave the bracket text (`[id]`) in the rendered path
    #[default]
    Preserve,
    /// Fail with [`RouteError::MissingParam`]
    Error,
}

/// Stringifies one value for a path segment or query pair
///
/// Strings verbatim, numbers in decimal, booleans as `true`/`false`, arrays
/// comma-joined, objects as compact JSON.
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Null => Cow::Borrowed(""),
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(|item| stringify(item).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Components of a catch-all value; a scalar counts as one component
fn components(value: &Value) -> Vec<Cow<'_, str>> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(stringify)
            .collect(),
        scalar => vec![stringify(scalar)],
    }
}

/// Renders segments into a path with one leading `/`
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{parse_pattern, render_path, MissingParamPolicy};
/// use serde_json::json;
///
/// let segments = parse_pattern("/docs/[...path]");
/// let params = json!({"path": ["api", "reference"]});
/// let path = render_path(&segments, params.as_object().unwrap(), MissingParamPolicy::Preserve).unwrap();
/// assert_eq!(path, "/docs/api/reference");
/// ```
pub fn render_path<T>(segments: &[T], params: &Map<String, Value>, policy: MissingParamPolicy) -> Result<String>
where
    T: AsRef<SegmentSpec>,
{
    let mut fragments: Vec<Cow<'_, str>> = Vec::with_capacity(segments.len());

    for seg in segments {
        let seg: &SegmentSpec = seg.as_ref();
        let value = params.get(&seg.name).filter(|v| !v.is_null());

        match seg.kind {
            SegmentKind::Static => fragments.push(Cow::Borrowed(seg.raw.as_str())),
            SegmentKind::Dynamic => match value {
                Some(value) => fragments.push(stringify(value)),
                None => fragments.push(unresolved(seg, segments, policy)?),
            },
            SegmentKind::CatchAll => {
                let parts = value.map(components).unwrap_or_default();
                if parts.is_empty() {
                    fragments.push(unresolved(seg, segments, policy)?);
                } else {
                    fragments.extend(parts);
                }
            }
            SegmentKind::OptionalCatchAll => {
                fragments.extend(value.map(components).unwrap_or_default());
            }
        }
    }

    if fragments.is_empty() {
        return Ok("/".to_string());
    }

    Ok(format!("/{}", fragments.join("/")))
}

fn unresolved<'a, T: AsRef<SegmentSpec>>(
    seg: &'a SegmentSpec,
    segments: &[T],
    policy: MissingParamPolicy,
) -> Result<Cow<'a, str>> {
    match policy {
        MissingParamPolicy::Preserve => {
            tracing::warn!(param = %seg.name, "missing parameter left unresolved in path");
            Ok(Cow::Borrowed(seg.raw.as_str()))
        }
        MissingParamPolicy::Error => Err(RouteError::MissingParam {
            name: seg.name.clone(),
            pattern: pattern_text(segments),
        }),
    }
}

/// Pattern text for a list of segments, e.g. `/users/[id]`
pub fn pattern_text<T: AsRef<SegmentSpec>>(segments: &[T]) -> String {
    let raws: Vec<&str> = segments
        .iter()
        .map(|s| {
            let s: &SegmentSpec = s.as_ref();
            s.raw.as_str()
        })
        .collect();
    format!("/{}", raws.join("/"))
}
