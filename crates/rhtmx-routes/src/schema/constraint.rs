// File: src/schema/constraint.rs
// Purpose: Built-in parameter schemas

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{Schema, SchemaOutput};

static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

/// Built-in schemas usable from code and from the TOML manifest
///
/// `null` passes through every constraint. Arrays (catch-all values) are
/// checked element by element.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Integer; decimal strings are converted to numbers
    Int,
    /// ASCII letters only
    Alpha,
    /// ASCII letters and digits only
    AlphaNum,
    /// Lowercase words separated by single hyphens
    Slug,
    /// Hyphenated UUID
    Uuid,
    /// Full match against a regular expression
    Pattern(Regex),
    /// One of a fixed set of values
    OneOf(Vec<String>),
    /// Uppercases strings
    Uppercase,
    /// Lowercases strings
    Lowercase,
}

impl Constraint {
    /// Looks up a constraint by its manifest name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Constraint::Int),
            "alpha" => Some(Constraint::Alpha),
            "alphanum" => Some(Constraint::AlphaNum),
            "slug" => Some(Constraint::Slug),
            "uuid" => Some(Constraint::Uuid),
            "uppercase" => Some(Constraint::Uppercase),
            "lowercase" => Some(Constraint::Lowercase),
            _ => None,
        }
    }

    /// Regex constraint; the expression is anchored to the whole value
    pub fn pattern(expr: &str) -> Result<Self, regex::Error> {
        Regex::new(&format!("^(?:{})$", expr)).map(Constraint::Pattern)
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::OneOf(values.into_iter().map(Into::into).collect())
    }

    fn check_scalar(&self, value: &Value) -> SchemaOutput {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return SchemaOutput::issue("Expected a scalar value"),
        };

        match self {
            Constraint::Int => match value {
                Value::Number(n) if n.is_i64() || n.is_u64() => SchemaOutput::Value(value.clone()),
                Value::String(s) => match s.parse::<i64>() {
                    Ok(n) => SchemaOutput::Value(Value::from(n)),
                    Err(_) => SchemaOutput::issue("Expected an integer"),
                },
                _ => SchemaOutput::issue("Expected an integer"),
            },
            Constraint::Alpha => accept_if(
                value,
                !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic()),
                "Expected letters only",
            ),
            Constraint::AlphaNum => accept_if(
                value,
                !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric()),
                "Expected letters and digits only",
            ),
            Constraint::Slug => accept_if(value, SLUG_REGEX.is_match(&text), "Expected a slug"),
            Constraint::Uuid => accept_if(value, UUID_REGEX.is_match(&text), "Expected a UUID"),
            Constraint::Pattern(re) => accept_if(
                value,
                re.is_match(&text),
                format!("Does not match pattern {}", re.as_str()),
            ),
            Constraint::OneOf(allowed) => accept_if(
                value,
                allowed.iter().any(|a| *a == text),
                format!("Expected one of: {}", allowed.join(", ")),
            ),
            Constraint::Uppercase => match value {
                Value::String(s) => SchemaOutput::Value(Value::from(s.to_uppercase())),
                other => SchemaOutput::Value(other.clone()),
            },
            Constraint::Lowercase => match value {
                Value::String(s) => SchemaOutput::Value(Value::from(s.to_lowercase())),
                other => SchemaOutput::Value(other.clone()),
            },
        }
    }
}

fn accept_if(value: &Value, ok: bool, message: impl Into<String>) -> SchemaOutput {
    if ok {
        SchemaOutput::Value(value.clone())
    } else {
        SchemaOutput::issue(message)
    }
}

impl Schema for Constraint {
    fn validate(&self, value: &Value) -> SchemaOutput {
        match value {
            Value::Null => SchemaOutput::Value(Value::Null),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match self.check_scalar(item) {
                        SchemaOutput::Value(v) => out.push(v),
                        rejected => return rejected,
                    }
                }
                SchemaOutput::Value(Value::Array(out))
            }
            scalar => self.check_scalar(scalar),
        }
    }
}
