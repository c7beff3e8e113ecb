// File: src/schema/mod.rs
// Purpose: Schema trait, value specs and per-route configuration

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub mod constraint;

pub use constraint::Constraint;

/// A single problem reported by a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub message: String,
}

impl Issue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a schema says about one value
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaOutput {
    /// Accepted, possibly transformed
    Value(Value),
    /// Rejected; the first issue is reported to the caller
    Issues(Vec<Issue>),
    /// The schema can only answer asynchronously
    Deferred,
}

impl SchemaOutput {
    /// Rejection with a single issue
    pub fn issue(message: impl Into<String>) -> Self {
        SchemaOutput::Issues(vec![Issue::new(message)])
    }
}

/// Synchronous validator / transformer for a parameter value
///
/// Implemented for the built-in [`Constraint`]s and for any
/// `Fn(&Value) -> SchemaOutput` closure.
pub trait Schema: Send + Sync {
    fn validate(&self, value: &Value) -> SchemaOutput;
}

impl<F> Schema for F
where
    F: Fn(&Value) -> SchemaOutput + Send + Sync,
{
    fn validate(&self, value: &Value) -> SchemaOutput {
        self(value)
    }
}

/// How a registered parameter is treated
#[derive(Clone, Default)]
pub enum ValueSpec {
    /// Value is used as supplied
    #[default]
    Passthrough,
    /// Value goes through a schema first
    Schema(Arc<dyn Schema>),
}

impl ValueSpec {
    pub fn schema(schema: impl Schema + 'static) -> Self {
        ValueSpec::Schema(Arc::new(schema))
    }

    pub fn as_schema(&self) -> Option<&dyn Schema> {
        match self {
            ValueSpec::Passthrough => None,
            ValueSpec::Schema(schema) => Some(schema.as_ref()),
        }
    }
}

impl fmt::Debug for ValueSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSpec::Passthrough => f.write_str("Passthrough"),
            ValueSpec::Schema(_) => f.write_str("Schema(..)"),
        }
    }
}

impl From<Constraint> for ValueSpec {
    fn from(constraint: Constraint) -> Self {
        ValueSpec::schema(constraint)
    }
}

/// Wraps a closure as a value spec
///
/// # Examples
///
/// ```
/// use rhtmx_routes::schema::{from_fn, SchemaOutput};
/// use serde_json::Value;
///
/// let upper = from_fn(|v: &Value| match v.as_str() {
///     Some(s) => SchemaOutput::Value(Value::from(s.to_uppercase())),
///     None => SchemaOutput::issue("Expected a string"),
/// });
/// let out = upper.as_schema().unwrap().validate(&Value::from("en"));
/// assert_eq!(out, SchemaOutput::Value(Value::from("EN")));
/// ```
pub fn from_fn<F>(f: F) -> ValueSpec
where
    F: Fn(&Value) -> SchemaOutput + Send + Sync + 'static,
{
    ValueSpec::schema(f)
}

/// Schemas registered for one exact route pattern
#[derive(Debug, Clone, Default)]
pub struct RouteConfig {
    pub params: HashMap<String, ValueSpec>,
    pub search_params: HashMap<String, ValueSpec>,
}

impl RouteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema for a path parameter
    pub fn param(mut self, name: impl Into<String>, spec: impl Into<ValueSpec>) -> Self {
        self.params.insert(name.into(), spec.into());
        self
    }

    /// Registers a schema for a search parameter
    pub fn search_param(mut self, name: impl Into<String>, spec: impl Into<ValueSpec>) -> Self {
        self.search_params.insert(name.into(), spec.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.search_params.is_empty()
    }
}
