// File: src/validate.rs
// Purpose: Apply resolved schemas to supplied parameter values

use serde_json::{Map, Value};

use crate::error::{Result, RouteError};
use crate::registry::SchemaSet;
use crate::schema::SchemaOutput;

/// Runs every supplied value through its registered schema
///
/// Keys without a schema pass through unchanged. Fails on the first
/// rejected key in the supplied object's order; deferred (asynchronous)
/// schemas fail immediately.
pub fn validate_params(raw: &Map<String, Value>, schemas: &SchemaSet<'_>) -> Result<Map<String, Value>> {
    let mut validated = Map::with_capacity(raw.len());

    for (key, value) in raw {
        let Some(schema) = schemas.get(key.as_str()).and_then(|spec| spec.as_schema()) else {
            validated.insert(key.clone(), value.clone());
            continue;
        };

        match schema.validate(value) {
            SchemaOutput::Value(value) => {
                validated.insert(key.clone(), value);
            }
            SchemaOutput::Issues(issues) => {
                let message = issues
                    .into_iter()
                    .next()
                    .map(|issue| issue.message)
                    .unwrap_or_else(|| "Invalid value".to_string());
                return Err(RouteError::Validation {
                    key: key.clone(),
                    message,
                });
            }
            SchemaOutput::Deferred => {
                return Err(RouteError::UnsupportedAsyncValidation { key: key.clone() });
            }
        }
    }

    Ok(validated)
}
