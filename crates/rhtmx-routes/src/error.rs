// File: src/error.rs
// Purpose: Errors raised while resolving a route into a path string

use thiserror::Error;

/// Errors surfaced by [`Navigator::get_route_with`](crate::Navigator::get_route_with)
///
/// Navigation itself never fails; only resolution does.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// A registered schema rejected a parameter value
    #[error("Validation failed for parameter \"{key}\": {message}")]
    Validation { key: String, message: String },

    /// A registered schema could not answer synchronously
    #[error("Schema for parameter \"{key}\" is asynchronous; route resolution is synchronous only")]
    UnsupportedAsyncValidation { key: String },

    /// A required segment parameter was not supplied (strict policy only)
    #[error("Missing parameter \"{name}\" for route {pattern}")]
    MissingParam { name: String, pattern: String },

    /// `params` or `searchParams` was neither an object nor null
    #[error("Expected {what} to be an object or null")]
    InvalidArguments { what: &'static str },
}

impl RouteError {
    /// Name of the parameter this error is about, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            RouteError::Validation { key, .. } | RouteError::UnsupportedAsyncValidation { key } => {
                Some(key)
            }
            RouteError::MissingParam { name, .. } => Some(name),
            RouteError::InvalidArguments { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
