//! # RHTMX Routes
//!
//! One declared source of truth for URL paths. Route patterns use the
//! file-route conventions of the RHTMX router:
//! - Static segments (`/about`)
//! - Dynamic segments (`/users/[id]`)
//! - Catch-all segments (`/docs/[...path]`, one or more components)
//! - Optional catch-all segments (`/shop/[[...filters]]`, zero or more)
//!
//! Paths are built by navigating segment names from a root [`Navigator`]
//! and resolving the node with parameters. Parameters go through per-route
//! schemas, inherited down the route hierarchy, before they are rendered.
//! Search parameters are serialized into a canonical query string.
//!
//! Resolution is one-directional (parameters → path) and fully synchronous.
//! A [`RouteSet`] is immutable once built and can be shared across threads.
//!
//! ## Example
//!
//! ```
//! use rhtmx_routes::{Constraint, RouteConfig, RouteSet};
//! use serde_json::json;
//!
//! let routes = RouteSet::builder()
//!     .routes(["/", "/dashboard/settings", "/docs/[...path]"])
//!     .configure("/users/[id]", RouteConfig::new().param("id", Constraint::Int))
//!     .navigator();
//!
//! assert_eq!(routes.child("dashboard").child("settings").get_route().unwrap(), "/dashboard/settings");
//!
//! let docs = routes.child("docs").child("path");
//! assert_eq!(
//!     docs.get_route_with(&json!({"path": ["api", "reference"]}), &json!({"v": 2})).unwrap(),
//!     "/docs/api/reference?v=2"
//! );
//!
//! let user = routes.descend("users/id");
//! assert!(user.get_route_with(&json!({"id": "abc"}), &json!(null)).is_err());
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
mod navigator;
pub mod path;
mod query;
mod registry;
mod render;
pub mod schema;
mod segment;
mod tree;
mod validate;

// Re-export public types
pub use config::{RouteEntry, RoutesConfig, RoutingConfig, ValueSpecConfig};
pub use error::{Result, RouteError};
pub use navigator::{create_routes, Navigator, RouteSet, RouteSetBuilder};
pub use query::serialize_query;
pub use registry::{SchemaRegistry, SchemaScope, SchemaSet};
pub use render::{pattern_text, render_path, stringify, MissingParamPolicy};
pub use schema::{Constraint, Issue, RouteConfig, Schema, SchemaOutput, ValueSpec};
pub use segment::{classify_segment, parse_pattern, SegmentKind, SegmentSpec};
pub use tree::{DeclaredRoute, RouteTree};
pub use validate::validate_params;
