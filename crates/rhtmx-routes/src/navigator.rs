//! Route set and path navigator
//!
//! A [`RouteSet`] is the immutable configuration built once at setup: the
//! route tree index, the schema registry and render options. A [`Navigator`]
//! is a cheap cursor into it holding the segment names chosen so far; every
//! [`Navigator::child`] call returns a fresh node.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Result, RouteError};
use crate::query::serialize_query;
use crate::registry::{SchemaRegistry, SchemaScope};
use crate::render::{pattern_text, render_path, MissingParamPolicy};
use crate::schema::RouteConfig;
use crate::tree::{DeclaredRoute, RouteTree};
use crate::validate::validate_params;

/// Immutable route configuration shared by every navigator node
#[derive(Debug, Default)]
pub struct RouteSet {
    tree: RouteTree,
    registry: SchemaRegistry,
    missing_params: MissingParamPolicy,
}

impl RouteSet {
    pub fn builder() -> RouteSetBuilder {
        RouteSetBuilder::default()
    }

    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn missing_params(&self) -> MissingParamPolicy {
        self.missing_params
    }

    /// Canonical declared patterns in declaration order
    pub fn patterns(&self) -> Vec<&str> {
        self.tree.routes().iter().map(|r| r.pattern.as_str()).collect()
    }

    /// Root navigator over this route set
    pub fn navigator(self: &Arc<Self>) -> Navigator {
        Navigator {
            routes: Arc::clone(self),
            segments: Vec::new(),
        }
    }
}

/// Collects declarations before freezing them into a [`RouteSet`]
///
/// Configuring a pattern also declares it.
#[derive(Debug, Default)]
pub struct RouteSetBuilder {
    tree: RouteTree,
    registry: SchemaRegistry,
    missing_params: MissingParamPolicy,
}

impl RouteSetBuilder {
    /// Declares a route pattern
    pub fn route(mut self, pattern: impl AsRef<str>) -> Self {
        self.tree.insert(pattern.as_ref());
        self
    }

    /// Declares several route patterns in order
    pub fn routes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.tree.insert(pattern.as_ref());
        }
        self
    }

    /// Declares a route pattern and registers its schemas
    pub fn configure(mut self, pattern: impl AsRef<str>, config: RouteConfig) -> Self {
        let pattern = pattern.as_ref();
        self.tree.insert(pattern);
        if !config.is_empty() {
            self.registry.register(pattern, config);
        }
        self
    }

    /// Sets what happens when a required segment parameter is missing
    pub fn missing_params(mut self, policy: MissingParamPolicy) -> Self {
        self.missing_params = policy;
        self
    }

    pub fn build(self) -> RouteSet {
        tracing::debug!(
            routes = self.tree.routes().len(),
            configured = self.registry.len(),
            "route set built"
        );
        RouteSet {
            tree: self.tree,
            registry: self.registry,
            missing_params: self.missing_params,
        }
    }

    /// Builds the route set and returns its root navigator
    pub fn navigator(self) -> Navigator {
        Arc::new(self.build()).navigator()
    }
}

/// Builds a route set from declared patterns plus per-pattern configuration
///
/// Never fails; malformed patterns become static literals and conflicting
/// siblings resolve first-declared-wins.
///
/// # Examples
///
/// ```
/// use rhtmx_routes::{create_routes, RouteConfig};
/// use serde_json::json;
///
/// let routes = create_routes(["/", "/blog/[slug]"], Vec::<(&str, RouteConfig)>::new());
/// assert_eq!(routes.get_route().unwrap(), "/");
///
/// let path = routes
///     .child("blog")
///     .child("slug")
///     .get_route_with(&json!({"slug": "my-article"}), &json!(null))
///     .unwrap();
/// assert_eq!(path, "/blog/my-article");
/// ```
pub fn create_routes<I, S, C, P>(patterns: I, configs: C) -> Navigator
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    C: IntoIterator<Item = (P, RouteConfig)>,
    P: AsRef<str>,
{
    configs
        .into_iter()
        .fold(RouteSet::builder().routes(patterns), |builder, (pattern, config)| {
            builder.configure(pattern, config)
        })
        .navigator()
}

/// A node in the lazy path tree: the segment names chosen so far
#[derive(Debug, Clone)]
pub struct Navigator {
    routes: Arc<RouteSet>,
    segments: Vec<String>,
}

impl Navigator {
    /// Node for this prefix plus `name`
    ///
    /// Never fails; a name that was never declared renders as a literal.
    pub fn child(&self, name: impl Into<String>) -> Navigator {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(name.into());
        Navigator {
            routes: Arc::clone(&self.routes),
            segments,
        }
    }

    /// Successive children from a `/`-separated name path
    ///
    /// `nav.descend("users/id/posts")` is `nav.child("users").child("id").child("posts")`.
    pub fn descend(&self, names: &str) -> Navigator {
        names
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(self.clone(), |nav, name| nav.child(name))
    }

    /// Child names declared directly under this node
    pub fn children(&self) -> Vec<String> {
        self.routes
            .tree
            .child_segments(&self.segments)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Names chosen so far
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn route_set(&self) -> &Arc<RouteSet> {
        &self.routes
    }

    /// Pattern this node resolves to, e.g. `/blog/[slug]`
    pub fn pattern(&self) -> String {
        pattern_text(&self.routes.tree.resolve_segments(&self.segments))
    }

    /// The declared route this node resolves to, if any
    pub fn declared_route(&self) -> Option<DeclaredRoute> {
        self.routes.tree.find_matching_route(&self.segments).cloned()
    }

    /// Renders this node's path with no parameters
    pub fn get_route(&self) -> Result<String> {
        self.get_route_with(&Value::Null, &Value::Null)
    }

    /// Validates `params` and `search_params`, renders the path and appends
    /// the query string
    ///
    /// Both arguments must be JSON objects or `null`.
    pub fn get_route_with(&self, params: &Value, search_params: &Value) -> Result<String> {
        let empty = Map::new();
        let params = as_object(params, "params")?.unwrap_or(&empty);
        let search_params = as_object(search_params, "searchParams")?.unwrap_or(&empty);

        let RouteSet {
            tree,
            registry,
            missing_params,
        } = self.routes.as_ref();

        let specs = tree.resolve_segments(&self.segments);

        let schemas = registry.effective_schemas(tree, &self.segments, &specs, SchemaScope::Params);
        let params = validate_params(params, &schemas)?;
        let path = render_path(&specs, &params, *missing_params)?;

        let search_schemas =
            registry.effective_schemas(tree, &self.segments, &specs, SchemaScope::SearchParams);
        let search_params = validate_params(search_params, &search_schemas)?;
        let query = serialize_query(&search_params);

        tracing::debug!(
            segments = ?self.segments,
            pattern = %pattern_text(&specs),
            path = %path,
            query = %query,
            "resolved route"
        );

        Ok(path + &query)
    }
}

fn as_object<'a>(value: &'a Value, what: &'static str) -> Result<Option<&'a Map<String, Value>>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        _ => Err(RouteError::InvalidArguments { what }),
    }
}
