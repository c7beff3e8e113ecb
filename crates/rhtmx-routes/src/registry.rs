//! Schema registry and inheritance resolver
//!
//! Schemas are registered per exact route pattern. For a navigated path the
//! effective set is built level by level: every declared pattern matching a
//! proper prefix contributes its schemas (longer prefixes override shorter
//! ones), then the exact route's own schemas override everything inherited.
//!
//! Within one level, the pattern literally identical to the navigated
//! segments wins, then earlier declarations win over later ones.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::path::canonical_pattern;
use crate::schema::{RouteConfig, ValueSpec};
use crate::segment::SegmentSpec;
use crate::tree::RouteTree;

/// Borrowed view of the schemas that apply to one resolution
pub type SchemaSet<'a> = HashMap<&'a str, &'a ValueSpec>;

/// Which of a route's schema maps to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaScope {
    Params,
    SearchParams,
}

impl SchemaScope {
    fn select(self, config: &RouteConfig) -> &HashMap<String, ValueSpec> {
        match self {
            SchemaScope::Params => &config.params,
            SchemaScope::SearchParams => &config.search_params,
        }
    }
}

/// Per-pattern route configurations keyed by canonical pattern
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    configs: HashMap<String, RouteConfig>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or extends) the configuration for a pattern
    ///
    /// Registering the same pattern twice merges the maps; the later
    /// registration overrides keys it repeats.
    pub fn register(&mut self, pattern: &str, config: RouteConfig) {
        let key = canonical_pattern(pattern).into_owned();
        let entry = self.configs.entry(key).or_default();
        entry.params.extend(config.params);
        entry.search_params.extend(config.search_params);
    }

    pub fn get(&self, pattern: &str) -> Option<&RouteConfig> {
        self.configs.get(&*canonical_pattern(pattern))
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Schemas contributed by the routes matching `names[..depth]` exactly
    fn level<'a, S: AsRef<str>>(
        &'a self,
        tree: &'a RouteTree,
        names: &[S],
        specs: &[Cow<'_, SegmentSpec>],
        depth: usize,
        scope: SchemaScope,
    ) -> SchemaSet<'a> {
        let mut level = SchemaSet::new();
        for route in tree.matching_routes(&names[..depth], &specs[..depth]) {
            let Some(config) = self.configs.get(&route.pattern) else {
                continue;
            };
            for (key, spec) in scope.select(config) {
                level.entry(key.as_str()).or_insert(spec);
            }
        }
        level
    }

    /// Merge of every proper-prefix level, shorter first
    pub fn inherited_schemas<'a, S: AsRef<str>>(
        &'a self,
        tree: &'a RouteTree,
        names: &[S],
        specs: &[Cow<'_, SegmentSpec>],
        scope: SchemaScope,
    ) -> SchemaSet<'a> {
        let mut inherited = SchemaSet::new();
        for depth in 0..names.len() {
            inherited.extend(self.level(tree, names, specs, depth, scope));
        }
        inherited
    }

    /// Schemas registered on the exact route for `names`
    pub fn own_schemas<'a, S: AsRef<str>>(
        &'a self,
        tree: &'a RouteTree,
        names: &[S],
        specs: &[Cow<'_, SegmentSpec>],
        scope: SchemaScope,
    ) -> SchemaSet<'a> {
        self.level(tree, names, specs, names.len(), scope)
    }

    /// `{...inherited, ...own}`
    pub fn effective_schemas<'a, S: AsRef<str>>(
        &'a self,
        tree: &'a RouteTree,
        names: &[S],
        specs: &[Cow<'_, SegmentSpec>],
        scope: SchemaScope,
    ) -> SchemaSet<'a> {
        let mut effective = self.inherited_schemas(tree, names, specs, scope);
        effective.extend(self.own_schemas(tree, names, specs, scope));
        effective
    }
}
