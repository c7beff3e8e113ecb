// File: src/config.rs
// Purpose: Route manifest parsing from routes.toml

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::navigator::{Navigator, RouteSet, RouteSetBuilder};
use crate::render::MissingParamPolicy;
use crate::schema::{Constraint, RouteConfig, ValueSpec};

/// Route manifest
///
/// ```toml
/// [routing]
/// missing_params = "error"
///
/// [[routes]]
/// pattern = "/users/[id]"
/// params = { id = "int" }
/// search_params = { sort = { one_of = ["asc", "desc"] } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoutesConfig {
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Declared routes, in declaration order
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// Rendering options
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoutingConfig {
    /// Behaviour for missing dynamic / catch-all parameters (default: "preserve")
    #[serde(default)]
    pub missing_params: MissingParamPolicy,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    pub pattern: String,

    #[serde(default)]
    pub params: BTreeMap<String, ValueSpecConfig>,

    #[serde(default)]
    pub search_params: BTreeMap<String, ValueSpecConfig>,
}

/// A value spec as written in the manifest
///
/// Either a constraint name (`"int"`, `"slug"`, `"passthrough"`, ...) or a
/// table `{ pattern = "..." }` / `{ one_of = [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSpecConfig {
    Named(String),
    Pattern { pattern: String },
    OneOf { one_of: Vec<String> },
}

impl ValueSpecConfig {
    pub fn to_value_spec(&self) -> Result<ValueSpec> {
        match self {
            ValueSpecConfig::Named(name) if name == "passthrough" => Ok(ValueSpec::Passthrough),
            ValueSpecConfig::Named(name) => Constraint::from_name(name)
                .map(ValueSpec::from)
                .ok_or_else(|| anyhow!("Unknown constraint: {}", name)),
            ValueSpecConfig::Pattern { pattern } => Constraint::pattern(pattern)
                .map(ValueSpec::from)
                .with_context(|| format!("Invalid pattern constraint: {}", pattern)),
            ValueSpecConfig::OneOf { one_of } => Ok(Constraint::one_of(one_of.iter().cloned()).into()),
        }
    }
}

impl RouteEntry {
    fn to_route_config(&self) -> Result<RouteConfig> {
        let mut config = RouteConfig::new();
        for (name, spec) in &self.params {
            let spec = spec
                .to_value_spec()
                .with_context(|| format!("Route {}: param \"{}\"", self.pattern, name))?;
            config = config.param(name.clone(), spec);
        }
        for (name, spec) in &self.search_params {
            let spec = spec
                .to_value_spec()
                .with_context(|| format!("Route {}: search param \"{}\"", self.pattern, name))?;
            config = config.search_param(name.clone(), spec);
        }
        Ok(config)
    }
}

impl RoutesConfig {
    /// Load the manifest from a TOML file
    ///
    /// A missing or empty file yields the default (empty) manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read routes file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse routes file: {:?}", path))
    }

    /// Load the manifest from the default path (./routes.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("routes.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: RoutesConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Builder holding every declared route and its schemas
    ///
    /// Code-registered schemas can still be added before building.
    pub fn into_builder(self) -> Result<RouteSetBuilder> {
        let mut builder = RouteSet::builder().missing_params(self.routing.missing_params);
        for entry in &self.routes {
            builder = builder.configure(&entry.pattern, entry.to_route_config()?);
        }
        Ok(builder)
    }

    pub fn into_navigator(self) -> Result<Navigator> {
        Ok(self.into_builder()?.navigator())
    }
}
