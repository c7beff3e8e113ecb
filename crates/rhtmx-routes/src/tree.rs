//! Route tree index
//!
//! Answers "which child segment names exist under this prefix" and "what
//! bracket form did child C have under prefix P" for the declared pattern set.
//!
//! Prefixes are ordered lists of bracket-stripped segment *names*. A declared
//! pattern matches a prefix positionally: static segments need literal
//! equality, bracket segments accept any name.
//!
//! Sibling declarations that resolve to the same name with different bracket
//! kinds (`/blog/[slug]` then `/blog/[...slug]`) are resolved by declaration
//! order: the first declared pattern wins.

use std::borrow::Cow;

use crate::path::canonical_pattern;
use crate::segment::{parse_pattern, SegmentSpec};

/// One declared route pattern with its classified segments
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredRoute {
    /// Canonical pattern text, e.g. `/users/[id]`
    pub pattern: String,
    pub segments: Vec<SegmentSpec>,
}

impl DeclaredRoute {
    pub fn new(pattern: &str) -> Self {
        let pattern = canonical_pattern(pattern).into_owned();
        let segments = parse_pattern(&pattern);
        Self { pattern, segments }
    }

    /// Whether the first `names.len()` segments accept `names` positionally
    pub fn matches_prefix<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.segments.len() >= names.len()
            && self
                .segments
                .iter()
                .zip(names)
                .all(|(seg, name)| seg.accepts(name.as_ref()))
    }

    /// Whether this pattern has exactly `names.len()` segments accepting `names`
    pub fn matches_exactly<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.segments.len() == names.len() && self.matches_prefix(names)
    }

    /// Whether this pattern's segments are literally `specs` (same raw text)
    pub fn is_identical_to(&self, specs: &[Cow<'_, SegmentSpec>]) -> bool {
        self.segments.len() == specs.len()
            && self
                .segments
                .iter()
                .zip(specs)
                .all(|(seg, spec)| seg.raw == spec.raw)
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.name.as_str())
    }
}

/// Immutable index over the declared route patterns, in declaration order
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    routes: Vec<DeclaredRoute>,
}

impl RouteTree {
    /// Builds the index from patterns in declaration order
    ///
    /// Duplicate patterns (after canonicalisation) keep their first position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::RouteTree;
    ///
    /// let tree = RouteTree::new(["/", "/blog/[slug]", "/blog/new", "/docs/[...path]"]);
    /// assert_eq!(tree.child_segments::<&str>(&[]), vec!["blog", "docs"]);
    /// assert_eq!(tree.child_segments(&["blog"]), vec!["slug", "new"]);
    /// ```
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::default();
        for pattern in patterns {
            tree.insert(pattern.as_ref());
        }
        tree
    }

    /// Declares one more pattern; returns false if it was already declared
    pub(crate) fn insert(&mut self, pattern: &str) -> bool {
        let route = DeclaredRoute::new(pattern);
        if self.contains(&route.pattern) {
            return false;
        }

        self.warn_on_sibling_conflicts(&route);
        tracing::trace!(pattern = %route.pattern, "declared route");
        self.routes.push(route);
        true
    }

    fn warn_on_sibling_conflicts(&self, route: &DeclaredRoute) {
        let names: Vec<&str> = route.names().collect();
        for (depth, seg) in route.segments.iter().enumerate() {
            let prefix = &names[..depth];
            if let Some(existing) = self.original_segment(prefix, &seg.name) {
                if existing.raw != seg.raw {
                    tracing::warn!(
                        pattern = %route.pattern,
                        segment = %seg.raw,
                        kept = %existing.raw,
                        "conflicting sibling segment; first declared wins"
                    );
                }
            }
        }
    }

    /// Declared routes in declaration order
    pub fn routes(&self) -> &[DeclaredRoute] {
        &self.routes
    }

    /// Whether `pattern` (in any spelling) has been declared
    pub fn contains(&self, pattern: &str) -> bool {
        let pattern = canonical_pattern(pattern);
        self.routes.iter().any(|r| r.pattern == pattern)
    }

    /// Names of the segments that can follow `prefix`, in first-seen order
    pub fn child_segments<S: AsRef<str>>(&self, prefix: &[S]) -> Vec<&str> {
        let mut children: Vec<&str> = Vec::new();
        for route in self.routes.iter().filter(|r| r.segments.len() > prefix.len()) {
            if !route.matches_prefix(prefix) {
                continue;
            }
            let name = route.segments[prefix.len()].name.as_str();
            if !children.contains(&name) {
                children.push(name);
            }
        }
        children
    }

    /// The declared segment for `child` directly under `prefix`
    ///
    /// Recovers the bracket form (and so the kind) of a navigated name.
    /// First declared pattern wins on conflicts.
    pub fn original_segment<S: AsRef<str>>(&self, prefix: &[S], child: &str) -> Option<&SegmentSpec> {
        self.routes
            .iter()
            .filter(|r| r.segments.len() > prefix.len() && r.matches_prefix(prefix))
            .map(|r| &r.segments[prefix.len()])
            .find(|seg| seg.name == child)
    }

    /// Classifies a navigated name path into segment specs
    ///
    /// Names with no declared counterpart become static literals.
    pub fn resolve_segments<'a, S: AsRef<str>>(&'a self, names: &[S]) -> Vec<Cow<'a, SegmentSpec>> {
        names
            .iter()
            .enumerate()
            .map(|(depth, name)| {
                let name = name.as_ref();
                match self.original_segment(&names[..depth], name) {
                    Some(seg) => Cow::Borrowed(seg),
                    None => {
                        tracing::warn!(segment = %name, depth, "undeclared segment rendered as literal");
                        Cow::Owned(SegmentSpec::literal(name))
                    }
                }
            })
            .collect()
    }

    /// Declared routes matching `names` at full length, best match first
    ///
    /// The route literally identical to `specs` (if any) leads; the rest
    /// follow in declaration order.
    pub fn matching_routes<'a, S: AsRef<str>>(
        &'a self,
        names: &[S],
        specs: &[Cow<'_, SegmentSpec>],
    ) -> Vec<&'a DeclaredRoute> {
        let mut matches: Vec<&DeclaredRoute> = self
            .routes
            .iter()
            .filter(|r| r.matches_exactly(names))
            .collect();
        if let Some(pos) = matches.iter().position(|r| r.is_identical_to(specs)) {
            let identical = matches.remove(pos);
            matches.insert(0, identical);
        }
        matches
    }

    /// The pattern a navigated name path resolves to
    pub fn find_matching_route<S: AsRef<str>>(&self, names: &[S]) -> Option<&DeclaredRoute> {
        let specs = self.resolve_segments(names);
        self.matching_routes(names, &specs).into_iter().next()
    }
}
