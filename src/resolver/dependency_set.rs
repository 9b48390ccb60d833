//! Per-frame dependency accumulator.

use crate::registry::LinkType;

/// Ordered, duplicate-free dependency names collected by one resolution
/// frame, with the static and dynamic subsets split out.
///
/// Each frame owns its set. A child frame returns its set by value and the
/// parent [`merge`](Self::merge)s it before recording the child's own name,
/// so a parent's list reads "transitive dependencies first, then the direct
/// dependency that pulled them in".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    names: Vec<String>,
    static_libs: Vec<String>,
    dynamic_libs: Vec<String>,
}

impl DependencySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` and classify it by `link`.
    pub fn record(&mut self, name: &str, link: LinkType) {
        push_unique(&mut self.names, name);
        match link {
            LinkType::Static => push_unique(&mut self.static_libs, name),
            LinkType::Dynamic => push_unique(&mut self.dynamic_libs, name),
            LinkType::None => {}
        }
    }

    /// Append everything from a child's set, keeping first occurrences.
    pub fn merge(&mut self, other: DependencySet) {
        for name in other.names {
            push_unique(&mut self.names, &name);
        }
        for name in other.static_libs {
            push_unique(&mut self.static_libs, &name);
        }
        for name in other.dynamic_libs {
            push_unique(&mut self.dynamic_libs, &name);
        }
    }

    /// All names in insertion order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names linked statically.
    #[must_use]
    pub fn static_libs(&self) -> &[String] {
        &self.static_libs
    }

    /// Names linked dynamically.
    #[must_use]
    pub fn dynamic_libs(&self) -> &[String] {
        &self.dynamic_libs
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}
