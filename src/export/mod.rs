//! Report rendering for the assembled usage map.
//!
//! Markdown and JSON renderers consume the same grouping logic: each
//! dependency is bucketed by the configured root whose import prefix its
//! logical path starts with, and dependencies matching no root land in an
//! `other` bucket.

pub mod json;
pub mod markdown;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::analysis::DependencyInfo;
use crate::config::ComponentPathConfig;

/// A dependency as it appears in a grouped report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GroupedDependency {
    pub path: String,
    pub file: String,
    pub imports: Vec<String>,
}

impl From<&DependencyInfo> for GroupedDependency {
    fn from(dep: &DependencyInfo) -> Self {
        Self {
            path: dep.path.clone(),
            file: dep.file.clone(),
            imports: dep.imports.clone(),
        }
    }
}

/// Dependency buckets in config order, `other` last. Serialized as a JSON
/// object whose key order follows the configuration, which is why this is a
/// vector of pairs rather than a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGroups(pub Vec<(String, Vec<GroupedDependency>)>);

impl DependencyGroups {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GroupedDependency])> {
        self.0
            .iter()
            .map(|(name, deps)| (name.as_str(), deps.as_slice()))
    }
}

impl Serialize for DependencyGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, deps) in &self.0 {
            map.serialize_entry(name, deps)?;
        }
        map.end()
    }
}

/// Buckets dependencies by configured path. A dependency whose logical path
/// starts with several prefixes appears in every matching bucket; empty
/// buckets are omitted.
pub fn group_dependencies(
    dependencies: &[DependencyInfo],
    component_paths: &[ComponentPathConfig],
) -> DependencyGroups {
    let mut groups = Vec::new();

    for config in component_paths {
        let matched: Vec<GroupedDependency> = dependencies
            .iter()
            .filter(|dep| dep.path.starts_with(&config.import_prefix))
            .map(GroupedDependency::from)
            .collect();
        if !matched.is_empty() {
            groups.push((config.base_name().to_string(), matched));
        }
    }

    let unmatched: Vec<GroupedDependency> = dependencies
        .iter()
        .filter(|dep| {
            !component_paths
                .iter()
                .any(|config| dep.path.starts_with(&config.import_prefix))
        })
        .map(GroupedDependency::from)
        .collect();
    if !unmatched.is_empty() {
        groups.push(("other".to_string(), unmatched));
    }

    DependencyGroups(groups)
}
