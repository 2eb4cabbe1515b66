//! Foreign-key dependency ordering.
//!
//! Tables are sorted so that every table comes after the tables it
//! references. Only references to tables in the input set form edges, and
//! self-references are ignored. What happens to tables caught in a cycle is
//! chosen per call with [`OrderPolicy`].

use std::collections::{HashMap, VecDeque};

use tracing::warn;

use crate::error::{Result, SchemaError};
use crate::normalize::{CanonicalSchema, CanonicalTable};
use crate::schema::Table;

/// Anything that has a name and references other named nodes.
pub trait DependencyNode {
    /// The node's name.
    fn node_name(&self) -> &str;

    /// Names of the nodes this one depends on, duplicates allowed.
    fn dependencies(&self) -> Vec<&str>;
}

impl<N: DependencyNode> DependencyNode for &N {
    fn node_name(&self) -> &str {
        (**self).node_name()
    }

    fn dependencies(&self) -> Vec<&str> {
        (**self).dependencies()
    }
}

impl DependencyNode for Table {
    fn node_name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> Vec<&str> {
        self.referenced_tables().collect()
    }
}

impl DependencyNode for CanonicalTable {
    fn node_name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> Vec<&str> {
        self.foreign_keys
            .iter()
            .map(|fk| fk.ref_table.as_str())
            .collect()
    }
}

/// How tables that cannot be ordered are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderPolicy {
    /// Append them at the end in input order.
    #[default]
    Tolerant,
    /// Fail with [`SchemaError::CircularDependency`].
    Strict,
}

/// Kahn's algorithm. Returns the ordered names and the names that never
/// reached in-degree zero, both in input order of first appearance.
fn kahn<'a, N: DependencyNode>(nodes: &'a [N]) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut names: Vec<&str> = Vec::new();
    for node in nodes {
        if !names.contains(&node.node_name()) {
            names.push(node.node_name());
        }
    }

    let mut in_degree: HashMap<&str, usize> = names.iter().map(|n| (*n, 0)).collect();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();

    for node in nodes {
        let name = node.node_name();
        for dep in node.dependencies() {
            if dep == name || !in_degree.contains_key(dep) {
                continue;
            }
            let edges = dependents.entry(dep).or_default();
            if edges.contains(&name) {
                continue;
            }
            edges.push(name);
            if let Some(deg) = in_degree.get_mut(name) {
                *deg += 1;
            }
        }
    }

    let mut queue: VecDeque<&str> = names
        .iter()
        .copied()
        .filter(|n| in_degree.get(n) == Some(&0))
        .collect();
    let mut result = Vec::with_capacity(names.len());

    while let Some(name) = queue.pop_front() {
        result.push(name);

        if let Some(deps) = dependents.get(name) {
            for dep in deps {
                if let Some(deg) = in_degree.get_mut(*dep) {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(*dep);
                    }
                }
            }
        }
    }

    let leftover = names
        .into_iter()
        .filter(|n| !result.contains(n))
        .collect();
    (result, leftover)
}

/// Orders node names so that each comes after the nodes it depends on.
///
/// Every distinct name appears exactly once.
///
/// # Errors
///
/// Under [`OrderPolicy::Strict`], returns
/// [`SchemaError::CircularDependency`] listing the nodes that could not be
/// ordered.
pub fn dependency_order<N: DependencyNode>(
    nodes: &[N],
    policy: OrderPolicy,
) -> Result<Vec<String>> {
    let (mut ordered, leftover) = kahn(nodes);

    if !leftover.is_empty() {
        match policy {
            OrderPolicy::Strict => {
                return Err(SchemaError::CircularDependency {
                    tables: leftover.into_iter().map(String::from).collect(),
                });
            }
            OrderPolicy::Tolerant => {
                warn!(
                    tables = %leftover.join(", "),
                    "circular foreign keys, appending tables in input order"
                );
                ordered.extend(leftover);
            }
        }
    }

    Ok(ordered.into_iter().map(String::from).collect())
}

/// Tolerant dependency order of parsed tables. Never fails.
#[must_use]
pub fn tables_dependency_order(tables: &[Table]) -> Vec<String> {
    let (mut ordered, leftover) = kahn(tables);
    if !leftover.is_empty() {
        warn!(
            tables = %leftover.join(", "),
            "circular foreign keys, appending tables in input order"
        );
    }
    ordered.extend(leftover);
    ordered.into_iter().map(String::from).collect()
}

impl CanonicalSchema {
    /// Dependency order of the schema's tables under `policy`.
    ///
    /// # Errors
    ///
    /// See [`dependency_order`].
    pub fn dependency_order(&self, policy: OrderPolicy) -> Result<Vec<String>> {
        let tables: Vec<&CanonicalTable> = self.tables.values().collect();
        dependency_order(&tables, policy)
    }
}
