//! Dependency graph model and validation
//!
//! Holds the package -> dependency-set mapping, checks that it is well formed
//! (no empty names, no dangling references, no cycles) and computes the
//! layered execution levels used to order jobs.
//!
//! Ties are always broken by lexicographic (byte-wise) name order, so every
//! operation here is deterministic regardless of input order.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::error::ValidationError;

/// Raw, unvalidated input: package name -> direct dependency names
pub type RawGraph = BTreeMap<String, Vec<String>>;

/// A single package and its direct dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    name: String,
    dependencies: BTreeSet<String>,
}

impl PackageNode {
    /// Package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct dependencies, in lexicographic order
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }
}

/// One layer of packages that can build in parallel
///
/// Every dependency of a package in this level lives in a strictly
/// earlier level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExecutionLevel {
    packages: Vec<String>,
}

impl ExecutionLevel {
    /// Package names in this level, lexicographically ordered
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Number of packages in this level
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the level is empty
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Dependency graph for packages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, PackageNode>,
}

/// Build and validate a graph from a raw mapping
pub fn build_graph(raw: &RawGraph) -> Result<DependencyGraph, ValidationError> {
    let mut graph = DependencyGraph::new();
    for (name, deps) in raw {
        graph.add_package(name, deps.iter().cloned());
    }
    graph.validate()?;
    Ok(graph)
}

/// Compute the execution levels of a graph
///
/// Fails with [`ValidationError::CycleDetected`] on a cyclic graph instead of
/// assuming validation already ran.
pub fn topological_levels(graph: &DependencyGraph) -> Result<Vec<ExecutionLevel>, ValidationError> {
    graph.topological_levels()
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package to the graph, replacing any previous entry
    ///
    /// No checks happen here; call [`DependencyGraph::validate`] afterwards.
    pub fn add_package<I, S>(&mut self, name: &str, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let node = PackageNode {
            name: name.to_string(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        };
        self.nodes.insert(name.to_string(), node);
    }

    /// Look up a package by name
    pub fn get(&self, name: &str) -> Option<&PackageNode> {
        self.nodes.get(name)
    }

    /// Whether the graph contains a package
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// All packages in lexicographic order
    pub fn packages(&self) -> impl Iterator<Item = &PackageNode> {
        self.nodes.values()
    }

    /// Number of packages
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of dependency edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.dependencies.len()).sum()
    }

    /// Check referential integrity and acyclicity
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.nodes.keys().any(|name| name.trim().is_empty()) {
            return Err(ValidationError::EmptyPackageName);
        }

        for node in self.nodes.values() {
            if let Some(missing) = node.dependencies.iter().find(|d| !self.contains(d)) {
                return Err(ValidationError::UnknownDependency {
                    node: node.name.clone(),
                    missing: missing.clone(),
                });
            }
        }

        self.assign_levels().map(|_| ())
    }

    /// Compute layered (longest-path) execution levels
    ///
    /// A package with no dependencies sits in level 0; every other package
    /// sits one level above its deepest direct dependency.
    pub fn topological_levels(&self) -> Result<Vec<ExecutionLevel>, ValidationError> {
        let assigned = self.assign_levels()?;

        let mut levels: Vec<ExecutionLevel> = Vec::new();
        // BTreeMap iteration keeps each level lexicographically ordered
        for name in self.nodes.keys() {
            let level = assigned[name.as_str()];
            while levels.len() <= level {
                levels.push(ExecutionLevel {
                    packages: Vec::new(),
                });
            }
            levels[level].packages.push(name.clone());
        }

        tracing::debug!(
            "Computed {} execution levels for {} packages",
            levels.len(),
            self.len()
        );
        Ok(levels)
    }

    /// Packages nothing else depends on
    pub fn terminal_packages(&self) -> Vec<&str> {
        let depended_on: HashSet<&str> = self
            .nodes
            .values()
            .flat_map(|n| n.dependencies.iter().map(String::as_str))
            .collect();

        self.nodes
            .keys()
            .map(String::as_str)
            .filter(|name| !depended_on.contains(name))
            .collect()
    }

    /// Drop direct edges already implied by another direct dependency
    ///
    /// For `a -> {b, c}` with `b` reaching `c`, the edge `a -> c` is removed.
    /// Reachability, and therefore the execution levels, are unchanged.
    #[must_use]
    pub fn transitive_reduction(&self) -> Self {
        let reach: HashMap<&str, HashSet<&str>> = self
            .nodes
            .keys()
            .map(|name| (name.as_str(), self.reachable_from(name)))
            .collect();

        let mut pruned = Self::new();
        for node in self.nodes.values() {
            let kept = node.dependencies.iter().filter(|dep| {
                !node.dependencies.iter().any(|other| {
                    other != *dep
                        && reach
                            .get(other.as_str())
                            .is_some_and(|r| r.contains(dep.as_str()))
                })
            });
            pruned.add_package(&node.name, kept.cloned());
        }

        tracing::debug!(
            "Transitive reduction kept {} of {} edges",
            pruned.edge_count(),
            self.edge_count()
        );
        pruned
    }

    /// Everything reachable through one or more dependency edges
    fn reachable_from(&self, start: &str) -> HashSet<&str> {
        let mut seen = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if let Some(node) = self.nodes.get(current) {
                for dep in &node.dependencies {
                    if seen.insert(dep.as_str()) {
                        queue.push_back(dep.as_str());
                    }
                }
            }
        }

        seen
    }

    /// Assign each package its level, detecting cycles on the way
    fn assign_levels(&self) -> Result<HashMap<&str, usize>, ValidationError> {
        let mut levels = HashMap::with_capacity(self.nodes.len());
        let mut in_progress = HashSet::new();
        let mut path = Vec::new();

        for name in self.nodes.keys() {
            self.visit(name, &mut levels, &mut in_progress, &mut path)?;
        }

        Ok(levels)
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        levels: &mut HashMap<&'a str, usize>,
        in_progress: &mut HashSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Result<usize, ValidationError> {
        if let Some(&level) = levels.get(name) {
            return Ok(level);
        }

        if in_progress.contains(name) {
            let start = path.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|n| (*n).to_string()).collect();
            cycle.push(name.to_string());
            return Err(ValidationError::CycleDetected { path: cycle });
        }

        let Some(node) = self.nodes.get(name) else {
            // Callers only reach here through a dependency edge
            let parent = path.last().copied().unwrap_or(name);
            return Err(ValidationError::UnknownDependency {
                node: parent.to_string(),
                missing: name.to_string(),
            });
        };

        in_progress.insert(name);
        path.push(name);

        let mut level = 0;
        for dep in &node.dependencies {
            let dep_level = self.visit(dep, levels, in_progress, path)?;
            level = level.max(dep_level + 1);
        }

        path.pop();
        in_progress.remove(name);
        levels.insert(name, level);

        Ok(level)
    }
}

impl From<&DependencyGraph> for RawGraph {
    fn from(graph: &DependencyGraph) -> Self {
        graph
            .nodes
            .values()
            .map(|n| (n.name.clone(), n.dependencies.iter().cloned().collect()))
            .collect()
    }
}
