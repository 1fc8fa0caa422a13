//! Dependency graph for package configure ordering.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{ProbeError, Result};

/// Dependency relationships between packages, keyed by lower-case name.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Package name to its direct dependencies.
    dependencies: BTreeMap<String, BTreeSet<String>>,
    /// Package name to packages that depend on it.
    dependents: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Create a new dependency graph builder.
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::new()
    }

    /// Direct dependencies of a package.
    pub fn dependencies_of(&self, package: &str) -> Option<&BTreeSet<String>> {
        self.dependencies.get(package)
    }

    /// Packages that depend directly on the given one.
    pub fn dependents_of(&self, package: &str) -> Option<&BTreeSet<String>> {
        self.dependents.get(package)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.dependencies.contains_key(package)
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Packages in configure order (dependencies before dependents).
    ///
    /// Ties are broken by name so the order is stable across runs.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        let mut in_degree: BTreeMap<&str, usize> = self
            .dependencies
            .iter()
            .map(|(name, deps)| (name.as_str(), deps.len()))
            .collect();

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(name, _)| *name)
            .collect();

        let mut result = Vec::with_capacity(self.dependencies.len());

        while let Some(name) = queue.pop_front() {
            result.push(name.to_string());

            if let Some(dependents) = self.dependents.get(name) {
                for dependent in dependents {
                    if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(dependent.as_str());
                        }
                    }
                }
            }
        }

        if result.len() != self.dependencies.len() {
            let cycle = self.find_cycle().unwrap_or_else(|| {
                in_degree
                    .iter()
                    .filter(|(_, &d)| d > 0)
                    .map(|(name, _)| name.to_string())
                    .collect()
            });
            return Err(ProbeError::CircularDependency {
                cycle: cycle.join(" -> "),
            });
        }

        Ok(result)
    }

    /// Find a cycle in the graph, returning the path if one exists.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Unvisited,
            Visiting,
            Visited,
        }

        fn dfs<'a>(
            node: &'a str,
            graph: &'a DependencyGraph,
            state: &mut BTreeMap<&'a str, State>,
            path: &mut Vec<String>,
        ) -> Option<Vec<String>> {
            state.insert(node, State::Visiting);
            path.push(node.to_string());

            if let Some(deps) = graph.dependencies.get(node) {
                for dep in deps {
                    match state.get(dep.as_str()) {
                        Some(State::Visiting) => {
                            let start = path.iter().position(|s| s == dep).unwrap_or(0);
                            let mut cycle = path[start..].to_vec();
                            cycle.push(dep.clone());
                            return Some(cycle);
                        }
                        Some(State::Unvisited) | None => {
                            if let Some(cycle) = dfs(dep, graph, state, path) {
                                return Some(cycle);
                            }
                        }
                        Some(State::Visited) => {}
                    }
                }
            }

            path.pop();
            state.insert(node, State::Visited);
            None
        }

        let mut state: BTreeMap<&str, State> = self
            .dependencies
            .keys()
            .map(|s| (s.as_str(), State::Unvisited))
            .collect();
        let mut path = Vec::new();

        for name in self.dependencies.keys() {
            if state.get(name.as_str()) == Some(&State::Unvisited) {
                if let Some(cycle) = dfs(name, self, &mut state, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }
}

/// Builder for constructing a [`DependencyGraph`].
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package with its dependencies.
    pub fn add_package(mut self, name: impl Into<String>, depends_on: &[String]) -> Self {
        self.dependencies
            .entry(name.into())
            .or_default()
            .extend(depends_on.iter().cloned());
        self
    }

    /// Build the graph.
    ///
    /// Fails if any dependency names a package that was never added.
    pub fn build(self) -> Result<DependencyGraph> {
        let mut dependents: BTreeMap<String, BTreeSet<String>> = self
            .dependencies
            .keys()
            .map(|name| (name.clone(), BTreeSet::new()))
            .collect();

        for (name, deps) in &self.dependencies {
            for dep in deps {
                match dependents.get_mut(dep) {
                    Some(set) => {
                        set.insert(name.clone());
                    }
                    None => {
                        return Err(ProbeError::DependencyUnresolved {
                            package: name.clone(),
                            dependency: dep.clone(),
                            message: "package is not part of this run".to_string(),
                        })
                    }
                }
            }
        }

        Ok(DependencyGraph {
            dependencies: self.dependencies,
            dependents,
        })
    }
}
