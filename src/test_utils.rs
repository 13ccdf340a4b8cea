//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    use crate::core::graph::RawGraph;

    /// Generate a valid package name (lowercase alphanumeric with hyphens)
    ///
    /// These names are already in normalized job-name form, so distinct
    /// names never collide.
    pub fn package_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,12}"
    }

    /// Generate a package name with mixed case and dots
    pub fn mixed_case_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9.]{0,8}"
    }

    /// Generate an acyclic raw graph of up to 12 packages
    ///
    /// Names are shuffled before edges are drawn so dependencies are not
    /// biased towards lexicographically smaller names.
    pub fn acyclic_graph() -> impl Strategy<Value = RawGraph> {
        prop::collection::btree_set(package_name(), 0..12)
            .prop_map(|names| names.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
            .prop_flat_map(|names| {
                let n = names.len();
                (
                    Just(names),
                    prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
                )
            })
            .prop_map(|(names, edges)| {
                names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        // Only point at earlier names: the shuffled order is a topological order
                        let deps = (0..i)
                            .filter(|&j| edges[i][j])
                            .map(|j| names[j].clone())
                            .collect();
                        (name.clone(), deps)
                    })
                    .collect()
            })
    }

    /// Generate a raw graph guaranteed to contain at least one cycle
    ///
    /// The packages form a ring, plus some extra random edges.
    pub fn cyclic_graph() -> impl Strategy<Value = RawGraph> {
        prop::collection::btree_set(package_name(), 1..8)
            .prop_map(|names| names.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
            .prop_flat_map(|names| {
                let n = names.len();
                (
                    Just(names),
                    prop::collection::vec((0..n, 0..n), 0..n * 2),
                )
            })
            .prop_map(|(names, extra)| {
                let n = names.len();
                let mut raw: RawGraph = names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), vec![names[(i + 1) % n].clone()]))
                    .collect();
                for (from, to) in extra {
                    if let Some(deps) = raw.get_mut(&names[from]) {
                        deps.push(names[to].clone());
                    }
                }
                raw
            })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_package_name_generator(name in package_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn test_acyclic_graph_is_closed(graph in acyclic_graph()) {
            for deps in graph.values() {
                for dep in deps {
                    prop_assert!(graph.contains_key(dep));
                }
            }
        }

        #[test]
        fn test_cyclic_graph_is_closed(graph in cyclic_graph()) {
            prop_assert!(!graph.is_empty());
            for deps in graph.values() {
                prop_assert!(!deps.is_empty());
                for dep in deps {
                    prop_assert!(graph.contains_key(dep));
                }
            }
        }
    }
}
