//! Dependency tree visualization
//!
//! Renders a validated graph as an indented text tree rooted at the
//! terminal packages, or exports it in DOT graph format.

use std::collections::{BTreeSet, HashSet};
use std::fmt::Write;

use crate::core::graph::DependencyGraph;

/// Format the graph, or the part reachable from `package`, as a tree
///
/// Returns `None` when `package` is not in the graph. Subtrees already
/// printed once are marked with `(*)` instead of being repeated.
pub fn format_tree(graph: &DependencyGraph, package: Option<&str>) -> Option<String> {
    if graph.is_empty() {
        return Some("No packages in graph".to_string());
    }

    let mut output = String::new();
    let roots: Vec<&str> = match package {
        Some(name) => {
            graph.get(name)?;
            let _ = writeln!(output, "Dependencies for '{name}':");
            vec![name]
        }
        None => {
            output.push_str("Dependency Tree:\n");
            graph.terminal_packages()
        }
    };

    let mut expanded = HashSet::new();
    for (i, root) in roots.iter().enumerate() {
        let is_last = i == roots.len() - 1;
        format_node(graph, &mut output, root, "", is_last, &mut expanded);
    }

    Some(output)
}

fn format_node<'a>(
    graph: &'a DependencyGraph,
    output: &mut String,
    node: &'a str,
    prefix: &str,
    is_last: bool,
    expanded: &mut HashSet<&'a str>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let Some(package) = graph.get(node) else {
        return;
    };

    let deps = package.dependencies();
    if !deps.is_empty() && !expanded.insert(node) {
        let _ = writeln!(output, "{prefix}{connector}{node} (*)");
        return;
    }
    let _ = writeln!(output, "{prefix}{connector}{node}");

    let child_prefix = if is_last {
        format!("{prefix}    ")
    } else {
        format!("{prefix}│   ")
    };

    for (i, dep) in deps.iter().enumerate() {
        let is_last_dep = i == deps.len() - 1;
        format_node(graph, output, dep, &child_prefix, is_last_dep, expanded);
    }
}

/// Format the graph, or the part reachable from `package`, as DOT
///
/// Edges point from a package to its dependency. Returns `None` when
/// `package` is not in the graph.
pub fn format_dot(graph: &DependencyGraph, package: Option<&str>) -> Option<String> {
    let (title, included): (String, BTreeSet<&str>) = match package {
        Some(name) => {
            graph.get(name)?;
            let mut reachable = BTreeSet::new();
            collect_reachable(graph, name, &mut reachable);
            (format!("\"{name}\""), reachable)
        }
        None => (
            "dependencies".to_string(),
            graph.packages().map(|n| n.name()).collect(),
        ),
    };

    let mut output = String::new();
    let _ = writeln!(output, "digraph {title} {{");
    output.push_str("    rankdir=TB;\n");
    output.push_str("    node [shape=box];\n");
    output.push('\n');

    for pkg in &included {
        let _ = writeln!(output, "    \"{pkg}\";");
    }
    output.push('\n');

    for from in &included {
        if let Some(node) = graph.get(from) {
            for dep in node.dependencies() {
                let _ = writeln!(output, "    \"{from}\" -> \"{dep}\";");
            }
        }
    }

    output.push_str("}\n");
    Some(output)
}

fn collect_reachable<'a>(
    graph: &'a DependencyGraph,
    package: &'a str,
    reachable: &mut BTreeSet<&'a str>,
) {
    if !reachable.insert(package) {
        return;
    }

    if let Some(node) = graph.get(package) {
        for dep in node.dependencies() {
            collect_reachable(graph, dep, reachable);
        }
    }
}
