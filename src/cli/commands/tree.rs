//! CLI command for displaying dependency tree
//!
//! Implements the `dagci tree` command.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::commands::load_graph;
use crate::core::graph::build_graph;
use crate::core::tree;

/// Execute the tree command
pub async fn execute(graph: Option<&Path>, package: Option<String>, dot: bool) -> Result<()> {
    let raw = load_graph(graph)?;
    let graph = build_graph(&raw).context("Invalid dependency graph")?;

    let rendered = if dot {
        tree::format_dot(&graph, package.as_deref())
    } else {
        tree::format_tree(&graph, package.as_deref())
    };

    let Some(output) = rendered else {
        bail!(
            "Package '{}' not found in dependency graph",
            package.unwrap_or_default()
        );
    };
    println!("{}", output.trim_end());
    Ok(())
}
