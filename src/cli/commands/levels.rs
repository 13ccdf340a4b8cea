//! Levels command implementation
//!
//! Implements `dagci levels` to print the build order one level per line.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::commands::load_graph;
use crate::cli::output::OutputConfig;
use crate::core::graph::{build_graph, ExecutionLevel};

/// Execute the levels command
pub async fn execute(graph: Option<&Path>, output: &OutputConfig) -> Result<()> {
    let raw = load_graph(graph)?;
    let graph = build_graph(&raw).context("Invalid dependency graph")?;
    let levels = graph.topological_levels()?;

    if output.json {
        output.json_value(&serde_json::to_value(&levels)?);
    } else {
        print!("{}", format_levels(&levels));
    }

    Ok(())
}

/// One `Level N: a, b` line per level, numbered from 1
pub fn format_levels(levels: &[ExecutionLevel]) -> String {
    levels
        .iter()
        .enumerate()
        .map(|(i, level)| format!("Level {}: {}\n", i + 1, level.packages().join(", ")))
        .collect()
}
