//! Check command implementation
//!
//! Implements `dagci check` to validate the graph and template without
//! writing a configuration.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::commands::{load_graph, load_template};
use crate::cli::output::OutputConfig;
use crate::core::compile::{compile, CompileOptions};
use crate::infra::dirs::DagciDirs;

/// Execute the check command
pub async fn execute(
    graph: Option<&Path>,
    template: Option<&Path>,
    output: &OutputConfig,
) -> Result<()> {
    let raw = load_graph(graph)?;
    let template = load_template(template, &DagciDirs::new())?;

    // Rendering catches job-name collisions that graph validation alone cannot
    let doc = compile(&raw, &template, CompileOptions::default())
        .context("Check failed")?;

    if output.json {
        output.json_value(&serde_json::json!({
            "valid": true,
            "packages": raw.len(),
            "jobs": doc.len(),
        }));
        return Ok(());
    }

    output.success("Template is valid");
    output.success(&format!(
        "Dependency graph is valid ({} packages)",
        raw.len()
    ));
    if doc.is_empty() {
        output.warning("Graph is empty; the workflow would have no jobs");
    } else {
        output.success(&format!("Workflow '{}' has {} jobs", doc.name, doc.len()));
    }

    Ok(())
}
