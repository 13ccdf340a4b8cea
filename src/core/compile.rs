//! Compile pipeline
//!
//! validate -> level -> render. Each call is a pure function
//! of its inputs and aborts on the first error; there is no partial output.

use crate::core::graph::{build_graph, RawGraph};
use crate::core::render::{render, WorkflowDocument};
use crate::core::template::TemplateConfig;
use crate::error::DagciError;

/// Knobs that change the compiled graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Drop `requires` edges implied by other dependencies
    pub prune: bool,
}

/// Compile a raw graph into a workflow document
pub fn compile(
    raw: &RawGraph,
    template: &TemplateConfig,
    options: CompileOptions,
) -> Result<WorkflowDocument, DagciError> {
    template.validate()?;

    let mut graph = build_graph(raw)?;
    tracing::info!(
        "Validated graph with {} packages and {} edges",
        graph.len(),
        graph.edge_count()
    );

    if options.prune {
        graph = graph.transitive_reduction();
    }

    let levels = graph.topological_levels()?;
    for (i, level) in levels.iter().enumerate() {
        tracing::debug!("Level {}: {}", i + 1, level.packages().join(", "));
    }

    Ok(render(&graph, &levels, template)?)
}
