//! Generate command implementation
//!
//! Implements `dagci generate`: compile the graph and write the workflow
//! configuration to a file or stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::commands::{load_graph, load_template};
use crate::cli::output::OutputConfig;
use crate::core::compile::{compile, CompileOptions};
use crate::core::pipeline::{serialize, OutputFormat};
use crate::infra::dirs::DagciDirs;
use crate::infra::filesystem;

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Graph file, demo graph when `None`
    pub graph: Option<PathBuf>,
    /// Explicit template file
    pub template: Option<PathBuf>,
    /// Destination, `-` for stdout
    pub output: PathBuf,
    /// Explicit output format
    pub format: Option<OutputFormat>,
    /// Apply transitive reduction before rendering
    pub prune: bool,
}

impl GenerateOptions {
    /// Whether the configuration goes to stdout
    pub fn to_stdout(&self) -> bool {
        self.output == Path::new("-")
    }

    /// The format to write, explicit or inferred from the destination
    pub fn resolved_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| OutputFormat::from_path(&self.output))
    }
}

/// Execute the generate command
pub async fn execute(options: GenerateOptions, output: &OutputConfig) -> Result<()> {
    let raw = load_graph(options.graph.as_deref())?;
    let template = load_template(options.template.as_deref(), &DagciDirs::new())?;

    let doc = compile(
        &raw,
        &template,
        CompileOptions {
            prune: options.prune,
        },
    )
    .context("Failed to compile workflow")?;

    if doc.is_empty() {
        tracing::warn!("Dependency graph is empty; workflow '{}' has no jobs", doc.name);
    }

    let format = options.resolved_format();
    let text = serialize(&doc, format).context("Failed to serialize workflow")?;

    if options.to_stdout() {
        print!("{text}");
        return Ok(());
    }

    filesystem::write_file(&options.output, &text)?;

    if output.json {
        output.json_value(&serde_json::json!({
            "output": options.output.display().to_string(),
            "format": format.to_string(),
            "workflow": doc.name,
            "jobs": doc.len(),
        }));
    } else {
        output.success(&format!(
            "Wrote {} jobs to {} ({format})",
            doc.len(),
            options.output.display()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(output: &str, format: Option<OutputFormat>) -> GenerateOptions {
        GenerateOptions {
            graph: None,
            template: None,
            output: PathBuf::from(output),
            format,
            prune: false,
        }
    }

    #[test]
    fn test_format_inferred_from_output() {
        assert_eq!(options("out.json", None).resolved_format(), OutputFormat::Json);
        assert_eq!(options("out.yml", None).resolved_format(), OutputFormat::Yaml);
        assert_eq!(
            options("out.yml", Some(OutputFormat::Json)).resolved_format(),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_dash_means_stdout() {
        assert!(options("-", None).to_stdout());
        assert!(!options("./-x", None).to_stdout());
    }
}
