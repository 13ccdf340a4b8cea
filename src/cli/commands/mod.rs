//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod check;
pub mod generate;
pub mod levels;
pub mod tree;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::cli::output::OutputConfig;
use crate::config::defaults::DEFAULT_OUTPUT_PATH;
use crate::core::graph::RawGraph;
use crate::core::pipeline::OutputFormat;
use crate::core::template::TemplateConfig;
use crate::infra::dirs::DagciDirs;
use crate::infra::filesystem;
use crate::infra::source::{FileSource, GraphSource, StaticSource};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the dependency graph into a workflow configuration
    Generate {
        /// Graph file (.json, .yaml, .yml or .toml); built-in demo graph if omitted
        #[arg(short, long, env = "DAGCI_GRAPH")]
        graph: Option<PathBuf>,

        /// Job template file (TOML)
        #[arg(short, long, env = "DAGCI_TEMPLATE")]
        template: Option<PathBuf>,

        /// Where to write the configuration, `-` for stdout
        #[arg(short, long, env = "DAGCI_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Output format (inferred from the output extension if omitted)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Drop requires edges already implied by other dependencies
        #[arg(long)]
        prune: bool,
    },

    /// Print the execution levels of the graph
    Levels {
        /// Graph file; built-in demo graph if omitted
        #[arg(short, long, env = "DAGCI_GRAPH")]
        graph: Option<PathBuf>,
    },

    /// Validate the graph and template without writing anything
    Check {
        /// Graph file; built-in demo graph if omitted
        #[arg(short, long, env = "DAGCI_GRAPH")]
        graph: Option<PathBuf>,

        /// Job template file (TOML)
        #[arg(short, long, env = "DAGCI_TEMPLATE")]
        template: Option<PathBuf>,
    },

    /// Display the dependency tree
    Tree {
        /// Only show dependencies of this package
        package: Option<String>,

        /// Graph file; built-in demo graph if omitted
        #[arg(short, long, env = "DAGCI_GRAPH")]
        graph: Option<PathBuf>,

        /// Output in DOT format for graphviz
        #[arg(long)]
        dot: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, output: &OutputConfig) -> Result<()> {
        match self {
            Self::Generate {
                graph,
                template,
                output: path,
                format,
                prune,
            } => {
                let options = generate::GenerateOptions {
                    graph,
                    template,
                    output: path,
                    format,
                    prune,
                };
                generate::execute(options, output).await
            }
            Self::Levels { graph } => levels::execute(graph.as_deref(), output).await,
            Self::Check { graph, template } => {
                check::execute(graph.as_deref(), template.as_deref(), output).await
            }
            Self::Tree {
                package,
                graph,
                dot,
            } => tree::execute(graph.as_deref(), package, dot).await,
        }
    }
}

/// Pick the graph source for an optional `--graph` path
pub fn graph_source(path: Option<&Path>) -> Box<dyn GraphSource> {
    match path {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(StaticSource::demo()),
    }
}

/// Load the raw dependency mapping
pub fn load_graph(path: Option<&Path>) -> Result<RawGraph> {
    let source = graph_source(path);
    tracing::info!("Loading dependency graph from {}", source.describe());
    let raw = source
        .fetch_graph()
        .context("Failed to load dependency graph")?;
    Ok(raw)
}

/// Load the job template
///
/// An explicit path must exist. Otherwise `template.toml` in the config
/// directory is used when present, and the built-in template when not.
pub fn load_template(explicit: Option<&Path>, dirs: &DagciDirs) -> Result<TemplateConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = dirs.template_path();
            if !path.exists() {
                tracing::info!(
                    "No template at {}, using built-in template",
                    path.display()
                );
                return Ok(TemplateConfig::default());
            }
            path
        }
    };

    let content = filesystem::read_file(&path)?;
    let template = TemplateConfig::from_toml(&content)
        .with_context(|| format!("Invalid job template {}", path.display()))?;
    tracing::info!("Loaded job template from {}", path.display());
    Ok(template)
}
