//! Pipeline serialization
//!
//! Encodes a [`WorkflowDocument`] as an orchestrator configuration:
//!
//! ```yaml
//! version: 2.1
//! jobs:
//!   build-a: { docker: [...], resource_class: ..., steps: [...] }
//! workflows:
//!   build-all:
//!     jobs:
//!       - build-a: { requires: [] }
//! ```
//!
//! Pure formatting; all validation happened before a document exists.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::config::defaults::PIPELINE_VERSION;
use crate::core::render::{JobDefinition, WorkflowDocument};
use crate::error::SerializationError;

/// Output encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// YAML, the orchestrator's native format
    #[default]
    Yaml,
    /// JSON, as accepted by continuation APIs
    Json,
}

impl OutputFormat {
    /// Guess the format from a file extension, defaulting to YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct PipelineConfig<'a> {
    version: f64,
    jobs: &'a BTreeMap<String, JobDefinition>,
    workflows: BTreeMap<&'a str, WorkflowSpec<'a>>,
}

#[derive(Serialize)]
struct WorkflowSpec<'a> {
    jobs: Vec<BTreeMap<&'a str, WorkflowJob<'a>>>,
}

#[derive(Serialize)]
struct WorkflowJob<'a> {
    requires: &'a [String],
}

impl<'a> PipelineConfig<'a> {
    fn from_document(doc: &'a WorkflowDocument) -> Self {
        let jobs = doc
            .workflow
            .iter()
            .map(|entry| {
                let args = WorkflowJob {
                    requires: &entry.requires,
                };
                BTreeMap::from([(entry.job_name.as_str(), args)])
            })
            .collect();

        Self {
            version: PIPELINE_VERSION,
            jobs: &doc.jobs,
            workflows: BTreeMap::from([(doc.name.as_str(), WorkflowSpec { jobs })]),
        }
    }
}

/// Encode a workflow document
pub fn serialize(doc: &WorkflowDocument, format: OutputFormat) -> Result<String, SerializationError> {
    let config = PipelineConfig::from_document(doc);
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(&config)?,
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&config)?;
            text.push('\n');
            text
        }
    };
    Ok(text)
}
