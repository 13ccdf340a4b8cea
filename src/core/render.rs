//! Workflow rendering
//!
//! Turns a validated graph and its execution levels into a
//! [`WorkflowDocument`]: one job definition per package plus an ordered
//! workflow whose entries carry explicit `requires` edges.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::core::graph::{DependencyGraph, ExecutionLevel};
use crate::core::naming::JobNames;
use crate::core::template::{Step, TemplateConfig};
use crate::error::ValidationError;

/// Container image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerImage {
    /// Image name and tag
    pub image: String,
}

/// What a job runs and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDefinition {
    /// Execution environment
    pub docker: Vec<DockerImage>,

    /// Resource tier hint
    pub resource_class: String,

    /// Shell for run steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Ordered steps
    pub steps: Vec<Step>,
}

/// One workflow entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Job name
    pub job_name: String,

    /// Package built by this job, `None` for the integration job
    pub package: Option<String>,

    /// Job names of direct prerequisites, lexicographically ordered
    pub requires: Vec<String>,
}

/// Rendered workflow, ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowDocument {
    /// Workflow name
    pub name: String,

    /// Job definitions keyed by job name
    pub jobs: BTreeMap<String, JobDefinition>,

    /// Workflow entries in level order
    pub workflow: Vec<JobDescriptor>,
}

impl WorkflowDocument {
    /// Number of jobs
    pub fn len(&self) -> usize {
        self.workflow.len()
    }

    /// Whether the workflow has no jobs
    pub fn is_empty(&self) -> bool {
        self.workflow.is_empty()
    }

    /// Find the entry for a job
    pub fn entry(&self, job_name: &str) -> Option<&JobDescriptor> {
        self.workflow.iter().find(|e| e.job_name == job_name)
    }
}

/// Render a workflow document
///
/// Jobs are emitted level by level, lexicographically inside a level, so
/// a job never precedes anything it requires. `requires` only lists
/// direct dependencies; the orchestrator resolves the rest through its own
/// chain.
pub fn render(
    graph: &DependencyGraph,
    levels: &[ExecutionLevel],
    template: &TemplateConfig,
) -> Result<WorkflowDocument, ValidationError> {
    check_levels(graph, levels)?;

    let names = JobNames::assign(
        graph,
        &template.naming.prefix,
        template.integration_job_name(),
    )?;

    let mut jobs = BTreeMap::new();
    let mut workflow = Vec::with_capacity(graph.len() + 1);

    for package in levels.iter().flat_map(ExecutionLevel::packages) {
        let (Some(node), Some(job)) = (graph.get(package), names.get(package)) else {
            return Err(ValidationError::InconsistentLevels {
                package: package.clone(),
            });
        };

        // Dependencies are iterated in name order; job names are sorted separately
        let mut requires: Vec<String> = node
            .dependencies()
            .iter()
            .filter_map(|dep| names.get(dep).map(str::to_string))
            .collect();
        requires.sort();

        tracing::debug!("Job {job} requires [{}]", requires.join(", "));

        let definition = job_definition(
            template,
            template.executor.resource_class.clone(),
            template.package_steps(package, job),
        );
        jobs.insert(job.to_string(), definition);
        workflow.push(JobDescriptor {
            job_name: job.to_string(),
            package: Some(package.clone()),
            requires,
        });
    }

    let integration = template.integration.as_ref().zip(template.integration_steps());
    if let Some((integration, steps)) = integration {
        if !graph.is_empty() {
            let requires: Vec<String> = graph
                .terminal_packages()
                .into_iter()
                .filter_map(|p| names.get(p).map(str::to_string))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            let resource_class = integration
                .resource_class
                .clone()
                .unwrap_or_else(|| template.executor.resource_class.clone());

            jobs.insert(
                integration.name.clone(),
                job_definition(template, resource_class, steps),
            );
            workflow.push(JobDescriptor {
                job_name: integration.name.clone(),
                package: None,
                requires,
            });
        }
    }

    tracing::info!(
        "Rendered workflow '{}' with {} jobs",
        template.workflow.name,
        workflow.len()
    );

    Ok(WorkflowDocument {
        name: template.workflow.name.clone(),
        jobs,
        workflow,
    })
}

fn job_definition(
    template: &TemplateConfig,
    resource_class: String,
    steps: Vec<Step>,
) -> JobDefinition {
    JobDefinition {
        docker: vec![DockerImage {
            image: template.executor.image.clone(),
        }],
        resource_class,
        shell: template.executor.shell.clone(),
        steps,
    }
}

/// Levels must cover each package once, after all of its dependencies
fn check_levels(
    graph: &DependencyGraph,
    levels: &[ExecutionLevel],
) -> Result<(), ValidationError> {
    let mut done: HashSet<&str> = HashSet::with_capacity(graph.len());

    for level in levels {
        for package in level.packages() {
            let consistent = graph.get(package).is_some_and(|node| {
                !done.contains(package.as_str())
                    && node.dependencies().iter().all(|d| done.contains(d.as_str()))
            });
            if !consistent {
                return Err(ValidationError::InconsistentLevels {
                    package: package.clone(),
                });
            }
        }
        // A level only unlocks the next one once complete
        done.extend(level.packages().iter().map(String::as_str));
    }

    if let Some(missing) = graph.packages().find(|n| !done.contains(n.name())) {
        return Err(ValidationError::InconsistentLevels {
            package: missing.name().to_string(),
        });
    }

    Ok(())
}
