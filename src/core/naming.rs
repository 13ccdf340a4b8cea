//! Job name normalization
//!
//! A job name is the configured prefix followed by the case-folded package
//! name, with every character the orchestrator does not accept in a job
//! identifier replaced by `_`. The mapping is not reversible, so it is
//! checked for injectivity across the whole graph.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::graph::DependencyGraph;
use crate::error::ValidationError;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_-]").expect("Invalid job name regex"))
}

fn valid_job_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9_-]*$").expect("Invalid job name regex"))
}

/// Whether `name` only uses characters allowed in a job identifier
pub fn is_valid_job_name(name: &str) -> bool {
    valid_job_name().is_match(name)
}

/// Derive the job name for a package
///
/// ```
/// use dagci::core::naming::job_name;
///
/// assert_eq!(job_name("build-", "packageA"), "build-packagea");
/// assert_eq!(job_name("", "python3.11"), "python3_11");
/// ```
pub fn job_name(prefix: &str, package: &str) -> String {
    let folded = package.to_lowercase();
    let safe = disallowed_chars().replace_all(&folded, "_");
    format!("{prefix}{safe}")
}

/// Package name -> job name for every package in a graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobNames {
    names: BTreeMap<String, String>,
}

impl JobNames {
    /// Assign a job name to every package
    ///
    /// Packages are visited in lexicographic order, so on a collision
    /// `first` is always the lexicographically smaller package. `reserved`
    /// names a job that no package may map to.
    pub fn assign(
        graph: &DependencyGraph,
        prefix: &str,
        reserved: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let mut names = BTreeMap::new();
        let mut owners: BTreeMap<String, &str> = BTreeMap::new();

        for node in graph.packages() {
            let job = job_name(prefix, node.name());

            if reserved == Some(job.as_str()) {
                return Err(ValidationError::ReservedJobName {
                    package: node.name().to_string(),
                    job_name: job,
                });
            }

            if let Some(first) = owners.get(&job) {
                return Err(ValidationError::NameCollision {
                    first: (*first).to_string(),
                    second: node.name().to_string(),
                    job_name: job,
                });
            }

            owners.insert(job.clone(), node.name());
            names.insert(node.name().to_string(), job);
        }

        Ok(Self { names })
    }

    /// Job name of a package
    pub fn get(&self, package: &str) -> Option<&str> {
        self.names.get(package).map(String::as_str)
    }

    /// Number of assigned names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no names were assigned
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
