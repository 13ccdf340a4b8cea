//! Error types for dagci
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Structural errors in the dependency graph or its rendering
///
/// All of these abort the compile: there is no partial output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A declared dependency is not a package in the graph
    #[error("Unknown dependency: '{missing}' required by '{node}'")]
    UnknownDependency { node: String, missing: String },

    /// The dependency relation contains a cycle
    ///
    /// The path starts and ends at the same package.
    #[error("Circular dependency detected: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// Two distinct packages normalize to the same job name
    #[error("Packages '{first}' and '{second}' both map to job name '{job_name}'")]
    NameCollision {
        first: String,
        second: String,
        job_name: String,
    },

    /// A package maps to the job name reserved for the integration job
    #[error("Package '{package}' maps to reserved job name '{job_name}'")]
    ReservedJobName { package: String, job_name: String },

    /// A package key is empty
    #[error("Package names must not be empty")]
    EmptyPackageName,

    /// Levels handed to the renderer do not match the graph
    #[error("Execution levels are inconsistent with the graph at package '{package}'")]
    InconsistentLevels { package: String },
}

/// Job template configuration errors
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Failed to parse the template file
    #[error("Failed to parse job template: {0}")]
    Parse(String),

    /// Required field is empty
    #[error("Job template field '{field}' must not be empty")]
    EmptyField { field: String },

    /// Build command does not reference the package
    #[error("Build command must contain the '{{package}}' placeholder")]
    MissingPlaceholder,

    /// Job name prefix contains characters the orchestrator rejects
    #[error("Job name prefix '{prefix}' may only contain lowercase letters, digits, '-' and '_'")]
    InvalidPrefix { prefix: String },

    /// Integration job name contains characters the orchestrator rejects
    #[error("Job name '{name}' may only contain lowercase letters, digits, '-' and '_'")]
    InvalidJobName { name: String },
}

/// Errors raised while fetching the raw dependency graph
#[derive(Error, Debug)]
pub enum SourceError {
    /// Graph file could not be read
    #[error("Failed to read graph file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Graph file could not be parsed
    #[error("Failed to parse graph file '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// File extension does not map to a known format
    #[error("Unsupported graph file format for '{path}' (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat { path: PathBuf },
}

/// Output encoding errors
///
/// A well-formed workflow document always serializes, so these indicate
/// an internal invariant violation.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// JSON encoding failed
    #[error("Failed to encode workflow as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding failed
    #[error("Failed to encode workflow as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Top-level dagci error type
#[derive(Error, Debug)]
pub enum DagciError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Template error
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Graph source error
    #[error("Graph source error: {0}")]
    Source(#[from] SourceError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
