//! dagci - compile a package dependency graph into a CI workflow
//!
//! Given a mapping from package name to its direct dependencies, dagci
//! validates the graph, groups packages into execution levels and renders
//! one CI job per package, wired together with `requires` edges so that
//! independent packages build in parallel.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (no I/O operations)
//! - [`infra`] - Infrastructure layer (graph sources, filesystem)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
