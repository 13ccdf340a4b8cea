//! Core business logic module
//!
//! This module contains the graph-to-workflow compiler.
//! It has NO I/O operations - those belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`graph`] - Dependency graph model, validation and execution levels
//! - [`naming`] - Job name normalization and collision checks
//! - [`template`] - Job template configuration
//! - [`render`] - Workflow document rendering
//! - [`pipeline`] - Serialization to the orchestrator format
//! - [`compile`] - The validate, level, render, serialize pipeline
//! - [`tree`] - Text tree and DOT views of a graph

pub mod compile;
pub mod graph;
pub mod naming;
pub mod pipeline;
pub mod render;
pub mod template;
pub mod tree;
