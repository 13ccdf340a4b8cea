//! Infrastructure layer
//!
//! Handles all I/O operations: graph sources, config directories and the
//! filesystem. This module is the only place where side effects occur.

pub mod dirs;
pub mod filesystem;
pub mod source;
