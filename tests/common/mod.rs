//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory holding graph and template files, and
/// runs the `dagci` binary inside it with an isolated config directory.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Config directory handed to the binary through `DAGCI_CONFIG_DIR`
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run `dagci` with `args` in the project directory
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dagci"))
            .current_dir(self.path())
            .env("DAGCI_CONFIG_DIR", self.config_dir())
            .env_remove("DAGCI_GRAPH")
            .env_remove("DAGCI_TEMPLATE")
            .env_remove("DAGCI_OUTPUT")
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("Failed to execute dagci")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured stdout as a string
#[allow(dead_code)]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Captured stderr as a string
#[allow(dead_code)]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Diamond-shaped graph: D needs B and C, B needs A
#[allow(dead_code)]
pub const DIAMOND_GRAPH: &str = r#"{
  "A": [],
  "B": ["A"],
  "C": [],
  "D": ["B", "C"]
}
"#;

/// Two packages depending on each other
#[allow(dead_code)]
pub const CYCLIC_GRAPH: &str = r#"{"X": ["Y"], "Y": ["X"]}"#;

/// A package depending on something that does not exist
#[allow(dead_code)]
pub const DANGLING_GRAPH: &str = r#"{"A": [], "B": ["Z"]}"#;

/// Sample job template for testing
#[allow(dead_code)]
pub const SAMPLE_TEMPLATE: &str = r#"
[executor]
image = "nixos/nix:2.24"
resource_class = "large"

[naming]
prefix = "nix-"

[workflow]
name = "packages"

[build]
name = "Build {package} as {job}"
command = "nix build .#{package}"

[publish]
enabled = false

[integration]
name = "smoke-test"
steps = [{ name = "Smoke", command = "./smoke.sh" }]
"#;
