//! Integration tests for `dagci check`
//!
//! - Reports a valid graph and template
//! - Fails on graph and template errors without writing anything

mod common;

use common::{stderr, stdout, TestProject, CYCLIC_GRAPH, DIAMOND_GRAPH};
use serde_json::{json, Value};

#[test]
fn test_check_valid_graph() {
    let project = TestProject::new();
    project.create_file("graph.json", DIAMOND_GRAPH);

    let output = project.run(&["check", "--graph", "graph.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("✓ Template is valid"));
    assert!(out.contains("✓ Dependency graph is valid (4 packages)"));
    assert!(out.contains("Workflow 'build-all' has 4 jobs"));
}

#[test]
fn test_check_cycle() {
    let project = TestProject::new();
    project.create_file("graph.json", CYCLIC_GRAPH);

    let output = project.run(&["check", "-g", "graph.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Circular dependency detected"));
}

#[test]
fn test_check_reserved_job_name() {
    let project = TestProject::new();
    project.create_file("graph.json", r#"{"test": []}"#);
    project.create_file(
        "template.toml",
        "[integration]\nname = \"build-test\"\nsteps = [{ name = \"t\", command = \"true\" }]\n",
    );

    let output = project.run(&["check", "-g", "graph.json", "-t", "template.toml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("reserved job name 'build-test'"));
}

#[test]
fn test_check_empty_graph_warns() {
    let project = TestProject::new();
    project.create_file("graph.yaml", "");

    let output = project.run(&["check", "-g", "graph.yaml"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("⚠"));
}

#[test]
fn test_check_json() {
    let project = TestProject::new();
    project.create_file("graph.json", DIAMOND_GRAPH);

    let output = project.run(&["check", "-g", "graph.json", "--json"]);
    assert!(output.status.success());

    let result: Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(result, json!({"valid": true, "packages": 4, "jobs": 4}));
}

#[test]
fn test_check_quiet() {
    let project = TestProject::new();
    project.create_file("graph.json", DIAMOND_GRAPH);

    let output = project.run(&["-q", "check", "-g", "graph.json"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}
