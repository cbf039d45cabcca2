//! Integration tests for the practices CLI.
//!
//! These tests run the built binary against the sample dataset and against
//! small datasets written to temporary directories.

use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

mod common;
use common::{run_on_sample, run_practices_in_dir, stderr, stdout};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("Failed to write test file");
}

fn json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[rstest]
fn test_cli_help_lists_commands(temp_dir: TempDir) {
    let output = run_practices_in_dir(temp_dir.path(), &["--help"]);
    assert!(output.status.success());

    let help = stdout(&output);
    for command in ["validate", "show", "tree", "flat", "next", "progress", "check-edge"] {
        assert!(help.contains(command), "help should list {command}:\n{help}");
    }
}

#[rstest]
fn test_cli_no_args(temp_dir: TempDir) {
    let output = run_practices_in_dir(temp_dir.path(), &[]);
    assert!(output.status.success());
}

// ============================================================================
// Validate
// ============================================================================

#[rstest]
fn test_validate_sample_dataset(temp_dir: TempDir) {
    let output = run_on_sample(temp_dir.path(), &["validate"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("OK: 7 practices, 9 dependencies, no cycles"));
}

#[rstest]
fn test_validate_json(temp_dir: TempDir) {
    let output = run_on_sample(temp_dir.path(), &["--json", "validate"]);
    assert!(output.status.success());

    let value = json(&output);
    assert_eq!(value["valid"], true);
    assert_eq!(value["practices"], 7);
    assert_eq!(value["dependencies"], 9);
}

#[rstest]
fn test_validate_reports_cycle_path(temp_dir: TempDir) {
    write(
        &temp_dir,
        "practices.json",
        r#"{"practices": [
            {"id": "x", "name": "X", "category": "core", "dependencies": ["y"]},
            {"id": "y", "name": "Y", "category": "core", "dependencies": ["x"]}
        ]}"#,
    );

    let output = run_practices_in_dir(temp_dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(
        err.contains("Circular dependency: x -> y -> x")
            || err.contains("Circular dependency: y -> x -> y"),
        "stderr: {err}"
    );
}

#[rstest]
#[case::bad_id(r#"{"practices": [{"id": "Bad_Id", "name": "B", "category": "core"}]}"#, "Invalid practice id")]
#[case::bad_category(r#"{"practices": [{"id": "a", "name": "A", "category": "culture"}]}"#, "Unknown category")]
#[case::dangling(r#"{"practices": [{"id": "a", "name": "A", "category": "core", "dependencies": ["ghost"]}]}"#, "unknown practice ghost")]
#[case::not_json("{practices", "Failed to load")]
fn test_validate_rejects_bad_data(temp_dir: TempDir, #[case] data: &str, #[case] message: &str) {
    write(&temp_dir, "practices.json", data);

    let output = run_practices_in_dir(temp_dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(message), "stderr: {}", stderr(&output));
}

#[rstest]
fn test_missing_dataset_fails(temp_dir: TempDir) {
    let output = run_practices_in_dir(temp_dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("practices.json"));
}

// ============================================================================
// Configuration
// ============================================================================

#[rstest]
fn test_config_file_points_at_dataset_and_caps_depth(temp_dir: TempDir) {
    write(
        &temp_dir,
        "catalog.json",
        r#"{"practices": [
            {"id": "a", "name": "A", "category": "core", "dependencies": ["b"]},
            {"id": "b", "name": "B", "category": "core", "dependencies": ["c"]},
            {"id": "c", "name": "C", "category": "core"}
        ]}"#,
    );
    write(
        &temp_dir,
        "practices.yaml",
        "data-file: catalog.json\nengine:\n  max-tree-depth: 1\n",
    );

    let output = run_practices_in_dir(temp_dir.path(), &["--json", "flat", "a"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let ids: Vec<String> = json(&output)
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["a", "b"]);

    // --max-depth wins over the file
    let output = run_practices_in_dir(temp_dir.path(), &["--json", "flat", "a", "--max-depth", "5"]);
    assert_eq!(json(&output).as_array().unwrap().len(), 3);
}

#[rstest]
fn test_invalid_config_fails(temp_dir: TempDir) {
    write(&temp_dir, "practices.yaml", "engine: [1, 2]\n");
    let output = run_practices_in_dir(temp_dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}

// ============================================================================
// Show
// ============================================================================

#[rstest]
fn test_show_lists_relations(temp_dir: TempDir) {
    let output = run_on_sample(temp_dir.path(), &["show", "continuous-integration"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("continuous-integration: Continuous Integration"));
    assert!(text.contains("Depends on (2):"));
    assert!(text.contains("automated-testing Automated Testing"));
    assert!(text.contains("Depended on by (1):"));
    assert!(text.contains("deployment-pipeline Deployment Pipeline"));
}

#[rstest]
fn test_show_json_marks_adoption(temp_dir: TempDir) {
    let output = run_on_sample(
        temp_dir.path(),
        &["--json", "--adopted", "version-control", "show", "version-control"],
    );
    let value = json(&output);
    assert_eq!(value["adopted"], true);
    assert_eq!(value["category"], "core");
    assert_eq!(
        value["dependents"],
        serde_json::json!(["automated-build", "trunk-based-development"])
    );
}

// ============================================================================
// Tree and Flat
// ============================================================================

#[rstest]
fn test_tree_renders_connectors(temp_dir: TempDir) {
    let output = run_on_sample(temp_dir.path(), &["tree", "automated-testing"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        [
            "◆ automated-testing Automated Testing ○",
            "└── automated-build Automated Build ○",
            "    └── version-control Version Control ○",
        ]
    );
}

#[rstest]
fn test_tree_json_nests_dependencies(temp_dir: TempDir) {
    let output = run_on_sample(temp_dir.path(), &["--json", "tree", "continuous-delivery"]);
    let value = json(&output);
    assert_eq!(value["id"], "continuous-delivery");
    assert_eq!(value["level"], 0);

    let children: Vec<&str> = value["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(children, ["deployment-pipeline", "trunk-based-development"]);
}

#[rstest]
fn test_flat_places_shared_practices_at_deepest_level(temp_dir: TempDir) {
    let output = run_on_sample(temp_dir.path(), &["--json", "flat", "continuous-delivery"]);
    let listing: Vec<(String, u64)> = json(&output)
        .as_array()
        .unwrap()
        .iter()
        .map(|n| (n["id"].as_str().unwrap().to_string(), n["level"].as_u64().unwrap()))
        .collect();

    let expected = [
        ("continuous-delivery", 0),
        ("deployment-pipeline", 1),
        ("continuous-integration", 2),
        ("automated-testing", 3),
        ("trunk-based-development", 3),
        ("automated-build", 4),
        ("version-control", 5),
    ];
    let expected: Vec<(String, u64)> =
        expected.iter().map(|(id, level)| ((*id).to_string(), *level)).collect();
    assert_eq!(listing, expected);
}

#[rstest]
fn test_flat_selection_keeps_relatives(temp_dir: TempDir) {
    let output = run_on_sample(
        temp_dir.path(),
        &["flat", "continuous-delivery", "--select", "automated-testing"],
    );
    let ids: Vec<String> = stdout(&output)
        .lines()
        .filter_map(|line| line.split_whitespace().nth(2).map(str::to_string))
        .collect();
    assert_eq!(
        ids,
        [
            "continuous-delivery",
            "deployment-pipeline",
            "continuous-integration",
            "automated-testing",
            "automated-build",
            "version-control",
        ]
    );
}

#[rstest]
fn test_flat_unknown_selection_keeps_everything(temp_dir: TempDir) {
    let output = run_on_sample(
        temp_dir.path(),
        &["--json", "flat", "continuous-delivery", "--select", "nothing-here"],
    );
    assert_eq!(json(&output).as_array().unwrap().len(), 7);
}

#[rstest]
#[case::tree("tree")]
#[case::flat("flat")]
#[case::show("show")]
fn test_unknown_root_has_distinct_exit_code(temp_dir: TempDir, #[case] command: &str) {
    let output = run_on_sample(temp_dir.path(), &[command, "no-such-practice"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Practice not found: no-such-practice"));
}

// ============================================================================
// Next and Progress
// ============================================================================

#[rstest]
#[case::nothing_adopted("", "version-control")]
#[case::foundation_adopted("version-control", "automated-build")]
#[case::tier_then_id("version-control,automated-build", "automated-testing")]
fn test_next_recommendation(temp_dir: TempDir, #[case] adopted: &str, #[case] expected: &str) {
    let mut args = vec!["--json"];
    if !adopted.is_empty() {
        args.extend(["--adopted", adopted]);
    }
    args.push("next");

    let value = json(&run_on_sample(temp_dir.path(), &args));
    assert_eq!(value["status"], "next");
    assert_eq!(value["id"], expected);
}

#[rstest]
fn test_next_when_everything_is_adopted_exits_zero(temp_dir: TempDir) {
    write(&temp_dir, "adopted.json", r#"["a", "b", 42, ""]"#);
    write(
        &temp_dir,
        "practices.json",
        r#"{"practices": [
            {"id": "a", "name": "A", "category": "core"},
            {"id": "b", "name": "B", "category": "core", "dependencies": ["a"]}
        ]}"#,
    );

    let output = run_practices_in_dir(temp_dir.path(), &["--adopted-file", "adopted.json", "next"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("All practices adopted."));

    let output = run_practices_in_dir(
        temp_dir.path(),
        &["--json", "--adopted-file", "adopted.json", "next"],
    );
    assert_eq!(json(&output), serde_json::json!({"status": "complete"}));
}

#[rstest]
fn test_next_all_lists_candidates_in_order(temp_dir: TempDir) {
    let output = run_on_sample(
        temp_dir.path(),
        &["--json", "--adopted", "version-control", "next", "--all"],
    );
    let ids: Vec<String> = json(&output)
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["automated-build", "trunk-based-development"]);
}

#[rstest]
fn test_progress_ignores_unknown_ids(temp_dir: TempDir) {
    let output = run_on_sample(
        temp_dir.path(),
        &["--adopted", "version-control,automated-build,retired-practice", "progress"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2 of 7 practices adopted (29%)\n");

    let output = run_on_sample(temp_dir.path(), &["--json", "progress"]);
    assert_eq!(
        json(&output),
        serde_json::json!({"total": 7, "adopted": 0, "percentage": 0})
    );
}

// ============================================================================
// Check Edge
// ============================================================================

#[rstest]
#[case::closes_cycle("version-control", "continuous-delivery", true)]
#[case::keeps_acyclic("continuous-delivery", "version-control", false)]
fn test_check_edge(
    temp_dir: TempDir,
    #[case] from: &str,
    #[case] to: &str,
    #[case] expected: bool,
) {
    let output = run_on_sample(temp_dir.path(), &["--json", "check-edge", from, to]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(json(&output)["wouldCreateCycle"], expected);
}

#[rstest]
fn test_check_edge_unknown_practice(temp_dir: TempDir) {
    let output = run_on_sample(temp_dir.path(), &["check-edge", "version-control", "nope"]);
    assert_eq!(output.status.code(), Some(3));
}
