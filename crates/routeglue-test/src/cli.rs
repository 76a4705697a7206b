//! CLI regression tests for the `routeglue` binary.
//!
//! These tests invoke the binary as a subprocess to catch regressions in flag
//! names, exit codes and output formats.
//!
//! Run with: `cargo test -p routeglue-test`
//! Requires the `routeglue` binary to be built first (`cargo build -p routeglue`).

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

use crate::fixture;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns an assert_cmd Command wrapping the `routeglue` binary.
fn routeglue() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("routeglue")
        .expect("routeglue binary not found, run `cargo build -p routeglue` first");
    cmd.env_remove("RUST_LOG")
        .env_remove("ROUTEGLUE_LOG_LEVEL")
        .env_remove("ROUTEGLUE_LOG_FORMAT");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ---------------------------------------------------------------------------
// routeglue compile
// ---------------------------------------------------------------------------

#[test]
fn compile_with_handler_file_prints_route_table() {
    routeglue()
        .args(["compile", "--spec"])
        .arg(fixture("documents.yaml"))
        .arg("--handler-file")
        .arg(fixture("documents.handlers"))
        .assert()
        .success()
        .stdout(contains("GET     /api/documents/:type/:id  -> getDocument"))
        .stdout(contains("-> deleteDocument"))
        .stderr(contains("compiled 3 route(s)"));
}

#[test]
fn compile_missing_handlers_lists_every_operation() {
    routeglue()
        .args(["compile", "--spec"])
        .arg(fixture("documents.yaml"))
        .args(["--handler", "getDocument"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(contains("E2003"))
        .stderr(contains("expects handler 'updateDocument'"))
        .stderr(contains("expects handler 'deleteDocument'"));
}

#[test]
fn compile_json_output_carries_schemas() {
    let output = routeglue()
        .args(["compile", "--format", "json", "--prefix", "/v1", "--spec"])
        .arg(fixture("documents.yaml"))
        .args(["--handler", "getDocument"])
        .args(["--handler", "updateDocument"])
        .args(["--handler", "deleteDocument"])
        .output()
        .expect("run routeglue");
    assert!(output.status.success());

    let table = stdout_json(&output);
    assert_eq!(table["total"], 3);
    let post = &table["routes"][1];
    assert_eq!(post["method"], "POST");
    assert_eq!(post["url"], "/v1/api/documents/:type/:id");
    assert_eq!(post["path"], "/api/documents/{type}/{id}");
    assert!(post["schema"]["body"]["properties"].get("id").is_none());
    assert!(post["schema"]["body"]["properties"].get("secret").is_some());

    let get_response = &table["routes"][0]["schema"]["response"];
    assert!(get_response["200"]["properties"].get("secret").is_none());
    assert_eq!(get_response["4xx"]["properties"]["code"]["type"], "integer");
}

#[test]
fn compile_derive_required_flag() {
    let output = routeglue()
        .args(["compile", "--format", "json", "--derive-required", "--spec"])
        .arg(fixture("documents.yaml"))
        .arg("--handler-file")
        .arg(fixture("documents.handlers"))
        .output()
        .expect("run routeglue");
    assert!(output.status.success());

    let table = stdout_json(&output);
    assert_eq!(
        table["routes"][0]["schema"]["params"]["required"],
        serde_json::json!(["type", "id"])
    );
}

#[test]
fn compile_relative_prefix_is_anchored() {
    routeglue()
        .args(["compile", "--prefix", "v1", "--spec"])
        .arg(fixture("minimal.json"))
        .args(["--handler", "health"])
        .assert()
        .success()
        .stdout(contains("GET  /v1/health  -> health"));
}

#[test]
fn compile_filter_depth_flag() {
    let dir = TempDir::new().unwrap();
    let spec = dir.path().join("nested.json");
    std::fs::write(
        &spec,
        r#"{"paths": {"/docs": {"post": {
            "operationId": "CreateDoc",
            "requestBody": {"content": {"application/json": {"schema": {
                "type": "object",
                "properties": {"owner": {"type": "object", "properties": {
                    "id": {"type": "string", "readOnly": true},
                    "name": {"type": "string"}
                }}}
            }}}}
        }}}}"#,
    )
    .unwrap();

    let owner = |depth: &str| {
        let output = routeglue()
            .args(["check", "--format", "json", "--filter-depth", depth, "--spec"])
            .arg(&spec)
            .output()
            .expect("run routeglue");
        assert!(output.status.success());
        stdout_json(&output)["routes"][0]["schema"]["body"]["properties"]["owner"]["properties"]
            .clone()
    };
    assert!(owner("shallow").get("id").is_some());
    assert!(owner("recursive").get("id").is_none());
}

#[test]
fn compile_unknown_filter_depth_exits_two() {
    routeglue()
        .args(["check", "--filter-depth", "deep", "--spec"])
        .arg(fixture("minimal.json"))
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown filter depth: deep"));
}

#[test]
fn compile_orphan_reference_exits_one() {
    routeglue()
        .args(["compile", "--spec"])
        .arg(fixture("orphan-ref.yaml"))
        .args(["--handler", "getItem"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("E2001"))
        .stderr(contains("#/components/schemas/item"));
}

#[test]
fn compile_missing_spec_exits_one() {
    routeglue()
        .args(["compile", "--spec", "this-file-does-not-exist.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("file not found"));
}

#[test]
fn compile_missing_handler_file_exits_one() {
    routeglue()
        .args(["compile", "--spec"])
        .arg(fixture("documents.yaml"))
        .args(["--handler-file", "no-such-handlers.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("no-such-handlers.txt"));
}

#[test]
fn compile_unparseable_spec_exits_one() {
    routeglue()
        .args(["compile", "--spec"])
        .arg(fixture("invalid-parse-error.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("failed to parse"));
}

#[test]
fn compile_unknown_format_exits_two() {
    routeglue()
        .args(["compile", "--format", "xml", "--spec"])
        .arg(fixture("minimal.json"))
        .args(["--handler", "health"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown output format"));
}

#[test]
fn compile_without_spec_flag_is_a_usage_error() {
    routeglue()
        .arg("compile")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("--spec"));
}

#[test]
fn compile_spec_written_at_runtime() {
    let dir = TempDir::new().unwrap();
    let spec = dir.path().join("api.json");
    std::fs::write(
        &spec,
        r#"{"paths": {"/ping": {"head": {"operationId": "Ping"}}}}"#,
    )
    .unwrap();

    routeglue()
        .args(["compile", "--spec"])
        .arg(&spec)
        .args(["--handler", "ping"])
        .assert()
        .success()
        .stdout(contains("HEAD  /ping  -> ping"));
}

// ---------------------------------------------------------------------------
// routeglue check
// ---------------------------------------------------------------------------

#[test]
fn check_accepts_any_handler() {
    routeglue()
        .args(["check", "--spec"])
        .arg(fixture("documents.yaml"))
        .assert()
        .success()
        .stdout(contains("-> updateDocument"));
}

#[test]
fn check_reports_cyclic_reference() {
    routeglue()
        .args(["check", "--spec"])
        .arg(fixture("cyclic-ref.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("E2002"))
        .stderr(contains("#/components/schemas/node").and(contains("#/components/schemas/tree")));
}

#[test]
fn check_reads_json_documents() {
    routeglue()
        .args(["check", "--spec"])
        .arg(fixture("minimal.json"))
        .assert()
        .success()
        .stdout(contains("GET  /health  -> health"));
}

// ---------------------------------------------------------------------------
// routeglue resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_prints_inlined_document() {
    let output = routeglue()
        .args(["resolve", "--spec"])
        .arg(fixture("documents.yaml"))
        .output()
        .expect("run routeglue");
    assert!(output.status.success());

    let document = stdout_json(&output);
    let item = &document["paths"]["/api/documents/{type}/{id}"];
    assert_eq!(item["parameters"][0]["name"], "type");
    assert_eq!(
        item["get"]["responses"]["4xx"]["content"]["application/json"]["schema"]["type"],
        "object"
    );
    assert!(!String::from_utf8_lossy(&output.stdout).contains("$ref"));
}

#[test]
fn resolve_orphan_reference_exits_one() {
    routeglue()
        .args(["resolve", "--spec"])
        .arg(fixture("orphan-ref.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("E2001"));
}

// ---------------------------------------------------------------------------
// Logging flags
// ---------------------------------------------------------------------------

#[test]
fn json_logs_go_to_stderr() {
    let output = routeglue()
        .args(["--log-level", "info", "--log-format", "json", "check", "--format", "json", "--spec"])
        .arg(fixture("minimal.json"))
        .output()
        .expect("run routeglue");
    assert!(output.status.success());

    stdout_json(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(r#""event":"routes_compiled""#), "stderr: {}", stderr);
}

#[test]
fn log_format_from_environment() {
    routeglue()
        .env("ROUTEGLUE_LOG_FORMAT", "yaml")
        .args(["check", "--spec"])
        .arg(fixture("minimal.json"))
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown log format: yaml"));
}
