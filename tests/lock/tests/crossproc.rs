//! Cross-process determinism test for query reports.
//!
//! Writes request files to a temp directory, spawns the `query_fixture`
//! binary under several environment variants, and asserts every variant
//! prints the same lines as the in-process runner.

use std::path::Path;
use std::process::Command;

use lock_tests::graph_fixtures::{duplicate_edge_request, triangle_request};
use meridian_harness::request::GraphRequest;
use meridian_harness::runner::run_query;

const BIN: &str = env!("CARGO_BIN_EXE_query_fixture");

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn write_request(dir: &Path, name: &str, request: &GraphRequest) -> String {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(request).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

fn run_variant(request_path: &str, work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let mut command = Command::new(BIN);
    command
        .arg(request_path)
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {BIN} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "query_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

fn assert_variants_agree(request_path: &str, scratch: &str) -> String {
    let root = workspace_root();
    let baseline = run_variant(request_path, &root, &[]);
    let variants: [(&str, &[(&str, &str)]); 3] = [
        (scratch, &[]),
        (root.as_str(), &[("LC_ALL", "C"), ("LANG", "C")]),
        (root.as_str(), &[("RUST_LOG", "trace")]),
    ];
    for (dir, env) in variants {
        assert_eq!(
            run_variant(request_path, dir, env),
            baseline,
            "variant (dir={dir}, env={env:?}) diverged"
        );
    }
    baseline
}

fn line<'a>(output: &'a str, key: &str) -> &'a str {
    output
        .lines()
        .find_map(|l| l.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')))
        .unwrap_or_else(|| panic!("output missing {key}: {output}"))
}

#[test]
fn found_report_digests_match_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let request = triangle_request("A", "C");
    let path = write_request(dir.path(), "triangle.json", &request);
    let scratch = dir.path().to_string_lossy().to_string();

    let output = assert_variants_agree(&path, &scratch);
    assert_eq!(line(&output, "outcome"), "found");
    assert_eq!(line(&output, "total_cost"), "5");
    assert_eq!(line(&output, "path"), "A,C");

    let outcome = run_query(&request).unwrap();
    assert_eq!(line(&output, "report_digest"), outcome.digest().unwrap().as_str());
    assert_eq!(
        line(&output, "trace_digest"),
        outcome.trace().digest().unwrap().as_str()
    );
    assert_eq!(line(&output, "graph_digest"), outcome.graph_digest().as_str());
    assert_eq!(
        line(&output, "expansions"),
        outcome.stats().expansions.to_string()
    );
}

#[test]
fn no_path_report_matches_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_request(dir.path(), "reverse.json", &triangle_request("C", "A"));
    let scratch = dir.path().to_string_lossy().to_string();

    let output = assert_variants_agree(&path, &scratch);
    assert_eq!(line(&output, "outcome"), "no_path");
    assert_eq!(line(&output, "total_cost"), "none");
    assert_eq!(line(&output, "path"), "");
    assert!(line(&output, "report_digest").starts_with("sha256:"));
}

#[test]
fn distinct_requests_have_distinct_digests() {
    let dir = tempfile::tempdir().unwrap();
    let scratch = dir.path().to_string_lossy().to_string();
    let a = write_request(dir.path(), "a.json", &triangle_request("A", "C"));
    let b = write_request(dir.path(), "b.json", &duplicate_edge_request());

    let out_a = run_variant(&a, &scratch, &[]);
    let out_b = run_variant(&b, &scratch, &[]);
    assert_ne!(line(&out_a, "graph_digest"), line(&out_b, "graph_digest"));
    assert_ne!(line(&out_a, "report_digest"), line(&out_b, "report_digest"));
}

#[test]
fn invalid_request_fails_without_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_request(dir.path(), "bad.json", &triangle_request("A", "nowhere"));

    let output = Command::new(BIN).arg(&path).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid goal reference"));
}
