//! CLI end-to-end tests that invoke the compiled `relgen` binary.
//!
//! Each test runs in its own temporary project directory holding a policy
//! document and a variations document. `XDG_CONFIG_HOME` points into the
//! project so a user-level config file never leaks in.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use relgen_test_utils::TemplateTree;
use relgen_test_utils::policy::{BROKEN_POLICY, SAMPLE_POLICY};
use relgen_test_utils::variations::{CHAIN_VARIATIONS, SAMPLE_VARIATIONS};

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("policy.yaml").write_str(SAMPLE_POLICY).unwrap();
    dir.child("variations.yaml").write_str(SAMPLE_VARIATIONS).unwrap();
    dir
}

fn relgen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("relgen").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RELGEN_CONFIG")
        .env_remove("RELGEN_POLICY")
        .env_remove("RELGEN_VARIATIONS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_exits_zero() {
    let dir = project();
    relgen(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("policy"))
        .stdout(predicate::str::contains("variations"));
}

#[test]
fn policy_resolve_json_follows_source_chain() {
    let dir = project();
    let out = relgen(dir.path())
        .args(["policy", "resolve", "--repo", "tyk", "--branch", "release-4", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let rp: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(rp["name"], "tyk");
    assert_eq!(rp["branchvals"]["releng_version"], "v1");
}

#[test]
fn policy_resolve_unknown_repo_fails_with_one_line() {
    let dir = project();
    relgen(dir.path())
        .args(["policy", "resolve", "--repo", "nope", "--branch", "master"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: repo nope unknown"));
}

#[test]
fn policy_check_passes_on_clean_document() {
    let dir = project();
    relgen(dir.path())
        .args(["policy", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn policy_check_lists_every_problem() {
    let dir = project();
    dir.child("broken.yaml").write_str(BROKEN_POLICY).unwrap();
    relgen(dir.path())
        .args(["policy", "check", "--policy", "broken.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("ghost"))
        .stdout(predicate::str::contains("cycle"))
        .stderr(predicate::str::contains("3 configuration error(s)"));
}

#[test]
fn project_settings_file_is_used() {
    let dir = project();
    dir.child("conf/other.yaml").write_str(BROKEN_POLICY).unwrap();
    dir.child("relgen.toml")
        .write_str("policy = \"conf/other.yaml\"\n")
        .unwrap();
    relgen(dir.path())
        .args(["policy", "check"])
        .assert()
        .failure();
}

#[test]
fn bundle_list_shows_tree_and_count() {
    let dir = project();
    let templates = TemplateTree::sample();
    let root = templates.root().to_str().unwrap();

    relgen(dir.path())
        .args(["bundle", "list", "--templates", root])
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 files)"))
        .stdout(predicate::str::contains("header.tmpl"));

    relgen(dir.path())
        .args(["bundle", "list", "--templates", root, "-f", "releng"])
        .assert()
        .success()
        .stdout(predicate::str::contains("releng (2 files)"));
}

#[test]
fn bundle_gen_renders_resolved_features() {
    let dir = project();
    let templates = TemplateTree::sample();
    let root = templates.root().to_str().unwrap();

    relgen(dir.path())
        .args(["bundle", "gen", "--templates", root, "--repo", "tyk", "--branch", "master", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered"));

    let workflow = fs::read_to_string(dir.path().join("out/.github/workflows/release.yml")).unwrap();
    assert!(workflow.contains("name: Release tyk"));
    assert!(workflow.contains("GO_VERSION: \"1.22\""));
    assert!(workflow.starts_with("# Generated by relgen for tyk"));

    dir.child("out/ci/Dockerfile.distroless")
        .assert(predicate::str::contains("COPY tyk /opt/tyk"));
    dir.child("out/ci/install.sh")
        .assert(predicate::str::contains("installing tyk-gateway"));
}

#[test]
fn bundle_gen_only_to_stdout() {
    let dir = project();
    let templates = TemplateTree::sample();
    let root = templates.root().to_str().unwrap();

    relgen(dir.path())
        .args([
            "bundle", "gen", "--templates", root, "--repo", "tyk", "--branch", "master",
            "--only", "ci", "-",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("==> ci/install.sh <=="))
        .stdout(predicate::str::contains("COPY tyk /opt/tyk"))
        .stdout(predicate::str::contains("release.yml").not());
}

#[test]
fn bundle_gen_keep_going_reports_failures() {
    let dir = project();
    let templates = TemplateTree::sample().file("releng/ci/broken.sh", "{{ no_such_key }}\n");
    let root = templates.root().to_str().unwrap();

    relgen(dir.path())
        .args([
            "bundle", "gen", "--templates", root, "--repo", "tyk", "--branch", "master",
            "--keep-going", "out",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 failed"));

    dir.child("out/ci/install.sh").assert(predicate::path::exists());
    dir.child("out/ci/broken.sh").assert(predicate::path::missing());
}

#[test]
fn variations_get_prints_field_json() {
    let dir = project();
    relgen(dir.path())
        .args(["variations", "get", "repo0", "br0", "tr0", "ts0", "pump"])
        .assert()
        .success()
        .stdout("[\"tyk-pump\",\"$LATEST\"]\n");
}

#[test]
fn variations_outputs_emit_heredocs() {
    let dir = project();
    relgen(dir.path())
        .args(["variations", "outputs", "repo0", "br0", "tr0", "ts0", "sink"])
        .assert()
        .success()
        .stdout("sink<<EOF\n[\"tyk-sink\"]\nEOF\n");
}

#[test]
fn variations_unknown_field_fails() {
    let dir = project();
    relgen(dir.path())
        .args(["variations", "get", "repo0", "br0", "tr0", "ts0", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variation field"));
}

#[test]
fn variations_dump_is_json() {
    let dir = project();
    let out = relgen(dir.path())
        .args(["variations", "dump"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(value["repo1"]["leaves"]["br0-tr1-ts0"].is_object());
}

#[test]
fn variations_dump_dir_is_keyed_by_file() {
    let dir = project();
    let docs = dir.child("matrices");
    docs.child("gateway.yml").write_str(SAMPLE_VARIATIONS).unwrap();
    docs.child("chain.yaml").write_str(CHAIN_VARIATIONS).unwrap();
    docs.child("README.md").write_str("not a matrix").unwrap();

    let out = relgen(dir.path())
        .args(["variations", "dump", "--dir", "matrices"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let files: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(files, vec!["chain.yaml", "gateway.yml"]);
    assert_eq!(
        value["chain.yaml"]["repo"]["leaves"]["br0-tr0-ts0"]["pump"],
        serde_json::json!(["a", "b", "c"])
    );
}

#[test]
fn variations_dump_dir_without_documents_fails() {
    let dir = project();
    dir.child("empty/notes.txt").write_str("nothing here").unwrap();
    relgen(dir.path())
        .args(["variations", "dump", "--dir", "empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no loadable variation files"));
}
