//! Rendering bundles from on-disk template stores

use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use relgen_bundle::{Bundle, DirStore, DirWriter, Error, MemoryWriter};
use relgen_policy::{PolicyDocument, Resolver};
use relgen_test_utils::TemplateTree;
use relgen_test_utils::policy::SAMPLE_POLICY;
use serde_json::json;

fn tyk_master() -> relgen_policy::RepoPolicy {
    Resolver::new(PolicyDocument::from_yaml_str(SAMPLE_POLICY).unwrap())
        .resolve("tyk", "master")
        .unwrap()
}

#[test]
fn leaf_renders_with_its_fragment() {
    let tree = TemplateTree::new()
        .file("foo", "x is {{ X }}\n{% include \"bar.tmpl\" %}")
        .file("foo.d/bar.tmpl", "bar has {{ X }}\n");
    let bundle = Bundle::from_store("t", DirStore::new(tree.root())).unwrap();

    let mut out = MemoryWriter::new();
    bundle.render(&json!({"X": 1}), &mut out).unwrap();

    assert_eq!(out.text("foo"), Some("x is 1\nbar has 1\n"));
    assert_eq!(out.files().len(), 1);
}

#[test]
fn custom_suffix_decides_which_directories_are_containers() {
    let tree = TemplateTree::new()
        .file("foo", "x is {{ X }}\n{% include \"bar.tmpl\" %}")
        .file("foo.frag/bar.tmpl", "bar has {{ X }}\n")
        .file("baz", "baz\n")
        .file("baz.d/notes.txt", "plain {{ X }}\n");
    let bundle = Bundle::builder("t")
        .suffix(".frag")
        .build(DirStore::new(tree.root()))
        .unwrap();
    assert_eq!(bundle.suffix(), ".frag");
    assert_eq!(bundle.count(), 3);

    let mut out = MemoryWriter::new();
    bundle.render(&json!({"X": 1}), &mut out).unwrap();

    assert_eq!(out.text("foo"), Some("x is 1\nbar has 1\n"));
    assert_eq!(out.text("baz"), Some("baz\n"));
    assert_eq!(out.text("baz.d/notes.txt"), Some("plain 1\n"));
    assert!(out.text("foo.frag/bar.tmpl").is_none());
}

#[test]
fn key_missing_from_fragment_fails_only_that_leaf() {
    let tree = TemplateTree::new()
        .file("foo", "{{ X }}\n{% include \"bar.tmpl\" %}")
        .file("foo.d/bar.tmpl", "{{ Y }}\n")
        .file("other", "{{ X }}\n");
    let bundle = Bundle::from_store("t", DirStore::new(tree.root())).unwrap();

    let mut out = MemoryWriter::new();
    let report = bundle.render_all(&json!({"X": 1}), &mut out);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path.as_str(), "foo");
    assert!(matches!(report.failures[0].error, Error::Template { .. }));
    assert_eq!(out.text("other"), Some("1\n"));
    assert!(out.text("foo").is_none());

    // the default driver stops at the first failure
    let err = bundle
        .render(&json!({"X": 1}), &mut MemoryWriter::new())
        .unwrap_err();
    assert!(err.to_string().contains("foo"), "got: {err}");
}

#[test]
fn sample_features_render_from_resolved_policy() {
    let tree = TemplateTree::sample();
    let rp = tyk_master();
    let bundle =
        Bundle::from_features(DirStore::new(tree.root()), rp.branchvals.features.as_slice()).unwrap();
    assert_eq!(bundle.name(), "releng-distroless");
    assert_eq!(bundle.count(), 3);

    let dest = assert_fs::TempDir::new().unwrap();
    let files = bundle.render(&rp, &mut DirWriter::new(dest.path())).unwrap();
    assert_eq!(files.len(), 3);

    dest.child(".github/workflows/release.yml")
        .assert(predicate::str::contains("name: Release tyk"))
        .assert(predicate::str::contains("GO_VERSION: \"1.22\""))
        .assert(predicate::str::contains("# Generated by relgen for tyk"));
    dest.child("ci/install.sh")
        .assert(predicate::str::contains("installing tyk-gateway"));
    dest.child("ci/Dockerfile.distroless")
        .assert(predicate::str::contains("COPY tyk /opt/tyk"));
    dest.child(".github/workflows/release.yml.d")
        .assert(predicate::path::missing());
}

#[test]
fn rendering_twice_is_byte_identical() {
    let tree = TemplateTree::sample();
    let rp = tyk_master();
    let bundle = Bundle::from_features(DirStore::new(tree.root()), &["releng"]).unwrap();

    let mut first = MemoryWriter::new();
    let mut second = MemoryWriter::new();
    let a = bundle.render(&rp, &mut first).unwrap();
    let b = bundle.render(&rp, &mut second).unwrap();

    assert_eq!(first.files(), second.files());
    assert_eq!(a, b);
}

#[test]
fn timestamp_is_available_to_templates() {
    let tree = TemplateTree::new().file("STAMP", "{{ timestamp }}");
    let bundle = Bundle::from_store("t", DirStore::new(tree.root())).unwrap();
    let rp = tyk_master().stamp_now();

    let mut out = MemoryWriter::new();
    bundle.render(&rp, &mut out).unwrap();
    assert_eq!(out.text("STAMP"), Some(rp.timestamp.as_str()));
}

#[test]
fn release_branches_fan_out_in_templates() {
    let tree = TemplateTree::new().file(
        "backports.txt",
        "{% for name, vals in release_branches|items %}{{ name }}={{ vals.go_version }}\n{% endfor %}",
    );
    let bundle = Bundle::from_store("t", DirStore::new(tree.root())).unwrap();

    let mut out = MemoryWriter::new();
    bundle.render(&tyk_master(), &mut out).unwrap();
    assert_eq!(
        out.text("backports.txt"),
        Some("master=1.22\nrelease-5-lts=1.21\n")
    );
}
