//! End-to-end flows across the relgen crates
//!
//! policy document -> resolved branch -> composed bundle -> rendered tree,
//! and variations document -> HTTP query service.

use std::fs;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use relgen_bundle::{Bundle, DirStore, DirWriter, MemoryWriter};
use relgen_fs::NormalizedPath;
use relgen_policy::{PolicyDocument, Resolver};
use relgen_server::{AppState, ServerConfig, VariationServer};
use relgen_test_utils::TemplateTree;
use relgen_test_utils::policy::SAMPLE_POLICY;
use relgen_test_utils::variations::SAMPLE_VARIATIONS;
use tempfile::TempDir;
use tower::ServiceExt;

fn resolver_from_disk(temp: &TempDir) -> Resolver {
    let path = temp.path().join("policy.yaml");
    fs::write(&path, SAMPLE_POLICY).unwrap();
    Resolver::new(PolicyDocument::load(&NormalizedPath::new(&path)).unwrap())
}

#[test]
fn test_render_master_for_every_repo() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver_from_disk(&temp);
    let templates = TemplateTree::sample();

    for rp in resolver.resolve_all("master").unwrap() {
        let store = DirStore::new(NormalizedPath::new(templates.root()));
        let bundle = Bundle::from_features(store, &rp.branchvals.features).unwrap();

        let mut out = MemoryWriter::new();
        let rendered = bundle.render(&rp, &mut out).unwrap();
        assert_eq!(rendered.len(), bundle.count(), "repo {}", rp.name);

        let workflow = out.text(".github/workflows/release.yml").unwrap();
        assert!(workflow.contains(&format!("name: Release {}", rp.name)));
        assert!(workflow.contains(&format!(
            "GO_VERSION: \"{}\"",
            rp.branchvals.go_version
        )));
    }
}

#[test]
fn test_features_decide_the_file_set() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver_from_disk(&temp);
    let templates = TemplateTree::sample();

    let tyk = resolver.resolve("tyk", "master").unwrap();
    let pump = resolver.resolve("tyk-pump", "master").unwrap();

    let files = |features: &[String]| {
        let store = DirStore::new(NormalizedPath::new(templates.root()));
        let bundle = Bundle::from_features(store, features).unwrap();
        let mut out = MemoryWriter::new();
        bundle.render(&tyk, &mut out).unwrap();
        out.into_files()
            .into_keys()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        files(&tyk.branchvals.features),
        vec![
            ".github/workflows/release.yml",
            "ci/Dockerfile.distroless",
            "ci/install.sh"
        ]
    );
    assert_eq!(
        files(&pump.branchvals.features),
        vec![".github/workflows/release.yml", "ci/install.sh"]
    );
}

#[test]
fn test_regenerating_a_tree_is_stable() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver_from_disk(&temp);
    let templates = TemplateTree::sample();
    let rp = resolver
        .resolve("tyk", "release-5-lts")
        .unwrap()
        .stamp_now();

    let out_dir = temp.path().join("out");
    let render = || {
        let store = DirStore::new(NormalizedPath::new(templates.root()));
        let bundle = Bundle::from_features(store, &rp.branchvals.features).unwrap();
        let mut writer = DirWriter::new(NormalizedPath::new(&out_dir));
        bundle.render(&rp, &mut writer).unwrap()
    };

    let first = render();
    let second = render();
    assert_eq!(first, second);

    let workflow = fs::read_to_string(out_dir.join(".github/workflows/release.yml")).unwrap();
    assert!(workflow.contains("branches: [release-5-lts]"));
    assert!(workflow.contains("GO_VERSION: \"1.21\""));
}

#[tokio::test]
async fn test_variations_served_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("variations.yaml");
    fs::write(&path, SAMPLE_VARIATIONS).unwrap();

    let state = AppState::load(NormalizedPath::new(&path), "master").unwrap();
    let server = VariationServer::new(state, ServerConfig::default());

    let request = Request::builder()
        .uri("/variations/repo1/br0/tr1/ts1/pump")
        .body(Body::empty())
        .unwrap();
    let response = server.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let pump: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(pump, serde_json::json!(["tyk-pump"]));
}
