//! Sample policy documents

/// Two healthy repos covering every merge tier.
///
/// - `tyk`: `release-4 -> release-4-lts -> release-3` source chain where
///   only `release-3` sets `releng_version: v1`; `release-5-lts` inherits
///   `v2` from `master`; `master` and `release-5-lts` are active.
/// - `tyk-pump`: repo-common values only plus an active `master`.
pub const SAMPLE_POLICY: &str = r#"
default:
  description: Managed by relgen
  default_branch: master
  protected: [master]
  reviewers: [release-eng]
  files:
    ci:
      - .github/workflows/release.yml
      - .goreleaser.yml
  branches:
    go_version: "1.21"
    cgo: false
    features: [releng]
repos:
  tyk:
    description: Tyk API Gateway
    package_name: tyk-gateway
    binary: tyk
    dh_repo: tykio/tyk-gateway
    protected: [release-5-lts, master]
    reviewers: [gateway-team]
    files:
      ci:
        - ci/Dockerfile.std
    ports:
      master: [release-5-lts]
    branches:
      go_version: "1.22"
      features: [releng, distroless]
      builds:
        std:
          flags: ["-tags=goplugin"]
          archs:
            - {go: amd64, deb: amd64, docker: linux/amd64}
            - {go: arm64, deb: arm64, docker: linux/arm64}
          ci_repo: tyk-ee
          dh_repo: tykio/tyk-gateway
      branch:
        master:
          releng_version: v2
          active: true
        release-5-lts:
          go_version: "1.21"
          source_branch: master
          active: true
        release-4:
          source_branch: release-4-lts
        release-4-lts:
          source_branch: release-3
        release-3:
          releng_version: v1
          active: false
  tyk-pump:
    description: Tyk Pump
    package_name: tyk-pump
    binary: tyk-pump
    branches:
      branch:
        master:
          releng_version: v2
          active: true
"#;

/// A document whose `source_branch` links are broken in two ways.
///
/// `orphan` points at a branch that does not exist and `ping`/`pong`
/// reference each other.
pub const BROKEN_POLICY: &str = r#"
repos:
  gateway:
    branches:
      branch:
        master:
          releng_version: v2
        orphan:
          source_branch: ghost
        ping:
          source_branch: pong
        pong:
          source_branch: ping
"#;
