//! Branch policy resolution for relgen
//!
//! A policy document describes every managed repository in three tiers:
//! global defaults, repo-scoped values, and per-branch overrides. This crate
//! flattens those tiers into one [`RepoPolicy`] per `(repo, branch)`, which
//! is the context that template bundles render against.
//!
//! # Resolution
//!
//! ```text
//! default.branches  <  repos.<repo>.branches  <  repos.<repo>.branches.branch.<branch>
//! ```
//!
//! Each step only overwrites fields the higher tier actually sets. A branch
//! without a `releng_version` inherits one by following its `source_branch`
//! chain within the same repo.
//!
//! # Example
//!
//! ```
//! use relgen_policy::{PolicyDocument, Resolver};
//!
//! let doc = PolicyDocument::from_yaml_str(r#"
//! repos:
//!   tyk:
//!     branches:
//!       go_version: "1.22"
//!       branch:
//!         master:
//!           releng_version: v2
//!         release-4:
//!           source_branch: master
//! "#).unwrap();
//!
//! let rp = Resolver::new(doc).resolve("tyk", "release-4").unwrap();
//! assert_eq!(rp.branchvals.releng_version, "v2");
//! assert_eq!(rp.branchvals.go_version, "1.22");
//! ```

pub mod document;
pub mod error;
pub mod merge;
pub mod repo;
pub mod resolver;

pub use document::{Arch, BranchPolicies, BranchVals, BuildVals, PolicyDocument, RepoSection};
pub use error::{Error, Result};
pub use merge::Overlay;
pub use repo::RepoPolicy;
pub use resolver::Resolver;
