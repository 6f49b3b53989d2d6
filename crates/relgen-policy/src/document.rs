//! Policy document model
//!
//! The document is consumed as typed data. Every field is optional in the
//! source file; an unset field never overrides a value from a lower tier.

use std::collections::BTreeMap;
use std::fmt;

use relgen_fs::{ConfigStore, DocumentFormat, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Root of a policy document: global defaults plus one section per repo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyDocument {
    /// Values every repo starts from
    pub default: RepoSection,

    /// Repo name to repo-scoped values
    pub repos: BTreeMap<String, RepoSection>,
}

/// Repo-scoped values. The same shape is used for the global default tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoSection {
    pub description: String,
    pub package_name: String,
    pub binary: String,
    pub pc_repo: String,
    pub dh_repo: String,
    pub cs_repo: String,
    /// The repo's equivalent of `master`
    pub default_branch: String,
    pub expose_ports: String,
    pub reviewers: Vec<String>,
    /// Branches that only accept changes through a PR
    pub protected: Vec<String>,
    /// Bundle name to the files it manages
    pub files: BTreeMap<String, Vec<String>>,
    /// Source branch to the branches its commits are ported to
    pub ports: BTreeMap<String, Vec<String>>,
    pub branches: BranchPolicies,
}

/// Branch values shared by all branches of a repo, plus per-branch overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchPolicies {
    #[serde(flatten)]
    pub common: BranchVals,

    /// Branch name to override values
    pub branch: BTreeMap<String, BranchVals>,
}

/// Parameters specific to a branch. Overrides use the same schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchVals {
    pub go_version: String,
    pub cgo: Option<bool>,
    pub config_file: String,
    /// Versions to test package upgrades from
    pub upgrade_from: Vec<String>,
    /// Bundle features enabled on this branch
    pub features: Vec<String>,
    pub tests: Vec<String>,
    /// Version of the shared automation this branch uses
    pub releng_version: String,
    /// Branch to inherit `releng_version` from when unset
    pub source_branch: String,
    /// Active branches are fanned out into `RepoPolicy::release_branches`
    pub active: Option<bool>,
    pub builds: BTreeMap<String, BuildVals>,
}

/// One build variant of a repo (e.g. `std`, `fips`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildVals {
    pub flags: Vec<String>,
    pub archs: Vec<Arch>,
    pub ci_repo: String,
    pub dh_repo: String,
    pub cs_repo: String,
}

/// Architecture names as the Go toolchain, Debian and Docker spell them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arch {
    pub go: String,
    pub deb: String,
    pub docker: String,
}

impl PolicyDocument {
    /// Load a document from a YAML, JSON or TOML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let doc: Self = ConfigStore::new().load(path)?;
        tracing::debug!(%path, repos = doc.repos.len(), "loaded policy document");
        Ok(doc)
    }

    /// Parse a YAML document held in memory.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(ConfigStore::new().parse(
            content,
            DocumentFormat::Yaml,
            &NormalizedPath::new("<inline>"),
        )?)
    }

    /// Names of all repos, sorted.
    pub fn repo_names(&self) -> Vec<&str> {
        self.repos.keys().map(String::as_str).collect()
    }
}

impl fmt::Display for PolicyDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Commits landing on a source branch are ported to its destinations. \
             Protected branches are updated through PRs, other branches directly."
        )?;
        writeln!(f)?;
        writeln!(f, "Protected branches: {:?}", self.default.protected)?;
        writeln!(f, "Common files:")?;
        for (bundle, files) in &self.default.files {
            writeln!(f, " - {}: {}", bundle, files.join(" "))?;
        }
        for (name, repo) in &self.repos {
            writeln!(f, "{}", name)?;
            if !repo.files.is_empty() {
                writeln!(f, " Extra files:")?;
                for (bundle, files) in &repo.files {
                    writeln!(f, "   - {}: {}", bundle, files.join(" "))?;
                }
            }
            if !repo.ports.is_empty() {
                writeln!(f, " Ports:")?;
                for (src, dests) in &repo.ports {
                    writeln!(f, "   - {} → {}", src, dests.join(", "))?;
                }
            }
            if !repo.branches.branch.is_empty() {
                let names: Vec<&str> = repo.branches.branch.keys().map(String::as_str).collect();
                writeln!(f, " Branches: {}", names.join(", "))?;
            }
        }
        Ok(())
    }
}
