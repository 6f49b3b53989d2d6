//! Three-tier policy resolution

use std::collections::BTreeMap;

use crate::document::{BranchVals, PolicyDocument, RepoSection};
use crate::merge::Overlay;
use crate::repo::RepoPolicy;
use crate::{Error, Result};

/// Resolves [`RepoPolicy`] values from a loaded [`PolicyDocument`].
///
/// The resolver owns its document and holds no other state, so resolving
/// the same `(repo, branch)` twice yields equal results.
#[derive(Debug, Clone)]
pub struct Resolver {
    doc: PolicyDocument,
}

impl Resolver {
    pub fn new(doc: PolicyDocument) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &PolicyDocument {
        &self.doc
    }

    /// Flatten the policy of `branch` in `repo`.
    ///
    /// `branch` need not appear in the repo's branch map; the repo-common
    /// values apply to it unchanged. Only an unknown repo is an error.
    pub fn resolve(&self, repo: &str, branch: &str) -> Result<RepoPolicy> {
        let section = self.section(repo)?;
        let tiers = BranchTiers::new(&self.doc.default, section);

        let mut flat = self.doc.default.clone();
        flat.overlay(section);

        let branchvals = tiers.branch_vals(repo, branch)?;

        let mut release_branches = BTreeMap::new();
        for name in tiers.active_branches() {
            release_branches.insert(name.to_string(), tiers.branch_vals(repo, name)?);
        }

        tracing::debug!(
            repo,
            branch,
            releng_version = %branchvals.releng_version,
            release_branches = release_branches.len(),
            "resolved policy"
        );

        Ok(RepoPolicy {
            name: repo.to_string(),
            branch: branch.to_string(),
            description: flat.description,
            package_name: flat.package_name,
            binary: flat.binary,
            pc_repo: flat.pc_repo,
            dh_repo: flat.dh_repo,
            cs_repo: flat.cs_repo,
            default_branch: flat.default_branch,
            expose_ports: flat.expose_ports,
            protected: flat.protected,
            reviewers: flat.reviewers,
            files: flat.files,
            ports: flat.ports,
            branchvals,
            release_branches,
            timestamp: String::new(),
        })
    }

    /// Resolve `branch` for every repo in the document, in name order.
    pub fn resolve_all(&self, branch: &str) -> Result<Vec<RepoPolicy>> {
        self.doc
            .repos
            .keys()
            .map(|repo| self.resolve(repo, branch))
            .collect()
    }

    /// Resolve every declared branch of every repo and collect the failures.
    ///
    /// An empty result means every `source_branch` chain in the document
    /// terminates.
    pub fn check(&self) -> Vec<Error> {
        let mut problems = Vec::new();
        for (repo, section) in &self.doc.repos {
            let tiers = BranchTiers::new(&self.doc.default, section);
            for branch in tiers.branches.keys() {
                if let Err(e) = tiers.branch_vals(repo, branch) {
                    problems.push(e);
                }
            }
        }
        problems
    }

    fn section(&self, repo: &str) -> Result<&RepoSection> {
        self.doc.repos.get(repo).ok_or_else(|| Error::RepoNotFound {
            repo: repo.to_string(),
            known: self.doc.repo_names().into_iter().map(String::from).collect(),
        })
    }
}

/// Branch values of one repo with the global tier already folded in.
struct BranchTiers {
    common: BranchVals,
    branches: BTreeMap<String, BranchVals>,
}

impl BranchTiers {
    fn new(default: &RepoSection, section: &RepoSection) -> Self {
        let mut common = default.branches.common.clone();
        common.overlay(&section.branches.common);
        let mut branches = default.branches.branch.clone();
        branches.overlay(&section.branches.branch);
        Self { common, branches }
    }

    /// Branches whose merged `active` flag is set.
    fn active_branches(&self) -> impl Iterator<Item = &str> {
        self.branches
            .iter()
            .filter(|(_, over)| over.active.or(self.common.active) == Some(true))
            .map(|(name, _)| name.as_str())
    }

    fn branch_vals(&self, repo: &str, branch: &str) -> Result<BranchVals> {
        let mut vals = self.common.clone();
        if let Some(over) = self.branches.get(branch) {
            vals.overlay(over);
        }
        if vals.releng_version.is_empty() && !vals.source_branch.is_empty() {
            vals.releng_version = self.inherited_releng(repo, branch, &vals.source_branch)?;
        }
        Ok(vals)
    }

    /// Follow `source_branch` links starting at `source` until a branch
    /// declares a `releng_version`.
    ///
    /// `branch` is part of the walk only when its own override names the
    /// source. A common-tier `source_branch` pointing back at `branch` is
    /// looked up like any other name.
    fn inherited_releng(&self, repo: &str, branch: &str, source: &str) -> Result<String> {
        let mut chain = Vec::new();
        if self
            .branches
            .get(branch)
            .is_some_and(|over| !over.source_branch.is_empty())
        {
            chain.push(branch.to_string());
        }
        let mut next = source.to_string();
        loop {
            if chain.contains(&next) {
                chain.push(next);
                return Err(Error::SourceBranchCycle {
                    repo: repo.to_string(),
                    chain,
                });
            }
            let Some(over) = self.branches.get(&next) else {
                return Err(Error::SourceBranchMissing {
                    repo: repo.to_string(),
                    branch: branch.to_string(),
                    missing: next,
                });
            };
            tracing::trace!(repo, branch, via = %next, "following source_branch");
            if !over.releng_version.is_empty() {
                return Ok(over.releng_version.clone());
            }
            if over.source_branch.is_empty() {
                return Ok(self.common.releng_version.clone());
            }
            chain.push(next);
            next = over.source_branch.clone();
        }
    }
}
