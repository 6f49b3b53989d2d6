//! Flattened variations and their queries

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::document::VariationRecord;
use crate::field::VariationField;
use crate::{Error, Result};

/// Branch used by [`TestsuiteVariations`] when a branch has no variations.
pub const DEFAULT_BRANCH: &str = "master";

/// Address of one testsuite record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VariationPath {
    pub branch: String,
    pub trigger: String,
    pub testsuite: String,
}

impl VariationPath {
    pub fn new(branch: &str, trigger: &str, testsuite: &str) -> Self {
        Self {
            branch: branch.to_string(),
            trigger: trigger.to_string(),
            testsuite: testsuite.to_string(),
        }
    }

    /// Composite `branch-trigger-testsuite` key.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.branch, self.trigger, self.testsuite)
    }
}

/// Every testsuite record of one repo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoVariations {
    leaves: BTreeMap<VariationPath, VariationRecord>,
    paths: Vec<VariationPath>,
}

impl RepoVariations {
    pub(crate) fn insert(&mut self, path: VariationPath, record: VariationRecord) {
        if self.leaves.insert(path.clone(), record).is_none() {
            self.paths.push(path);
        }
    }

    /// Paths in the order they were parsed.
    pub fn paths(&self) -> &[VariationPath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn branches(&self) -> Vec<&str> {
        sorted_unique(self.paths.iter().map(|p| p.branch.as_str()))
    }

    pub fn triggers(&self, branch: &str) -> Vec<&str> {
        sorted_unique(
            self.paths
                .iter()
                .filter(|p| p.branch == branch)
                .map(|p| p.trigger.as_str()),
        )
    }

    pub fn testsuites(&self, branch: &str, trigger: &str) -> Vec<&str> {
        sorted_unique(
            self.paths
                .iter()
                .filter(|p| p.branch == branch && p.trigger == trigger)
                .map(|p| p.testsuite.as_str()),
        )
    }

    pub fn lookup(&self, branch: &str, trigger: &str, testsuite: &str) -> Option<&VariationRecord> {
        self.leaves
            .get(&VariationPath::new(branch, trigger, testsuite))
    }

    /// Like [`lookup`](Self::lookup), falling back to `default_branch` for
    /// the same trigger and testsuite.
    pub fn lookup_or_default(
        &self,
        branch: &str,
        trigger: &str,
        testsuite: &str,
        default_branch: &str,
    ) -> Option<&VariationRecord> {
        self.lookup(branch, trigger, testsuite).or_else(|| {
            tracing::debug!(branch, trigger, testsuite, default_branch, "falling back to default branch");
            self.lookup(default_branch, trigger, testsuite)
        })
    }
}

fn sorted_unique<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = items.collect();
    out.sort_unstable();
    out.dedup();
    out
}

impl Serialize for RepoVariations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let leaves: BTreeMap<String, &VariationRecord> =
            self.leaves.iter().map(|(p, r)| (p.key(), r)).collect();
        let mut state = serializer.serialize_struct("RepoVariations", 2)?;
        state.serialize_field("leaves", &leaves)?;
        state.serialize_field("paths", &self.paths)?;
        state.end()
    }
}

/// Variations of every repo in one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestsuiteVariations {
    #[serde(flatten)]
    repos: BTreeMap<String, RepoVariations>,
    #[serde(skip)]
    default_branch: String,
}

impl Default for TestsuiteVariations {
    fn default() -> Self {
        Self {
            repos: BTreeMap::new(),
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl TestsuiteVariations {
    /// Branch consulted when a lookup names a branch with no variations.
    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }

    pub(crate) fn insert(&mut self, repo: String, variations: RepoVariations) {
        self.repos.insert(repo, variations);
    }

    pub fn repos(&self) -> Vec<&str> {
        self.repos.keys().map(String::as_str).collect()
    }

    pub fn repo(&self, repo: &str) -> Result<&RepoVariations> {
        self.repos.get(repo).ok_or_else(|| Error::RepoNotFound {
            repo: repo.to_string(),
        })
    }

    /// Record for a testsuite, using the default branch when `branch` has
    /// no record for this trigger and testsuite.
    pub fn lookup(
        &self,
        repo: &str,
        branch: &str,
        trigger: &str,
        testsuite: &str,
    ) -> Result<&VariationRecord> {
        self.repo(repo)?
            .lookup_or_default(branch, trigger, testsuite, &self.default_branch)
            .ok_or_else(|| Error::VariationNotFound {
                repo: repo.to_string(),
                branch: branch.to_string(),
                trigger: trigger.to_string(),
                testsuite: testsuite.to_string(),
            })
    }

    /// One field of a testsuite record as JSON.
    pub fn query(
        &self,
        repo: &str,
        branch: &str,
        trigger: &str,
        testsuite: &str,
        field: &str,
    ) -> Result<serde_json::Value> {
        let field: VariationField = field.parse()?;
        let record = self.lookup(repo, branch, trigger, testsuite)?;
        field.value(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo() -> RepoVariations {
        let mut rv = RepoVariations::default();
        for (b, t, ts) in [
            ("master", "push", "ts1"),
            ("master", "push", "ts0"),
            ("release-5", "pull_request", "ts0"),
            ("master", "pull_request", "ts0"),
        ] {
            rv.insert(
                VariationPath::new(b, t, ts),
                VariationRecord {
                    pump: vec![format!("{b}/{t}/{ts}")],
                    ..Default::default()
                },
            );
        }
        rv
    }

    #[test]
    fn projections_are_sorted_and_unique() {
        let rv = repo();
        assert_eq!(rv.branches(), vec!["master", "release-5"]);
        assert_eq!(rv.triggers("master"), vec!["pull_request", "push"]);
        assert_eq!(rv.testsuites("master", "push"), vec!["ts0", "ts1"]);
        assert!(rv.testsuites("nope", "push").is_empty());
    }

    #[test]
    fn lookup_falls_back_to_default_branch() {
        let rv = repo();
        assert!(rv.lookup("feature", "push", "ts0").is_none());
        let rec = rv
            .lookup_or_default("feature", "push", "ts0", "master")
            .unwrap();
        assert_eq!(rec.pump, vec!["master/push/ts0"]);
    }

    #[test]
    fn serializes_with_composite_keys() {
        let value = serde_json::to_value(repo()).unwrap();
        assert_eq!(value["leaves"]["master-push-ts0"]["pump"][0], "master/push/ts0");
        assert_eq!(value["paths"][0]["testsuite"], "ts1");
    }

    #[test]
    fn unknown_repo_and_path_are_not_found() {
        let mut tv = TestsuiteVariations::default();
        tv.insert("tyk".into(), repo());

        assert!(tv.lookup("nope", "master", "push", "ts0").unwrap_err().is_not_found());
        assert!(tv.lookup("tyk", "master", "push", "ts9").unwrap_err().is_not_found());
        assert!(matches!(
            tv.query("tyk", "master", "push", "ts0", "colour"),
            Err(Error::UnknownField { .. })
        ));
        assert_eq!(
            tv.query("tyk", "release-9", "push", "ts1", "pump").unwrap(),
            serde_json::json!(["master/push/ts1"])
        );
    }
}
