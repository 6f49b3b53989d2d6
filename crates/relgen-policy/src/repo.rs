//! Resolved per-(repo, branch) policy

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::document::BranchVals;
use crate::{Error, Result};

/// Timestamps are kept in Unix `date` format, e.g. `Tue May 24 08:30:46 UTC 2022`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S UTC %Y";

/// Fully merged policy for one branch of one repo.
///
/// This is the context template bundles render against, so field names are
/// part of the template contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepoPolicy {
    pub name: String,
    pub branch: String,
    pub description: String,
    pub package_name: String,
    pub binary: String,
    pub pc_repo: String,
    pub dh_repo: String,
    pub cs_repo: String,
    pub default_branch: String,
    pub expose_ports: String,
    pub protected: Vec<String>,
    pub reviewers: Vec<String>,
    /// Bundle name to managed files, global entries first
    pub files: BTreeMap<String, Vec<String>>,
    pub ports: BTreeMap<String, Vec<String>>,
    pub branchvals: BranchVals,
    /// Branch values of every active branch, keyed by branch name
    pub release_branches: BTreeMap<String, BranchVals>,
    /// Generation time, empty until stamped
    pub timestamp: String,
}

impl RepoPolicy {
    /// True when `branch` only accepts changes through a PR.
    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected.iter().any(|b| b == branch)
    }

    /// Branches that commits landing on `branch` are ported to.
    pub fn dest_branches(&self, branch: &str) -> &[String] {
        self.ports.get(branch).map(Vec::as_slice).unwrap_or_default()
    }

    /// Return a copy carrying `at` as its generation timestamp.
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = at.format(TIMESTAMP_FORMAT).to_string();
        self
    }

    /// Stamp with the current time.
    pub fn stamp_now(self) -> Self {
        self.stamped(Utc::now())
    }

    /// Parse the stored timestamp back, `None` when unstamped.
    pub fn timestamp_time(&self) -> Result<Option<DateTime<Utc>>> {
        if self.timestamp.is_empty() {
            return Ok(None);
        }
        let naive = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).map_err(
            |source| Error::InvalidTimestamp {
                value: self.timestamp.clone(),
                source,
            },
        )?;
        Ok(Some(naive.and_utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stamps_in_unix_date_format() {
        let at = Utc.with_ymd_and_hms(2022, 5, 24, 8, 30, 46).unwrap();
        let rp = RepoPolicy::default().stamped(at);
        assert_eq!(rp.timestamp, "Tue May 24 08:30:46 UTC 2022");
        assert_eq!(rp.timestamp_time().unwrap(), Some(at));
    }

    #[test]
    fn unstamped_policy_has_no_time() {
        assert_eq!(RepoPolicy::default().timestamp_time().unwrap(), None);
    }

    #[test]
    fn garbage_timestamp_is_reported() {
        let rp = RepoPolicy {
            timestamp: "yesterday".into(),
            ..Default::default()
        };
        assert!(matches!(
            rp.timestamp_time(),
            Err(Error::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn dest_branches_of_unported_branch_is_empty() {
        let mut rp = RepoPolicy::default();
        rp.ports.insert("master".into(), vec!["release-5".into()]);
        assert_eq!(rp.dest_branches("master"), ["release-5".to_string()]);
        assert!(rp.dest_branches("release-5").is_empty());
    }
}
