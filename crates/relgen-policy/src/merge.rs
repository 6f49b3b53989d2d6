//! Tier merging
//!
//! [`Overlay`] implements "only overwrite non-empty fields": a higher tier
//! that leaves a field unset never blanks the value from a lower tier.

use std::collections::BTreeMap;

use crate::document::{BranchVals, BuildVals, RepoSection};

/// Merge a higher-precedence value on top of `self`.
pub trait Overlay {
    fn overlay(&mut self, other: &Self);
}

impl Overlay for String {
    fn overlay(&mut self, other: &Self) {
        if !other.is_empty() {
            self.clone_from(other);
        }
    }
}

impl<T: Clone> Overlay for Vec<T> {
    fn overlay(&mut self, other: &Self) {
        if !other.is_empty() {
            self.clone_from(other);
        }
    }
}

impl<T: Clone> Overlay for Option<T> {
    fn overlay(&mut self, other: &Self) {
        if other.is_some() {
            self.clone_from(other);
        }
    }
}

impl<V: Clone + Overlay> Overlay for BTreeMap<String, V> {
    fn overlay(&mut self, other: &Self) {
        for (key, value) in other {
            match self.get_mut(key) {
                Some(existing) => existing.overlay(value),
                None => {
                    self.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl Overlay for BuildVals {
    fn overlay(&mut self, other: &Self) {
        self.flags.overlay(&other.flags);
        self.archs.overlay(&other.archs);
        self.ci_repo.overlay(&other.ci_repo);
        self.dh_repo.overlay(&other.dh_repo);
        self.cs_repo.overlay(&other.cs_repo);
    }
}

impl Overlay for BranchVals {
    fn overlay(&mut self, other: &Self) {
        self.go_version.overlay(&other.go_version);
        self.cgo.overlay(&other.cgo);
        self.config_file.overlay(&other.config_file);
        self.upgrade_from.overlay(&other.upgrade_from);
        self.features.overlay(&other.features);
        self.tests.overlay(&other.tests);
        self.releng_version.overlay(&other.releng_version);
        self.source_branch.overlay(&other.source_branch);
        self.active.overlay(&other.active);
        self.builds.overlay(&other.builds);
    }
}

/// Repo-level merge of `default` < `repo`. Branch values are merged by the
/// resolver, so `branches` is left untouched here.
impl Overlay for RepoSection {
    fn overlay(&mut self, other: &Self) {
        self.description.overlay(&other.description);
        self.package_name.overlay(&other.package_name);
        self.binary.overlay(&other.binary);
        self.pc_repo.overlay(&other.pc_repo);
        self.dh_repo.overlay(&other.dh_repo);
        self.cs_repo.overlay(&other.cs_repo);
        self.default_branch.overlay(&other.default_branch);
        self.expose_ports.overlay(&other.expose_ports);
        self.reviewers = union(&self.reviewers, &other.reviewers);
        self.protected = union(&self.protected, &other.protected);
        for (bundle, files) in &other.files {
            let merged = self.files.entry(bundle.clone()).or_default();
            *merged = union(merged, files);
        }
        self.ports.overlay(&other.ports);
    }
}

/// `base` followed by the entries of `extra` not already present.
///
/// Order is preserved and the first occurrence of a duplicate wins.
pub fn union(base: &[String], extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(base.len() + extra.len());
    for item in base.iter().chain(extra) {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged
}
