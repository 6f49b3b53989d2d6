//! Saved variation documents and the in-memory tree

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Environment a testsuite runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvFile {
    pub cache: String,
    pub db: String,
    pub config: String,
    pub apimarkers: String,
    pub uimarkers: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Distros {
    pub deb: Vec<String>,
    pub rpm: Vec<String>,
}

/// Values held at one point of the matrix. Flattened testsuite records have
/// this shape too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationRecord {
    pub envfiles: Vec<EnvFile>,
    pub pump: Vec<String>,
    pub sink: Vec<String>,
    pub distros: Distros,
}

/// The compact saved form: a payload plus the next level, keyed by name.
///
/// At the top of a document the levels are repos; below that they are
/// branches, triggers and testsuites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedMatrix {
    #[serde(flatten)]
    pub payload: VariationRecord,
    pub level: BTreeMap<String, SavedMatrix>,
}

/// A matrix node is either a leaf carrying values or a level with children.
#[derive(Debug, Clone, PartialEq)]
pub enum VariationTree {
    Leaf(VariationRecord),
    Level {
        payload: VariationRecord,
        children: BTreeMap<String, VariationTree>,
    },
}

impl VariationRecord {
    /// `self` inherited by `child`: parent entries first, then the child's.
    ///
    /// `pump`, `sink` and the distro lists keep the first occurrence of a
    /// repeated entry; `envfiles` keeps every entry.
    pub fn inherited_by(&self, child: &VariationRecord) -> VariationRecord {
        let mut envfiles = self.envfiles.clone();
        envfiles.extend(child.envfiles.iter().cloned());
        VariationRecord {
            envfiles,
            pump: dedup_append(&self.pump, &child.pump),
            sink: dedup_append(&self.sink, &child.sink),
            distros: Distros {
                deb: dedup_append(&self.distros.deb, &child.distros.deb),
                rpm: dedup_append(&self.distros.rpm, &child.distros.rpm),
            },
        }
    }
}

fn dedup_append(parent: &[String], child: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(parent.len() + child.len());
    for item in parent.iter().chain(child) {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

impl VariationTree {
    pub fn payload(&self) -> &VariationRecord {
        match self {
            Self::Leaf(payload) | Self::Level { payload, .. } => payload,
        }
    }

    /// Children of a level, empty for a leaf.
    pub fn children(&self) -> Option<&BTreeMap<String, VariationTree>> {
        match self {
            Self::Leaf(_) => None,
            Self::Level { children, .. } => Some(children),
        }
    }
}

impl From<SavedMatrix> for VariationTree {
    fn from(saved: SavedMatrix) -> Self {
        if saved.level.is_empty() {
            return Self::Leaf(saved.payload);
        }
        Self::Level {
            payload: saved.payload,
            children: saved
                .level
                .into_iter()
                .map(|(name, child)| (name, child.into()))
                .collect(),
        }
    }
}
