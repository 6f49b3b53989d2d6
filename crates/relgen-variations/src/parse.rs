//! Flattening saved matrices into testsuite records

use std::collections::BTreeMap;
use std::fmt;

use crate::document::{SavedMatrix, VariationRecord, VariationTree};
use crate::repo::{RepoVariations, TestsuiteVariations, VariationPath};

const BRANCH: usize = 0;
const TRIGGER: usize = 1;
const TESTSUITE: usize = 2;

/// Levels found below a testsuite. They are ignored; the testsuite record
/// itself is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralWarning {
    pub repo: String,
    /// Names from the branch down to the testsuite
    pub path: Vec<String>,
    /// Names of the ignored levels
    pub ignored: Vec<String>,
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "repo {}: cannot parse variation levels below testsuite {}, ignoring {}",
            self.repo,
            self.path.join("/"),
            self.ignored.join(", ")
        )
    }
}

/// Result of [`parse`].
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub variations: TestsuiteVariations,
    pub warnings: Vec<StructuralWarning>,
}

/// Unroll a saved document into per-repo testsuite records.
///
/// The document's own payload is inherited by every repo. Going down,
/// each level's values come after everything it inherits.
pub fn parse(doc: &SavedMatrix) -> Parsed {
    let mut parsed = Parsed::default();
    for (repo, matrix) in &doc.level {
        let tree = VariationTree::from(matrix.clone());
        let inherited = doc.payload.inherited_by(tree.payload());

        let mut walker = Walker {
            repo,
            variations: RepoVariations::default(),
            warnings: &mut parsed.warnings,
            path: Vec::with_capacity(3),
        };
        if let Some(children) = tree.children() {
            walker.descend(children, &inherited, BRANCH);
        }
        tracing::debug!(repo = %repo, testsuites = walker.variations.len(), "parsed variations");
        let variations = walker.variations;
        parsed.variations.insert(repo.clone(), variations);
    }
    parsed
}

struct Walker<'a> {
    repo: &'a str,
    variations: RepoVariations,
    warnings: &'a mut Vec<StructuralWarning>,
    path: Vec<String>,
}

impl Walker<'_> {
    fn descend(
        &mut self,
        children: &BTreeMap<String, VariationTree>,
        parent: &VariationRecord,
        depth: usize,
    ) {
        for (name, child) in children {
            let record = parent.inherited_by(child.payload());
            self.path.push(name.clone());
            match (depth, child.children()) {
                (BRANCH | TRIGGER, Some(grandchildren)) => {
                    self.descend(grandchildren, &record, depth + 1);
                }
                (BRANCH | TRIGGER, None) => {}
                (_, deeper) => {
                    let path = VariationPath::new(&self.path[0], &self.path[1], &self.path[2]);
                    self.variations.insert(path, record);
                    if let Some(deeper) = deeper {
                        self.warn(deeper);
                    }
                }
            }
            self.path.pop();
        }
    }

    fn warn(&mut self, deeper: &BTreeMap<String, VariationTree>) {
        let warning = StructuralWarning {
            repo: self.repo.to_string(),
            path: self.path.clone(),
            ignored: deeper.keys().cloned().collect(),
        };
        tracing::warn!(%warning, "variation levels > {} ignored", TESTSUITE);
        self.warnings.push(warning);
    }
}
