//! Bundle tree nodes

use relgen_fs::NormalizedPath;

/// One file or directory of a bundle.
///
/// A node is a leaf iff it has no children. Leaves carry the store key of
/// their template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleNode {
    pub name: String,
    /// Output path relative to the render destination
    pub path: NormalizedPath,
    pub source: Option<NormalizedPath>,
    pub children: Vec<BundleNode>,
}

impl BundleNode {
    pub(crate) fn root() -> Self {
        Self::directory("", NormalizedPath::new(""))
    }

    pub(crate) fn directory(name: &str, path: NormalizedPath) -> Self {
        Self {
            name: name.to_string(),
            path,
            source: None,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when the node holds fragments for another leaf.
    pub fn is_container(&self, suffix: &str) -> bool {
        !self.name.is_empty() && self.name.ends_with(suffix)
    }

    pub fn child(&self, name: &str) -> Option<&BundleNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Depth-first pre-order search for a node called `name`.
    pub fn find_named(&self, name: &str) -> Option<&BundleNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_named(name))
    }

    /// Every leaf below this node, depth first.
    pub fn leaves(&self) -> Vec<&BundleNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a BundleNode>) {
        if self.is_leaf() {
            if self.source.is_some() {
                out.push(self);
            }
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    pub(crate) fn write_tree(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        indent: usize,
    ) -> std::fmt::Result {
        writeln!(f, "{}{}", "  ".repeat(indent), self.name)?;
        for child in &self.children {
            child.write_tree(f, indent + 1)?;
        }
        Ok(())
    }
}
