//! Bundle construction and inspection

use std::fmt;

use relgen_fs::NormalizedPath;

use crate::node::BundleNode;
use crate::store::FragmentStore;
use crate::{Error, Result};

/// Default suffix marking a fragment container directory.
pub const DEFAULT_SUFFIX: &str = ".d";

/// Top-level store directory whose files are shared by every leaf.
pub const SHARED_DIR: &str = "subtemplates";

/// A named template fragment and where its source lives in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Name the fragment is included by
    pub name: String,
    pub source: NormalizedPath,
}

/// A directory-tree-shaped collection of templates.
///
/// Every leaf outside a fragment container renders to one output file at
/// the same relative path. A leaf `foo` is composed with every fragment in
/// the container `foo.d`, wherever that container sits in the tree.
pub struct Bundle {
    pub(crate) name: String,
    pub(crate) root: BundleNode,
    pub(crate) store: Box<dyn FragmentStore>,
    pub(crate) suffix: String,
    pub(crate) shared: Vec<Fragment>,
    pub(crate) validate_yaml: bool,
}

/// Options for building a [`Bundle`].
#[derive(Debug, Clone)]
pub struct BundleBuilder {
    name: String,
    suffix: String,
    validate_yaml: bool,
    features: Option<Vec<String>>,
}

impl BundleBuilder {
    /// Suffix marking fragment containers, `.d` by default.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Check that rendered `*.yml`/`*.yaml` files parse. On by default.
    pub fn validate_yaml(mut self, validate: bool) -> Self {
        self.validate_yaml = validate;
        self
    }

    /// Only take files from these top-level feature directories.
    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(features.into_iter().map(Into::into).collect());
        self
    }

    /// A bundle with no nodes, to be filled through [`Bundle::add`].
    pub fn empty(self, store: impl FragmentStore + 'static) -> Bundle {
        Bundle {
            name: self.name,
            root: BundleNode::root(),
            store: Box::new(store),
            suffix: self.suffix,
            shared: Vec::new(),
            validate_yaml: self.validate_yaml,
        }
    }

    /// Populate the bundle from the store listing.
    ///
    /// Files under `subtemplates/` become shared fragments. Without features
    /// every other key becomes a node at its own path; with features, keys
    /// under each `<feature>/` directory are added with the prefix removed.
    pub fn build(self, store: impl FragmentStore + 'static) -> Result<Bundle> {
        let features = self.features.clone();
        let mut bundle = self.empty(store);
        let keys = bundle.store.list()?;

        let shared_root = NormalizedPath::new(SHARED_DIR);
        let mut regular = Vec::new();
        for key in keys {
            match key.strip_prefix(&shared_root) {
                Some(rel) if !rel.as_str().is_empty() => bundle.shared.push(Fragment {
                    name: rel.to_string(),
                    source: key,
                }),
                _ => regular.push(key),
            }
        }

        match features {
            None => {
                for key in regular {
                    bundle.add(key.as_str(), key.clone())?;
                }
            }
            Some(features) => {
                for feature in &features {
                    let prefix = NormalizedPath::new(feature);
                    let mut found = false;
                    for key in &regular {
                        if let Some(rel) = key.strip_prefix(&prefix)
                            && !rel.as_str().is_empty()
                        {
                            bundle.add(rel.as_str(), key.clone())?;
                            found = true;
                        }
                    }
                    if !found {
                        tracing::debug!(feature = %feature, "feature not in template store, skipping");
                    }
                }
            }
        }

        tracing::debug!(
            bundle = %bundle.name,
            files = bundle.count(),
            shared = bundle.shared.len(),
            "built bundle"
        );
        Ok(bundle)
    }
}

impl Bundle {
    pub fn builder(name: impl Into<String>) -> BundleBuilder {
        BundleBuilder {
            name: name.into(),
            suffix: DEFAULT_SUFFIX.to_string(),
            validate_yaml: true,
            features: None,
        }
    }

    /// An empty bundle over `store`.
    pub fn new(name: impl Into<String>, store: impl FragmentStore + 'static) -> Self {
        Self::builder(name).empty(store)
    }

    /// Every file in `store` becomes part of the bundle.
    pub fn from_store(name: impl Into<String>, store: impl FragmentStore + 'static) -> Result<Self> {
        Self::builder(name).build(store)
    }

    /// Compose the named feature directories of `store` into one bundle.
    pub fn from_features<S: AsRef<str>>(
        store: impl FragmentStore + 'static,
        features: &[S],
    ) -> Result<Self> {
        let names: Vec<&str> = features.iter().map(AsRef::as_ref).collect();
        Self::builder(names.join("-"))
            .features(names.iter().copied())
            .build(store)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &BundleNode {
        &self.root
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Fragments available to every leaf.
    pub fn shared(&self) -> &[Fragment] {
        &self.shared
    }

    /// Insert the file at `path`, rendered from the store key `source`.
    ///
    /// Intermediate directories are created as needed. Adding a path again
    /// replaces its source. A new fragment container must not reuse the
    /// name of a container elsewhere in the tree.
    pub fn add(&mut self, path: &str, source: impl Into<NormalizedPath>) -> Result<()> {
        let path = NormalizedPath::new(path);
        let components = path.components();
        if components.is_empty() {
            return Err(Error::PathConflict {
                path: path.to_string(),
            });
        }

        // Validate against the existing tree before touching it
        let mut node = &self.root;
        let mut existing = 0;
        for comp in &components {
            if node.source.is_some() {
                return Err(Error::PathConflict {
                    path: path.to_string(),
                });
            }
            match node.child(comp) {
                Some(child) => {
                    node = child;
                    existing += 1;
                }
                None => break,
            }
        }
        if existing == components.len() && !node.is_leaf() {
            return Err(Error::PathConflict {
                path: path.to_string(),
            });
        }
        for (i, comp) in components.iter().enumerate().skip(existing) {
            if !comp.ends_with(self.suffix.as_str()) {
                continue;
            }
            let at = components[..=i].join("/");
            if let Some(other) = self.root.find_named(comp) {
                return Err(Error::DuplicateContainer {
                    name: comp.to_string(),
                    path: at,
                    existing: other.path.to_string(),
                });
            }
            if let Some(j) = components[existing..i].iter().position(|c| c == comp) {
                return Err(Error::DuplicateContainer {
                    name: comp.to_string(),
                    path: at,
                    existing: components[..=existing + j].join("/"),
                });
            }
        }

        let mut node = &mut self.root;
        let mut current = NormalizedPath::new("");
        for comp in &components {
            current = current.join(comp);
            let idx = match node.children.iter().position(|c| c.name == *comp) {
                Some(idx) => idx,
                None => {
                    node.children
                        .push(BundleNode::directory(comp, current.clone()));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx];
        }
        node.source = Some(source.into());
        Ok(())
    }

    /// Node at the `/`-separated output path. The empty path is the root.
    pub fn find(&self, path: &str) -> Option<&BundleNode> {
        NormalizedPath::new(path)
            .components()
            .iter()
            .try_fold(&self.root, |node, comp| node.child(comp))
    }

    /// Fragments of the container called `name`.
    ///
    /// The whole tree is searched depth first; fragment names are relative
    /// to the container. Empty when no such container exists.
    pub fn find_sub_templates(&self, name: &str) -> Vec<Fragment> {
        let Some(container) = self.root.find_named(name) else {
            return Vec::new();
        };
        container
            .leaves()
            .into_iter()
            .filter_map(|leaf| {
                let rel = leaf.path.strip_prefix(&container.path)?;
                let source = leaf.source.clone()?;
                Some(Fragment {
                    name: rel.to_string(),
                    source,
                })
            })
            .collect()
    }

    /// Leaves that render to an output file, depth first.
    pub fn renderable<'a>(&self, node: &'a BundleNode) -> Vec<&'a BundleNode> {
        let mut out = Vec::new();
        self.collect_renderable(node, &mut out);
        out
    }

    fn collect_renderable<'a>(&self, node: &'a BundleNode, out: &mut Vec<&'a BundleNode>) {
        if node.is_container(&self.suffix) {
            return;
        }
        if node.is_leaf() {
            if node.source.is_some() {
                out.push(node);
            }
            return;
        }
        for child in &node.children {
            self.collect_renderable(child, out);
        }
    }

    /// Number of files a full render produces.
    pub fn count(&self) -> usize {
        self.renderable(&self.root).len()
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("name", &self.name)
            .field("suffix", &self.suffix)
            .field("shared", &self.shared)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} files)", self.name, self.count())?;
        for child in &self.root.children {
            child.write_tree(f, 1)?;
        }
        Ok(())
    }
}
