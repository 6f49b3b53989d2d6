//! [`TemplateTree`] builder for template stores on disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory populated with template fragments.
///
/// # Example
///
/// ```rust
/// use relgen_test_utils::TemplateTree;
///
/// let tree = TemplateTree::new()
///     .file("releng/.github/workflows/release.yml", "name: {{ name }}\n")
///     .file("releng/.github/workflows/release.yml.d/jobs.tmpl", "jobs: {}\n");
/// assert!(tree.path("releng/.github/workflows/release.yml").is_file());
/// ```
pub struct TemplateTree {
    temp_dir: TempDir,
}

impl Default for TemplateTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateTree {
    /// Create an empty template directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Write `content` at the `/`-separated `rel` path, creating parents.
    pub fn file(self, rel: &str, content: &str) -> Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Create an empty directory at `rel`.
    pub fn dir(self, rel: &str) -> Self {
        fs::create_dir_all(self.path(rel)).unwrap();
        self
    }

    /// Return the root of the template directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|c| !c.is_empty())
            .fold(self.root().to_path_buf(), |acc, c| acc.join(c))
    }

    /// A small two-feature store with a fragment container and a shared
    /// subtemplate.
    ///
    /// ```text
    /// releng/.github/workflows/release.yml
    /// releng/.github/workflows/release.yml.d/jobs.tmpl
    /// releng/ci/install.sh
    /// distroless/ci/Dockerfile.distroless
    /// subtemplates/header.tmpl
    /// ```
    pub fn sample() -> Self {
        Self::new()
            .file(
                "releng/.github/workflows/release.yml",
                "# {% include \"header.tmpl\" %}\nname: Release {{ name }}\non:\n  push:\n    branches: [{{ branch }}]\n{% include \"jobs.tmpl\" %}",
            )
            .file(
                "releng/.github/workflows/release.yml.d/jobs.tmpl",
                "jobs:\n  goreleaser:\n    runs-on: ubuntu-latest\n    env:\n      GO_VERSION: \"{{ branchvals.go_version }}\"\n",
            )
            .file(
                "releng/ci/install.sh",
                "#!/bin/sh\necho installing {{ package_name }}\n",
            )
            .file(
                "distroless/ci/Dockerfile.distroless",
                "FROM gcr.io/distroless/static-debian12\nCOPY {{ binary }} /opt/{{ binary }}\n",
            )
            .file(
                "subtemplates/header.tmpl",
                "Generated by relgen for {{ name }}",
            )
    }
}
