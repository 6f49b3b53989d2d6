//! Rendering bundles to output files

use std::fmt;
use std::sync::LazyLock;

use minijinja::Value;
use regex::Regex;
use relgen_fs::{NormalizedPath, compute_content_checksum};
use serde::Serialize;

use crate::bundle::Bundle;
use crate::helpers;
use crate::node::BundleNode;
use crate::writer::OutputWriter;
use crate::{Error, Result};

static YAML_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.ya?ml$").expect("Invalid YAML file regex"));

/// A file produced by a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
    pub path: NormalizedPath,
    /// `sha256:<hex>` of the written content
    pub checksum: String,
}

/// A leaf that failed to render.
#[derive(Debug)]
pub struct RenderFailure {
    pub path: NormalizedPath,
    pub error: Error,
}

/// Outcome of [`Bundle::render_all`].
#[derive(Debug, Default)]
pub struct RenderReport {
    pub rendered: Vec<RenderedFile>,
    pub failures: Vec<RenderFailure>,
}

impl RenderReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rendered, {} failed",
            self.rendered.len(),
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.path, failure.error)?;
        }
        Ok(())
    }
}

impl Bundle {
    /// Render every file of the bundle against `vars`.
    ///
    /// Stops at the first failing leaf and returns its error. Files rendered
    /// before the failure have already been written.
    pub fn render<S: Serialize + ?Sized>(
        &self,
        vars: &S,
        writer: &mut dyn OutputWriter,
    ) -> Result<Vec<RenderedFile>> {
        self.render_node(vars, writer, &self.root)
    }

    /// Render the files below `node`.
    pub fn render_node<S: Serialize + ?Sized>(
        &self,
        vars: &S,
        writer: &mut dyn OutputWriter,
        node: &BundleNode,
    ) -> Result<Vec<RenderedFile>> {
        let ctx = Value::from_serialize(vars);
        let mut rendered = Vec::new();
        for leaf in self.renderable(node) {
            rendered.push(self.render_leaf(leaf, &ctx, writer)?);
        }
        Ok(rendered)
    }

    /// Render the files below the node at the output path `path`.
    pub fn render_path<S: Serialize + ?Sized>(
        &self,
        vars: &S,
        writer: &mut dyn OutputWriter,
        path: &str,
    ) -> Result<Vec<RenderedFile>> {
        let node = self.find(path).ok_or_else(|| Error::NodeNotFound {
            bundle: self.name.clone(),
            path: path.to_string(),
        })?;
        self.render_node(vars, writer, node)
    }

    /// Render every file, continuing past failures.
    pub fn render_all<S: Serialize + ?Sized>(
        &self,
        vars: &S,
        writer: &mut dyn OutputWriter,
    ) -> RenderReport {
        let ctx = Value::from_serialize(vars);
        let mut report = RenderReport::default();
        for leaf in self.renderable(&self.root) {
            match self.render_leaf(leaf, &ctx, writer) {
                Ok(file) => report.rendered.push(file),
                Err(error) => {
                    tracing::warn!(path = %leaf.path, %error, "render failed");
                    report.failures.push(RenderFailure {
                        path: leaf.path.clone(),
                        error,
                    });
                }
            }
        }
        report
    }

    /// Compose `leaf` with its fragments, render it and write the result.
    fn render_leaf(
        &self,
        leaf: &BundleNode,
        ctx: &Value,
        writer: &mut dyn OutputWriter,
    ) -> Result<RenderedFile> {
        let template_error = |source: minijinja::Error| Error::Template {
            path: leaf.path.to_string(),
            source,
        };
        let source = leaf.source.as_ref().ok_or_else(|| Error::PathConflict {
            path: leaf.path.to_string(),
        })?;

        // Later entries win on name clashes, so the leaf goes last
        let container = format!("{}{}", leaf.name, self.suffix);
        let mut units: Vec<(String, String)> = Vec::new();
        for fragment in self.shared.iter().chain(&self.find_sub_templates(&container)) {
            units.push((fragment.name.clone(), self.store.read(&fragment.source)?));
        }
        units.push((leaf.name.clone(), self.store.read(source)?));
        tracing::trace!(
            path = %leaf.path,
            fragments = ?units.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            "composing template"
        );

        let mut env = helpers::environment();
        for (name, text) in &units {
            env.add_template(name, text).map_err(template_error)?;
        }
        let output = env
            .get_template(&leaf.name)
            .and_then(|t| t.render(ctx))
            .map_err(template_error)?;

        if self.validate_yaml && YAML_FILE.is_match(leaf.path.as_str()) {
            serde_yaml::from_str::<serde_yaml::Value>(&output).map_err(|e| Error::InvalidYaml {
                path: leaf.path.to_string(),
                message: e.to_string(),
            })?;
        }

        writer.write(&leaf.path, output.as_bytes())?;
        tracing::debug!(path = %leaf.path, "rendered");
        Ok(RenderedFile {
            path: leaf.path.clone(),
            checksum: compute_content_checksum(output.as_bytes()),
        })
    }
}
