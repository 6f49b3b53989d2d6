//! Template bundles for relgen
//!
//! A bundle mirrors a directory of template fragments. Every file becomes
//! a leaf that renders to the same relative path in the output; a directory
//! named `<leaf>.d` is a fragment container whose files are composed into
//! that leaf instead of being rendered on their own.
//!
//! ```text
//! .github/workflows/release.yml          -> .github/workflows/release.yml
//! .github/workflows/release.yml.d/*.tmpl    (included by release.yml)
//! subtemplates/*.tmpl                       (included by any leaf)
//! ```
//!
//! Templates use minijinja syntax with strict undefined handling: a key
//! missing from the render context fails that file instead of rendering
//! as empty. See [`helpers`] for the functions available to templates.
//!
//! # Example
//!
//! ```
//! use relgen_bundle::{Bundle, MemoryStore, MemoryWriter};
//!
//! let store = MemoryStore::new()
//!     .with("ci/run.sh", "echo {{ name }}\n{% include \"env.tmpl\" %}")
//!     .with("ci/run.sh.d/env.tmpl", "export GO={{ go }}\n");
//! let bundle = Bundle::from_store("ci", store).unwrap();
//!
//! let mut out = MemoryWriter::new();
//! let vars = serde_json::json!({"name": "tyk", "go": "1.22"});
//! bundle.render(&vars, &mut out).unwrap();
//! assert_eq!(out.text("ci/run.sh"), Some("echo tyk\nexport GO=1.22\n"));
//! ```

pub mod bundle;
pub mod error;
pub mod helpers;
pub mod node;
pub mod render;
pub mod store;
pub mod writer;

pub use bundle::{Bundle, BundleBuilder, DEFAULT_SUFFIX, Fragment, SHARED_DIR};
pub use error::{Error, Result};
pub use node::BundleNode;
pub use render::{RenderFailure, RenderReport, RenderedFile};
pub use store::{DirStore, FragmentStore, MemoryStore};
pub use writer::{DirWriter, MemoryWriter, OutputWriter};
