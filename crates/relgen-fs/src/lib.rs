//! Filesystem primitives for relgen
//!
//! Provides normalized path handling, locked atomic writes, content
//! checksums, and format-agnostic loading of policy and variation documents.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::compute_content_checksum;
pub use config::{ConfigStore, DocumentFormat};
pub use error::{Error, Result};
pub use path::NormalizedPath;
