//! Shared test fixtures for the relgen workspace.
//!
//! This crate is a dev-dependency only and never published. It has no
//! workspace dependencies so any crate can pull it in without a cycle;
//! fixtures are handed out as raw documents and on-disk trees.
//!
//! # Modules
//!
//! - [`policy`]: sample policy documents
//! - [`variations`]: sample variation matrices
//! - [`templates`]: [`TemplateTree`] builder for template stores on disk

pub mod policy;
pub mod templates;
pub mod variations;

pub use templates::TemplateTree;
