//! CI test variation matrices for relgen
//!
//! A variation document describes CI configuration as a compact tree nested
//! by repo, branch, trigger and testsuite. Values declared at a level are
//! inherited by everything below it. [`parse`] flattens the tree into one
//! [`VariationRecord`] per `(branch, trigger, testsuite)` of each repo.
//!
//! # Example
//!
//! ```
//! use relgen_variations::{SavedMatrix, parse};
//!
//! let doc: SavedMatrix = serde_yaml::from_str(r#"
//! level:
//!   tyk:
//!     level:
//!       master:
//!         pump: [a]
//!         level:
//!           push:
//!             pump: [b]
//!             level:
//!               api: {pump: [c]}
//! "#).unwrap();
//!
//! let parsed = parse(&doc);
//! let tyk = parsed.variations.repo("tyk").unwrap();
//! assert_eq!(tyk.lookup("master", "push", "api").unwrap().pump, ["a", "b", "c"]);
//! assert_eq!(tyk.testsuites("master", "push"), ["api"]);
//! ```

pub mod document;
pub mod error;
pub mod field;
pub mod load;
pub mod parse;
pub mod repo;

pub use document::{Distros, EnvFile, SavedMatrix, VariationRecord, VariationTree};
pub use error::{Error, Result};
pub use field::{VariationField, write_outputs};
pub use load::{load_dir, load_file};
pub use parse::{Parsed, StructuralWarning, parse};
pub use repo::{DEFAULT_BRANCH, RepoVariations, TestsuiteVariations, VariationPath};
