//! Loading saved variation documents from disk

use std::collections::BTreeMap;
use std::fs;
use std::sync::LazyLock;

use regex::Regex;
use relgen_fs::{ConfigStore, NormalizedPath};

use crate::document::SavedMatrix;
use crate::parse::{Parsed, parse};
use crate::{Error, Result};

static YAML_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.ya?ml$").expect("Invalid YAML file regex"));

/// Load and parse one saved document.
pub fn load_file(path: &NormalizedPath) -> Result<Parsed> {
    let saved: SavedMatrix = ConfigStore::new().load(path)?;
    let parsed = parse(&saved);
    tracing::debug!(
        %path,
        repos = parsed.variations.repos().len(),
        warnings = parsed.warnings.len(),
        "loaded variations"
    );
    Ok(parsed)
}

/// Load every `*.yml`/`*.yaml` file in `dir`, keyed by file name.
///
/// Files that fail to load are logged and skipped. A directory without a
/// single loadable file is an error.
pub fn load_dir(dir: &NormalizedPath) -> Result<BTreeMap<String, Parsed>> {
    let native = dir.to_native();
    let entries = fs::read_dir(&native).map_err(|e| relgen_fs::Error::io(&native, e))?;

    let mut loaded = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| relgen_fs::Error::io(&native, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !YAML_FILE.is_match(&name) {
            continue;
        }
        let path = dir.join(&name);
        match load_file(&path) {
            Ok(parsed) => {
                loaded.insert(name, parsed);
            }
            Err(e) => tracing::warn!(%path, error = %e, "could not load test variations"),
        }
    }

    if loaded.is_empty() {
        return Err(Error::NoLoadableFiles { dir: native });
    }
    Ok(loaded)
}
