//! Layered CLI settings
//!
//! Later layers override earlier ones:
//!
//! 1. built-in defaults
//! 2. `<config_dir>/relgen/config.toml`
//! 3. `./relgen.toml`
//! 4. the file given with `--config`
//! 5. command-line flags
//!
//! Only the `--config` file has to exist. Relative paths are taken from the
//! working directory.

use std::path::{Path, PathBuf};

use relgen_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Project settings file, looked up in the working directory.
pub const PROJECT_FILE: &str = "relgen.toml";

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Policy document
    pub policy: PathBuf,
    /// Template store root
    pub templates: PathBuf,
    /// Test variations document
    pub variations: PathBuf,
    /// Fragment container suffix
    pub suffix: String,
    /// Branch consulted when a variation lookup misses
    pub default_branch: String,
    /// Port for `relgen serve`
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: PathBuf::from("policy.yaml"),
            templates: PathBuf::from("templates"),
            variations: PathBuf::from("variations.yaml"),
            suffix: relgen_bundle::DEFAULT_SUFFIX.to_string(),
            default_branch: relgen_variations::DEFAULT_BRANCH.to_string(),
            port: relgen_server::DEFAULT_PORT,
        }
    }
}

/// One settings file. Unset keys leave the lower layer alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsLayer {
    pub policy: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub variations: Option<PathBuf>,
    pub suffix: Option<String>,
    pub default_branch: Option<String>,
    pub port: Option<u16>,
}

impl SettingsLayer {
    /// Read a TOML settings file.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(&NormalizedPath::new(path))?)
    }
}

impl Settings {
    /// Resolve settings from every file layer.
    ///
    /// `explicit` is the `--config` file, which must exist.
    pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        let global = dirs::config_dir().map(|dir| dir.join("relgen").join("config.toml"));
        let project = cwd.join(PROJECT_FILE);

        let mut settings = Self::default();
        for path in global.iter().chain([&project]) {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "applying settings");
                settings.apply(SettingsLayer::load(path)?);
            }
        }

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(CliError::user(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "applying settings");
            settings.apply(SettingsLayer::load(path)?);
        }
        Ok(settings)
    }

    /// Overwrite every value `layer` sets.
    pub fn apply(&mut self, layer: SettingsLayer) {
        if let Some(policy) = layer.policy {
            self.policy = policy;
        }
        if let Some(templates) = layer.templates {
            self.templates = templates;
        }
        if let Some(variations) = layer.variations {
            self.variations = variations;
        }
        if let Some(suffix) = layer.suffix {
            self.suffix = suffix;
        }
        if let Some(branch) = layer.default_branch {
            self.default_branch = branch;
        }
        if let Some(port) = layer.port {
            self.port = port;
        }
    }
}
