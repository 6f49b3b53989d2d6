//! Variations command implementations

use std::collections::BTreeMap;
use std::path::Path;

use relgen_fs::NormalizedPath;
use relgen_variations::{
    TestsuiteVariations, VariationField, load_dir, load_file, write_outputs,
};

use crate::config::Settings;
use crate::error::Result;

/// Load the variations document named by the settings.
fn load(settings: &Settings) -> Result<TestsuiteVariations> {
    let parsed = load_file(&NormalizedPath::new(&settings.variations))?;
    for warning in &parsed.warnings {
        tracing::warn!("{}", warning);
    }
    Ok(parsed
        .variations
        .with_default_branch(settings.default_branch.as_str()))
}

/// Run the variations dump command
pub fn run_variations_dump(settings: &Settings) -> Result<()> {
    let variations = load(settings)?;
    println!("{}", serde_json::to_string_pretty(&variations)?);
    Ok(())
}

/// Run the variations dump command over a directory of documents
pub fn run_variations_dump_dir(settings: &Settings, dir: &Path) -> Result<()> {
    let loaded = load_dir(&NormalizedPath::new(dir))?;
    let mut by_file = BTreeMap::new();
    for (name, parsed) in loaded {
        for warning in &parsed.warnings {
            tracing::warn!(file = %name, "{}", warning);
        }
        let variations = parsed
            .variations
            .with_default_branch(settings.default_branch.as_str());
        by_file.insert(name, variations);
    }
    println!("{}", serde_json::to_string_pretty(&by_file)?);
    Ok(())
}

/// Run the variations get command
pub fn run_variations_get(
    settings: &Settings,
    repo: &str,
    branch: &str,
    trigger: &str,
    testsuite: &str,
    field: &str,
) -> Result<()> {
    let value = load(settings)?.query(repo, branch, trigger, testsuite, field)?;
    println!("{}", serde_json::to_string(&value)?);
    Ok(())
}

/// Run the variations outputs command
pub fn run_variations_outputs(
    settings: &Settings,
    repo: &str,
    branch: &str,
    trigger: &str,
    testsuite: &str,
    fields: &[String],
) -> Result<()> {
    let fields = fields
        .iter()
        .map(|f| f.parse::<VariationField>())
        .collect::<relgen_variations::Result<Vec<_>>>()?;
    let variations = load(settings)?;
    let record = variations.lookup(repo, branch, trigger, testsuite)?;
    write_outputs(&mut std::io::stdout().lock(), record, &fields)?;
    Ok(())
}
