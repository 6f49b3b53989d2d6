//! Bundle command implementations

use std::io::Write;

use colored::Colorize;
use relgen_bundle::{Bundle, DirStore, DirWriter, MemoryWriter, OutputWriter, RenderedFile};
use relgen_fs::NormalizedPath;
use relgen_policy::RepoPolicy;

use crate::cli::TemplateArgs;
use crate::commands::policy::load_resolver;
use crate::config::Settings;
use crate::error::{CliError, Result};

/// Output argument that sends rendered files to stdout.
const STDOUT: &str = "-";

/// What to render in `relgen bundle gen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Everything, stopping at the first failure
    All,
    /// Everything, collecting failures
    KeepGoing,
    /// The files below one output path
    Only(&'a str),
}

fn build_bundle(settings: &Settings, args: &TemplateArgs, features: &[String]) -> Result<Bundle> {
    let root = args.templates.as_ref().unwrap_or(&settings.templates);
    let store = DirStore::new(NormalizedPath::new(root));

    let name = if features.is_empty() {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "templates".to_string())
    } else {
        features.join("-")
    };
    let builder = Bundle::builder(name).suffix(settings.suffix.as_str());
    let builder = if features.is_empty() {
        builder
    } else {
        builder.features(features.iter().cloned())
    };
    Ok(builder.build(store)?)
}

/// Run the bundle list command
pub fn run_bundle_list(settings: &Settings, args: &TemplateArgs) -> Result<()> {
    let bundle = build_bundle(settings, args, &args.features)?;
    print!("{}", bundle);
    if !bundle.shared().is_empty() {
        let names: Vec<&str> = bundle.shared().iter().map(|f| f.name.as_str()).collect();
        println!("{}: {}", "Shared".dimmed(), names.join(", "));
    }
    Ok(())
}

/// Run the bundle gen command
pub fn run_bundle_gen(
    settings: &Settings,
    args: &TemplateArgs,
    repo: &str,
    branch: &str,
    selection: Selection<'_>,
    out: &str,
) -> Result<()> {
    let rp = load_resolver(settings)?.resolve(repo, branch)?.stamp_now();
    let features = if args.features.is_empty() {
        rp.branchvals.features.clone()
    } else {
        args.features.clone()
    };
    let bundle = build_bundle(settings, args, &features)?;
    tracing::info!(bundle = bundle.name(), repo, branch, "rendering");

    if out == STDOUT {
        let mut writer = MemoryWriter::new();
        let rendered = render(&bundle, &rp, &mut writer, selection)?;
        let files = writer.into_files();
        let mut stdout = std::io::stdout().lock();
        for (path, content) in &files {
            if files.len() > 1 {
                writeln!(stdout, "==> {} <==", path)?;
            }
            stdout.write_all(content)?;
        }
        tracing::info!(files = rendered.len(), "rendered to stdout");
        return Ok(());
    }

    let mut writer = DirWriter::new(NormalizedPath::new(out));
    let rendered = render(&bundle, &rp, &mut writer, selection)?;
    for file in &rendered {
        println!("  {} {} {}", "+".green(), file.path, file.checksum.dimmed());
    }
    println!();
    println!(
        "{} {} files into {}",
        "Rendered".green().bold(),
        rendered.len(),
        out.cyan()
    );
    Ok(())
}

fn render(
    bundle: &Bundle,
    rp: &RepoPolicy,
    writer: &mut dyn OutputWriter,
    selection: Selection<'_>,
) -> Result<Vec<RenderedFile>> {
    match selection {
        Selection::All => Ok(bundle.render(rp, writer)?),
        Selection::Only(path) => Ok(bundle.render_path(rp, writer, path)?),
        Selection::KeepGoing => {
            let report = bundle.render_all(rp, writer);
            if report.is_success() {
                Ok(report.rendered)
            } else {
                Err(CliError::user(format!("bundle {}: {}", bundle.name(), report)))
            }
        }
    }
}
