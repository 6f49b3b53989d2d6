//! Policy command implementations

use colored::Colorize;
use relgen_fs::NormalizedPath;
use relgen_policy::{PolicyDocument, RepoPolicy, Resolver};

use crate::config::Settings;
use crate::error::{CliError, Result};

/// Load the policy document named by the settings.
pub fn load_resolver(settings: &Settings) -> Result<Resolver> {
    let doc = PolicyDocument::load(&NormalizedPath::new(&settings.policy))?;
    Ok(Resolver::new(doc))
}

/// Run the policy show command
pub fn run_policy_show(settings: &Settings, json: bool) -> Result<()> {
    let resolver = load_resolver(settings)?;
    if json {
        println!("{}", serde_json::to_string_pretty(resolver.document())?);
    } else {
        print!("{}", resolver.document());
    }
    Ok(())
}

/// Run the policy resolve command
pub fn run_policy_resolve(settings: &Settings, repo: &str, branch: &str, json: bool) -> Result<()> {
    let rp = load_resolver(settings)?.resolve(repo, branch)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rp)?);
    } else {
        print_policy(&rp);
    }
    Ok(())
}

fn print_policy(rp: &RepoPolicy) {
    println!("{} {}", rp.name.cyan().bold(), rp.branch.cyan());
    println!();
    println!("{}: {}", "Package".dimmed(), rp.package_name);
    println!("{}: {}", "Binary".dimmed(), rp.binary);
    println!("{}: {}", "Releng".dimmed(), rp.branchvals.releng_version);
    println!("{}: {}", "Go".dimmed(), rp.branchvals.go_version);
    println!("{}: {}", "Features".dimmed(), rp.branchvals.features.join(", "));
    let protection = if rp.is_protected(&rp.branch) {
        "protected".yellow()
    } else {
        "direct push".green()
    };
    println!("{}: {}", "Updates".dimmed(), protection);
    if !rp.dest_branches(&rp.branch).is_empty() {
        println!(
            "{}: {}",
            "Ported to".dimmed(),
            rp.dest_branches(&rp.branch).join(", ")
        );
    }
    println!();

    println!("{}:", "Files".bold());
    for (bundle, files) in &rp.files {
        println!("  {} {}: {}", "+".green(), bundle.cyan(), files.join(" "));
    }
    println!();

    println!("{}:", "Release branches".bold());
    for (name, vals) in &rp.release_branches {
        println!("  {} {} ({})", "+".green(), name.cyan(), vals.releng_version);
    }
}

/// Run the policy check command
pub fn run_policy_check(settings: &Settings) -> Result<()> {
    let resolver = load_resolver(settings)?;
    let problems = resolver.check();
    if problems.is_empty() {
        println!(
            "{} {} repos resolve cleanly",
            "OK".green().bold(),
            resolver.document().repos.len()
        );
        return Ok(());
    }

    for problem in &problems {
        println!("  {} {}", "x".red(), problem);
    }
    Err(CliError::user(format!(
        "{} configuration error(s) in {}",
        problems.len(),
        settings.policy.display()
    )))
}
