//! relgen CLI
//!
//! Resolves branch policies, renders template bundles and queries CI test
//! variations for a fleet of repositories.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{BundleAction, Cli, Commands, PolicyAction, VariationsAction};
use commands::bundle::Selection;
use config::Settings;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd, cli.config.as_deref())?;
    if let Some(policy) = cli.policy {
        settings.policy = policy;
    }
    if let Some(variations) = cli.variations {
        settings.variations = variations;
    }
    tracing::debug!(?settings, "resolved settings");

    execute_command(cli.command, settings)
}

fn execute_command(cmd: Commands, mut settings: Settings) -> Result<()> {
    match cmd {
        Commands::Policy { action } => match action {
            PolicyAction::Show { json } => commands::run_policy_show(&settings, json),
            PolicyAction::Resolve { repo, branch, json } => {
                commands::run_policy_resolve(&settings, &repo, &branch, json)
            }
            PolicyAction::Check => commands::run_policy_check(&settings),
        },
        Commands::Bundle { action } => match action {
            BundleAction::List { templates } => commands::run_bundle_list(&settings, &templates),
            BundleAction::Gen {
                templates,
                only,
                repo,
                branch,
                keep_going,
                out,
            } => {
                let selection = match (&only, keep_going) {
                    (Some(path), _) => Selection::Only(path),
                    (None, true) => Selection::KeepGoing,
                    (None, false) => Selection::All,
                };
                commands::run_bundle_gen(&settings, &templates, &repo, &branch, selection, &out)
            }
        },
        Commands::Variations { action } => match action {
            VariationsAction::Dump { dir } => match dir {
                Some(dir) => commands::run_variations_dump_dir(&settings, &dir),
                None => commands::run_variations_dump(&settings),
            },
            VariationsAction::Get {
                repo,
                branch,
                trigger,
                testsuite,
                field,
            } => commands::run_variations_get(&settings, &repo, &branch, &trigger, &testsuite, &field),
            VariationsAction::Outputs {
                repo,
                branch,
                trigger,
                testsuite,
                fields,
            } => commands::run_variations_outputs(
                &settings, &repo, &branch, &trigger, &testsuite, &fields,
            ),
        },
        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.port = port;
            }
            commands::run_serve(&settings)
        }
    }
}
