//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// relgen - Release engineering configuration for a fleet of repositories
#[derive(Parser, Debug)]
#[command(name = "relgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file applied over ./relgen.toml
    #[arg(long, global = true, env = "RELGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Policy document
    #[arg(long, global = true, env = "RELGEN_POLICY")]
    pub policy: Option<PathBuf>,

    /// Test variations document
    #[arg(long, global = true, env = "RELGEN_VARIATIONS")]
    pub variations: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Inspect and resolve the branch policy document
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },

    /// List and render template bundles
    Bundle {
        #[command(subcommand)]
        action: BundleAction,
    },

    /// Query CI test variations
    Variations {
        #[command(subcommand)]
        action: VariationsAction,
    },

    /// Serve test variations over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Policy subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PolicyAction {
    /// Summarise the document
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Resolve the policy of one branch of one repo
    Resolve {
        #[arg(long)]
        repo: String,

        #[arg(long)]
        branch: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report every configuration error in the document
    Check,
}

/// Template location shared by bundle subcommands
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TemplateArgs {
    /// Template store root
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Feature directories to compose, in order
    #[arg(short, long = "feature")]
    pub features: Vec<String>,
}

/// Bundle subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BundleAction {
    /// Show the bundle tree and its file count
    List {
        #[command(flatten)]
        templates: TemplateArgs,
    },

    /// Render a bundle for one branch of one repo
    ///
    /// Without --feature the features of the resolved branch are used.
    ///
    /// Examples:
    ///   relgen bundle gen --repo tyk --branch master out/
    ///   relgen bundle gen --repo tyk --branch master --only ci -
    Gen {
        #[command(flatten)]
        templates: TemplateArgs,

        /// Render only the files below this output path
        #[arg(long)]
        only: Option<String>,

        #[arg(long)]
        repo: String,

        #[arg(long)]
        branch: String,

        /// Render every file and report failures at the end
        #[arg(long, conflicts_with = "only")]
        keep_going: bool,

        /// Output directory, `-` for stdout
        out: String,
    },
}

/// Variations subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum VariationsAction {
    /// Print every variation as JSON
    ///
    /// With --dir every `*.yml`/`*.yaml` file in the directory is loaded
    /// and the output is keyed by file name.
    Dump {
        /// Directory of variation documents
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Print one field of a testsuite record as JSON
    Get {
        repo: String,
        branch: String,
        trigger: String,
        testsuite: String,
        field: String,
    },

    /// Print fields of a testsuite record as `name<<EOF` step outputs
    Outputs {
        repo: String,
        branch: String,
        trigger: String,
        testsuite: String,

        /// Fields to emit, all when omitted
        fields: Vec<String>,
    },
}
