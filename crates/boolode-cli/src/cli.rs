use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Amogh Jalihal",
    version,
    about = "BoolODE CLI - Validate, inspect and plan BoolODE gene-regulatory-network simulation experiments.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check an experiment configuration and report every problem found.
    Validate(ValidateArgs),
    /// Summarize the jobs and post-processing steps of an experiment.
    Show(ShowArgs),
    /// Print the deterministic run plan of an experiment as YAML.
    Plan(PlanArgs),
    /// Create the output directories, run plans and sample manifests on disk.
    Prepare(PlanArgs),
    /// Re-serialize a configuration in normalized form, optionally converting formats.
    Fmt(FmtArgs),
}

/// Configuration source shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the experiment configuration (.yaml, .yml or .toml).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S jobs.mCAD.num_cells=100
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Also check that model definition, initial-condition and auxiliary files exist and parse.
    #[arg(long)]
    pub check_files: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `plan` and `prepare` subcommands.
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Restrict the plan to a single job.
    #[arg(short, long, value_name = "NAME")]
    pub job: Option<String>,

    /// Base seed of every random draw in the plan.
    #[arg(long, value_name = "INT", default_value_t = 0)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct FmtArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write to this file instead of stdout; the extension selects YAML or TOML.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
