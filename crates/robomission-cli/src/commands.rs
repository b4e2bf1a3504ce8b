//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Robomission: validate, inspect and run robot mission files
#[derive(Parser, Debug)]
#[command(name = "robomission")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit diagnostics as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate mission files and report analysis findings
    Validate(ValidateArgs),

    /// Print the states, transitions and timeouts of a mission
    Inspect(InspectArgs),

    /// Export a mission as a Graphviz state diagram
    Dot(DotArgs),

    /// Run a mission against the simulated robot
    Run(RunArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Mission YAML file(s)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat analysis warnings as failures
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Mission YAML file
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: InspectFormat,
}

/// Arguments for the dot command
#[derive(Parser, Debug)]
pub struct DotArgs {
    /// Mission YAML file
    pub file: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Mission YAML file
    pub file: PathBuf,

    /// Settings file with the per-mission log/run/print switches
    #[arg(short, long, default_value = "robomission.yaml", env = "ROBOMISSION_SETTINGS")]
    pub settings: PathBuf,

    /// Poll interval in milliseconds (overrides the settings file)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Simulated ranging reading in meters, one per sensor (repeatable)
    #[arg(long = "range", value_name = "METERS")]
    pub ranges: Vec<f64>,

    /// Simulated line width in meters; the line reads as valid when set
    #[arg(long, value_name = "METERS")]
    pub edge_width: Option<f64>,

    /// Turn rate limit while tracking a heading (rad/s)
    #[arg(long, default_value = "1.0")]
    pub max_turn_rate: f64,

    /// Run even when the mission's run switch is off
    #[arg(long)]
    pub force: bool,

    /// Directory for the mission log (overrides the settings file)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Append a timestamp to the log file name
    #[arg(long)]
    pub stamp: bool,

    /// Print the mission report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Output format for the inspect command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InspectFormat {
    /// Human-readable text
    #[default]
    Text,
    /// The program as JSON
    Json,
}

/// Color output argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
