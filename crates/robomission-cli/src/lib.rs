//! Robomission CLI Library
//!
//! Command-line front end for the `robomission` engine: validate and
//! analyze mission files, print them, export Graphviz diagrams, and dry-run
//! them against the simulated robot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod logging;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, DotArgs, InspectArgs, InspectFormat, RunArgs, ValidateArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::{default_filter, init_logging};
pub use output::Reporter;
