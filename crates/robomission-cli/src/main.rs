//! Robomission CLI: validate, inspect and dry-run robot missions
//!
//! ## Usage
//!
//! ```bash
//! robomission validate missions/*.yaml --strict
//! robomission inspect missions/plan98.yaml --format json
//! robomission dot missions/plan98.yaml -o plan98.dot
//! robomission run missions/plan401.yaml --force --range 1.2
//! ```

use clap::Parser;
use robomission_cli::{
    handlers, init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

/// Exit status for a mission that ended lost
const EXIT_LOST: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    match config.color {
        ColorChoice::Always => console::set_colors_enabled_stderr(true),
        ColorChoice::Never => console::set_colors_enabled_stderr(false),
        ColorChoice::Auto => {}
    }
    init_logging(&config);

    match cli.command {
        Commands::Validate(args) => handlers::execute_validate(&config, &args)?,
        Commands::Inspect(args) => handlers::execute_inspect(&args)?,
        Commands::Dot(args) => handlers::execute_dot(&config, &args)?,
        Commands::Run(args) => {
            let outcome = handlers::execute_run(&config, &args)?;
            if outcome.is_lost() {
                return Ok(ExitCode::from(EXIT_LOST));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_log_json(cli.log_json)
}
