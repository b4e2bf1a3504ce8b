//! Command handlers - extracted from main.rs for testability

pub mod inspect;
pub mod run;
pub mod validate;

pub use inspect::{describe_action, execute_dot, execute_inspect, render_text};
pub use run::{execute_run, sim_config, stamped_log_file, RunOutcome};
pub use validate::{execute_validate, validate_file, FileVerdict};

use crate::error::{CliError, CliResult};
use robomission::MissionProgram;
use std::path::Path;

/// Read and validate one mission file.
pub fn load_program(path: &Path) -> CliResult<MissionProgram> {
    let yaml = std::fs::read_to_string(path).map_err(|source| CliError::ReadMission {
        path: path.to_path_buf(),
        source,
    })?;
    MissionProgram::from_yaml(&yaml).map_err(|source| CliError::InvalidProgram {
        path: path.to_path_buf(),
        source,
    })
}
