//! Validate command handler

use super::load_program;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::ValidateArgs;
use robomission::{AnalysisReport, IssueSeverity, ProgramAnalyzer};
use std::path::Path;

/// Result of checking one file
#[derive(Debug)]
pub enum FileVerdict {
    /// Loaded; analysis attached
    Loaded(AnalysisReport),
    /// Failed to load or validate
    Rejected(CliError),
}

impl FileVerdict {
    /// Whether the file passes, optionally treating warnings as failures
    #[must_use]
    pub fn passes(&self, strict: bool) -> bool {
        match self {
            Self::Rejected(_) => false,
            Self::Loaded(report) if strict => report
                .issues
                .iter()
                .all(|i| i.severity() < IssueSeverity::Warning),
            Self::Loaded(report) => report.is_sound,
        }
    }
}

/// Load, validate and analyze one file
#[must_use]
pub fn validate_file(path: &Path) -> FileVerdict {
    match load_program(path) {
        Ok(program) => FileVerdict::Loaded(ProgramAnalyzer::new(&program).analyze()),
        Err(e) => FileVerdict::Rejected(e),
    }
}

/// Execute the validate command
pub fn execute_validate(config: &CliConfig, args: &ValidateArgs) -> CliResult<()> {
    let reporter = Reporter::new(config.use_color(), config.verbosity.is_quiet());
    let mut failed = 0usize;

    for file in &args.files {
        let verdict = validate_file(file);
        let passes = verdict.passes(args.strict);
        match &verdict {
            FileVerdict::Rejected(e) => reporter.failure(&e.to_string()),
            FileVerdict::Loaded(report) => {
                let summary = format!(
                    "{}: {} reachable state(s), {} finding(s)",
                    file.display(),
                    report.reachable.len(),
                    report.issues.len()
                );
                if passes {
                    reporter.success(&summary);
                } else {
                    reporter.failure(&summary);
                }
                for issue in &report.issues {
                    reporter.issue(issue.severity(), &format!("  {issue}"));
                }
            }
        }
        if !passes {
            failed += 1;
        }
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{failed} of {} file(s) failed",
            args.files.len()
        )))
    }
}
