//! A mission program bound to its settings.

use crate::actuation::ActuationFacade;
use crate::cancel::CancelSignal;
use crate::clock::{Clock, Ticker};
use crate::error::MissionResult;
use crate::logger::{log_file_name, ConsoleStream, MissionLogger};
use crate::program::MissionProgram;
use crate::runner::{MissionReport, MissionRunner};
use crate::sensors::SensorFeed;
use crate::settings::{MissionConfig, MissionSettings};
use std::path::{Path, PathBuf};

/// Program plus the `log`/`run`/`print` switches and log location.
#[derive(Debug, Clone)]
pub struct Mission {
    program: MissionProgram,
    config: MissionConfig,
    log_dir: PathBuf,
    log_file: Option<String>,
    console: ConsoleStream,
}

impl Mission {
    pub fn new(program: MissionProgram, config: MissionConfig, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            program,
            config,
            log_dir: log_dir.into(),
            log_file: None,
            console: ConsoleStream::default(),
        }
    }

    /// Bind a program to its section of the settings.
    pub fn from_settings(program: MissionProgram, settings: &MissionSettings) -> Self {
        let config = settings.mission(program.name());
        Self::new(program, config, settings.log_path.clone())
    }

    /// Read and validate a mission file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the program is invalid.
    pub fn load(path: &Path, settings: &MissionSettings) -> MissionResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let program = MissionProgram::from_yaml(&yaml)?;
        Ok(Self::from_settings(program, settings))
    }

    /// Override the log file name (default `log_<mission>.txt`).
    #[must_use]
    pub fn with_log_file(mut self, file_name: impl Into<String>) -> Self {
        self.log_file = Some(file_name.into());
        self
    }

    /// Mirror console records to `stream` instead of stdout.
    #[must_use]
    pub fn with_console(mut self, stream: ConsoleStream) -> Self {
        self.console = stream;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: MissionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn program(&self) -> &MissionProgram {
        &self.program
    }

    pub fn config(&self) -> MissionConfig {
        self.config
    }

    /// Console mirror target, `None` when the `print` switch is off.
    pub fn console(&self) -> Option<ConsoleStream> {
        self.config.print.then_some(self.console)
    }

    pub fn log_path(&self) -> PathBuf {
        let file = self
            .log_file
            .clone()
            .unwrap_or_else(|| log_file_name(self.program.name()));
        self.log_dir.join(file)
    }

    /// Logger honoring the `log` and `print` switches. A log file that
    /// cannot be opened degrades to console-only with a warning.
    pub fn logger(&self) -> MissionLogger {
        if !self.config.log {
            return MissionLogger::console_only(self.console());
        }
        let path = self.log_path();
        match MissionLogger::create(&path, self.program.name(), self.console()) {
            Ok(logger) => logger,
            Err(e) => {
                tracing::warn!(
                    mission = self.program.name(),
                    path = %path.display(),
                    error = %e,
                    "cannot open mission log, continuing without it"
                );
                MissionLogger::console_only(self.console())
            }
        }
    }

    /// Run the mission. Returns `None` without touching the robot when the
    /// `run` switch is off.
    pub fn run<R, C, T>(
        &self,
        robot: R,
        clock: C,
        ticker: T,
        cancel: CancelSignal,
    ) -> Option<MissionReport>
    where
        R: SensorFeed + ActuationFacade,
        C: Clock,
        T: Ticker,
    {
        if !self.config.run {
            tracing::info!(mission = self.program.name(), "mission disabled, skipping");
            return None;
        }
        let report = MissionRunner::new(&self.program, robot, clock, ticker)
            .with_logger(self.logger())
            .with_cancel(cancel)
            .run();
        Some(report)
    }
}
