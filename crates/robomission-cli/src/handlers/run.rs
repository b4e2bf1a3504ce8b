//! Run command handler

use super::load_program;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::RunArgs;
use chrono::{DateTime, Local};
use robomission::{
    CancelSignal, ConsoleStream, EdgeReading, IntervalTicker, Mission, MissionOutcome,
    MissionReport, MissionSettings, SimConfig, SimulatedRobot, SystemClock,
};
use std::time::Duration;

/// How a run command ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The mission ran to completion, either way
    Completed(MissionReport),
    /// The mission's run switch is off
    Disabled,
}

impl RunOutcome {
    /// Whether the mission ended lost
    #[must_use]
    pub fn is_lost(&self) -> bool {
        matches!(
            self,
            Self::Completed(MissionReport {
                outcome: MissionOutcome::Lost(_),
                ..
            })
        )
    }
}

/// Simulator parameters from the command line
#[must_use]
pub fn sim_config(args: &RunArgs) -> SimConfig {
    SimConfig {
        ranges: args.ranges.clone(),
        edge: args.edge_width.map(|width| EdgeReading {
            width,
            valid: true,
            right_edge_offset: 0.0,
        }),
        max_turn_rate: args.max_turn_rate,
    }
}

/// Log file name carrying the start time
#[must_use]
pub fn stamped_log_file(mission: &str, at: DateTime<Local>) -> String {
    format!("log_{mission}_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Execute the run command
pub fn execute_run(config: &CliConfig, args: &RunArgs) -> CliResult<RunOutcome> {
    let reporter = Reporter::new(config.use_color(), config.verbosity.is_quiet());
    let program = load_program(&args.file)?;

    let mut settings = MissionSettings::load(&args.settings)?;
    if settings.ensure_mission(program.name()) {
        settings.save(&args.settings)?;
        tracing::info!(
            mission = program.name(),
            settings = %args.settings.display(),
            "added mission section with defaults"
        );
    }

    let interval = match args.interval_ms {
        Some(0) => return Err(CliError::invalid_argument("--interval-ms must be positive")),
        Some(ms) => Duration::from_millis(ms),
        None => settings.tick_interval(),
    };
    if let Some(dir) = &args.log_dir {
        settings.log_path.clone_from(dir);
    }

    let mut mission_config = settings.mission(program.name());
    if args.force {
        mission_config.run = true;
    }
    let name = program.name().to_string();
    let mut mission = Mission::from_settings(program, &settings).with_config(mission_config);
    if args.stamp {
        mission = mission.with_log_file(stamped_log_file(&name, Local::now()));
    }
    if args.json {
        mission = mission.with_console(ConsoleStream::Stderr);
    }

    if !mission_config.run {
        reporter.info(&format!(
            "Mission {name} is disabled in {} (use --force to run it)",
            args.settings.display()
        ));
        return Ok(RunOutcome::Disabled);
    }

    let sim = sim_config(args);
    let report = drive(mission, sim, interval)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let summary = format!(
            "{} {} in state {} after {} tick(s), {:.3}s",
            report.mission,
            report.outcome,
            report.final_state,
            report.ticks,
            report.duration.as_secs_f64()
        );
        match report.outcome {
            MissionOutcome::Finished => reporter.success(&summary),
            MissionOutcome::Lost(_) => reporter.failure(&summary),
        }
    }
    Ok(RunOutcome::Completed(report))
}

/// Run the mission on a blocking worker while Ctrl-C cancels it.
fn drive(mission: Mission, sim: SimConfig, interval: Duration) -> CliResult<MissionReport> {
    let runtime = tokio::runtime::Runtime::new()?;
    let cancel = CancelSignal::new();

    runtime.block_on(async move {
        let watcher = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("interrupted, cancelling mission");
                    cancel.cancel();
                }
            })
        };

        let worker = tokio::task::spawn_blocking(move || {
            let clock = SystemClock::new();
            let robot = SimulatedRobot::new(clock, sim);
            mission.run(robot, clock, IntervalTicker::new(interval), cancel)
        });
        let joined = worker.await;
        watcher.abort();

        match joined {
            Ok(Some(report)) => Ok(report),
            Ok(None) => Err(CliError::execution("mission did not start")),
            Err(e) => Err(CliError::execution(e.to_string())),
        }
    })
}
