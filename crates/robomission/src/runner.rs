//! Tick-driven mission runner.
//!
//! One loop, one suspension point. Each tick reads one snapshot, evaluates
//! the current state and applies at most one transition. `Lost` always ends
//! with `set_velocity(0)` followed by `set_turn_rate(0)`.

use crate::actuation::ActuationFacade;
use crate::cancel::CancelSignal;
use crate::clock::{Clock, Ticker};
use crate::evaluator::{evaluate, Cause, Decision};
use crate::logger::MissionLogger;
use crate::program::{Action, MissionProgram, StateId};
use crate::sensors::{PoseReset, SensorFeed};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Why a mission ended in `Lost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LostReason {
    /// A guarded transition chose `lost`
    Guard,
    /// A timeout chose `lost`
    Timeout,
    ExternallyCancelled,
    /// The runner reached a state id missing from the program
    UnknownState(StateId),
}

impl fmt::Display for LostReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guard => write!(f, "guard"),
            Self::Timeout => write!(f, "timeout"),
            Self::ExternallyCancelled => write!(f, "cancelled"),
            Self::UnknownState(id) => write!(f, "unknown state {id}"),
        }
    }
}

/// Terminal outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionOutcome {
    Finished,
    Lost(LostReason),
}

impl MissionOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for MissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished => write!(f, "finished"),
            Self::Lost(reason) => write!(f, "lost ({reason})"),
        }
    }
}

/// Mutable per-run state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    pub state: StateId,
    pub previous: StateId,
    /// Clock time when `state` was entered
    pub state_entered_at: Duration,
    pub started_at: Duration,
    pub outcome: Option<MissionOutcome>,
}

impl RuntimeContext {
    pub fn new(start: StateId, now: Duration) -> Self {
        Self {
            state: start,
            previous: start,
            state_entered_at: now,
            started_at: now,
            outcome: None,
        }
    }
}

/// One applied transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRecord {
    /// Zero-based tick index
    pub tick: u64,
    /// Time since mission start
    pub at: Duration,
    pub from: StateId,
    pub to: StateId,
    pub cause: Cause,
    pub message: Option<String>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionReport {
    pub mission: String,
    pub outcome: MissionOutcome,
    /// State the mission was in when it ended
    pub final_state: StateId,
    /// Number of evaluated ticks
    pub ticks: u64,
    pub duration: Duration,
    pub transitions: Vec<TransitionRecord>,
    /// Message of the rule that ended the run
    pub message: Option<String>,
}

struct Ending {
    outcome: MissionOutcome,
    message: Option<String>,
}

/// Drives one mission program to `Finished` or `Lost`.
///
/// `R` is both the sensor feed and the actuator. Pass `&mut robot` to keep
/// ownership with the caller.
pub struct MissionRunner<'p, R, C, T> {
    program: &'p MissionProgram,
    robot: R,
    clock: C,
    ticker: T,
    logger: MissionLogger,
    cancel: CancelSignal,
}

impl<R, C: fmt::Debug, T: fmt::Debug> fmt::Debug for MissionRunner<'_, R, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MissionRunner")
            .field("mission", &self.program.name())
            .field("clock", &self.clock)
            .field("ticker", &self.ticker)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

impl<'p, R, C, T> MissionRunner<'p, R, C, T>
where
    R: SensorFeed + ActuationFacade,
    C: Clock,
    T: Ticker,
{
    pub fn new(program: &'p MissionProgram, robot: R, clock: C, ticker: T) -> Self {
        Self {
            program,
            robot,
            clock,
            ticker,
            logger: MissionLogger::disabled(),
            cancel: CancelSignal::new(),
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: MissionLogger) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run until `Finished` or `Lost`.
    pub fn run(mut self) -> MissionReport {
        let program = self.program;
        let name = program.name();
        let mut ctx = RuntimeContext::new(program.start(), self.clock.now());
        let mut transitions = Vec::new();
        let mut ticks: u64 = 0;

        tracing::info!(
            mission = name,
            start = %ctx.state,
            interval_ms = self.ticker.interval().as_millis() as u64,
            "mission started"
        );
        self.log(&ctx, ctx.state, &format!("{name} started"));
        if let Some(start) = program.state(ctx.state) {
            self.apply_all(&start.entry);
        }

        let ending = loop {
            if self.cancel.is_cancelled() {
                break Self::lost(LostReason::ExternallyCancelled, None);
            }
            let Some(state) = program.state(ctx.state) else {
                break Self::lost(LostReason::UnknownState(ctx.state), None);
            };

            let snapshot = self.robot.snapshot();
            let now = self.clock.now();
            let elapsed = self.clock.elapsed_since(ctx.state_entered_at);
            let tick = ticks;
            ticks += 1;

            match evaluate(state, &snapshot, elapsed) {
                Decision::Stay => {}
                Decision::GoTo { target, rule } => {
                    self.apply_all(rule.actions);
                    let Some(next) = program.state(target) else {
                        break Self::lost(
                            LostReason::UnknownState(target),
                            rule.message.map(str::to_string),
                        );
                    };
                    self.apply_all(&next.entry);

                    let from = ctx.state;
                    let change = format!("state change from {from} to {target}");
                    let text = match rule.message {
                        Some(msg) => format!("{msg}; {change}"),
                        None => change,
                    };
                    self.log(&ctx, from, &text);
                    tracing::debug!(mission = name, %from, to = %target, cause = %rule.cause, "state change");

                    transitions.push(TransitionRecord {
                        tick,
                        at: now.saturating_sub(ctx.started_at),
                        from,
                        to: target,
                        cause: rule.cause,
                        message: rule.message.map(str::to_string),
                    });
                    ctx.previous = from;
                    ctx.state = target;
                    ctx.state_entered_at = now;
                }
                Decision::Finished(rule) => {
                    self.apply_all(rule.actions);
                    self.apply_all(program.finish_actions());
                    break Ending {
                        outcome: MissionOutcome::Finished,
                        message: rule.message.map(str::to_string),
                    };
                }
                Decision::Lost(rule) => {
                    self.apply_all(rule.actions);
                    let reason = match rule.cause {
                        Cause::Guard(_) => LostReason::Guard,
                        Cause::Timeout => LostReason::Timeout,
                    };
                    break Self::lost(reason, rule.message.map(str::to_string));
                }
            }

            self.ticker.wait_next();
        };

        if let MissionOutcome::Lost(_) = ending.outcome {
            self.robot.set_velocity(0.0);
            self.robot.set_turn_rate(0.0);
        }
        ctx.outcome = Some(ending.outcome);

        let summary = match (&ending.outcome, &ending.message) {
            (MissionOutcome::Finished, None) => format!("{name} finished"),
            (MissionOutcome::Finished, Some(msg)) => format!("{name} finished: {msg}"),
            (MissionOutcome::Lost(reason), None) => format!("{name} lost: {reason}"),
            (MissionOutcome::Lost(reason), Some(msg)) => format!("{name} lost: {reason}: {msg}"),
        };
        self.log(&ctx, ctx.state, &summary);

        let duration = self.clock.elapsed_since(ctx.started_at);
        tracing::info!(
            mission = name,
            outcome = %ending.outcome,
            state = %ctx.state,
            ticks,
            transitions = transitions.len(),
            "mission ended"
        );

        MissionReport {
            mission: name.to_string(),
            outcome: ending.outcome,
            final_state: ctx.state,
            ticks,
            duration,
            transitions,
            message: ending.message,
        }
    }

    fn lost(reason: LostReason, message: Option<String>) -> Ending {
        Ending {
            outcome: MissionOutcome::Lost(reason),
            message,
        }
    }

    fn apply_all(&mut self, actions: &[Action]) {
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: &Action) {
        match *action {
            Action::Velocity { value } => self.robot.set_velocity(value),
            Action::TurnRate { value } => self.robot.set_turn_rate(value),
            Action::Heading { radians } => self.robot.set_desired_heading(radians),
            Action::EdgeFollow { left, offset } => self.robot.set_edge_follow_mode(left, offset),
            Action::Servo {
                index,
                enabled,
                position,
                velocity,
            } => self.robot.set_servo(index, enabled, position, velocity),
            Action::ResetPose => self.robot.reset_pose(PoseReset::All),
            Action::ResetDistance => self.robot.reset_pose(PoseReset::Distance),
            Action::ResetTurned => self.robot.reset_pose(PoseReset::Turned),
        }
    }

    fn log(&mut self, ctx: &RuntimeContext, state: StateId, message: &str) {
        let at = self.clock.elapsed_since(ctx.started_at);
        if let Err(e) = self.logger.record(at, state, message) {
            tracing::warn!(
                mission = self.program.name(),
                error = %e,
                "mission log write failed, file logging disabled for this run"
            );
            self.logger.drop_file_sink();
        }
    }
}
