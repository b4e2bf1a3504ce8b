//! Robomission: tick-driven mission sequencing for small mobile robots
//!
//! A mission is a validated table of states. Each state issues its entry
//! actions once, then polls guarded transitions every tick until one fires or
//! its timeout expires. Missions end `Finished` or `Lost`; `Lost` always
//! forces zero velocity and zero turn rate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   snapshot   ┌───────────────┐  decision  ┌──────────────┐
//! │ SensorFeed   │─────────────►│ evaluate()    │───────────►│ MissionRunner│
//! └──────────────┘              └───────────────┘            └──────┬───────┘
//!        ▲                                                          │
//!        │ reset_pose                  actions / fail-safe stop     ▼
//!        └─────────────────────────────────────────────── ActuationFacade
//! ```
//!
//! # Example
//!
//! ```
//! use robomission::{
//!     Action, CancelSignal, Condition, FakeClock, FakeTicker, MissionProgram,
//!     MissionRunner, MissionState, Outcome, SimConfig, SimulatedRobot, Transition,
//! };
//! use std::time::Duration;
//!
//! let program = MissionProgram::builder("demo", 10)
//!     .state(
//!         MissionState::new(10)
//!             .with_entry(Action::Velocity { value: 0.5 })
//!             .with_transition(Transition::new(Condition::DistanceAtLeast(0.2), Outcome::Finished)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let clock = FakeClock::new();
//! let robot = SimulatedRobot::new(clock.clone(), SimConfig::default());
//! let ticker = FakeTicker::new(clock.clone(), Duration::from_millis(2));
//! let report = MissionRunner::new(&program, robot, clock, ticker)
//!     .with_cancel(CancelSignal::new())
//!     .run();
//! assert!(report.outcome.is_finished());
//! ```

#![warn(missing_docs)]

#[allow(missing_docs)]
pub mod actuation;
#[allow(missing_docs)]
pub mod cancel;
#[allow(missing_docs)]
pub mod clock;
/// Result and error types
pub mod error;
#[allow(missing_docs)]
pub mod evaluator;
#[allow(missing_docs)]
pub mod logger;
#[allow(missing_docs)]
pub mod mission;
#[allow(missing_docs)]
pub mod program;
#[allow(missing_docs)]
pub mod runner;
#[allow(missing_docs)]
pub mod sensors;
#[allow(missing_docs)]
pub mod settings;
#[allow(missing_docs)]
pub mod sim;

pub use actuation::{ActuationCommand, ActuationFacade, EdgeFollow, Steering};
pub use cancel::CancelSignal;
pub use clock::{Clock, FakeClock, FakeTicker, IntervalTicker, SystemClock, Ticker};
pub use error::{LogSinkFailure, MissionError, MissionResult, ProgramError, SettingsError};
pub use evaluator::{evaluate, Cause, Decision, Rule};
pub use logger::{ConsoleStream, MemorySink, MissionLogger};
pub use mission::Mission;
pub use program::{
    to_dot, Action, AnalysisIssue, AnalysisReport, Condition, IssueSeverity, MissionProgram,
    MissionState, Outcome, ProgramAnalyzer, StateId, Timeout, Transition,
};
pub use runner::{
    LostReason, MissionOutcome, MissionReport, MissionRunner, RuntimeContext, TransitionRecord,
};
pub use sensors::{EdgeReading, PoseReset, SensorFeed, SensorSnapshot};
pub use settings::{MissionConfig, MissionSettings};
pub use sim::{SimConfig, SimulatedRobot};
