//! Mission programs: declarative state tables.
//!
//! # Example
//!
//! ```yaml
//! version: "1.0"
//! name: plan401
//! start: 10
//! states:
//!   - id: 10
//!     entry:
//!       - type: reset_pose
//!       - type: velocity
//!         value: 0.1
//!     transitions:
//!       - when: { distance_at_least: 1.0 }
//!         outcome: finished
//!     timeout:
//!       after_secs: 10
//!       outcome: lost
//! ```

pub mod analysis;
pub mod schema;

pub use analysis::{to_dot, AnalysisIssue, AnalysisReport, IssueSeverity, ProgramAnalyzer};
pub use schema::{
    Action, Condition, MissionProgram, MissionState, Outcome, ProgramBuilder, ProgramTable,
    StateId, Timeout, Transition, SCHEMA_VERSION,
};
