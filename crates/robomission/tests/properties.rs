//! Property tests over generated forward-only programs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{Call, MockRobot};
use proptest::prelude::*;
use robomission::{
    Action, Condition, EdgeReading, FakeClock, FakeTicker, MissionOutcome, MissionProgram,
    MissionRunner, MissionState, Outcome, SensorSnapshot, StateId, Timeout, Transition,
};
use std::time::Duration;

const TICK_MS: u64 = 2;
const MAX_TIMEOUT_MS: u64 = 100;

#[derive(Debug, Clone)]
struct RawState {
    guards: Vec<(Condition, u32)>,
    timeout_ms: u64,
    timeout_target: u32,
}

fn condition() -> impl Strategy<Value = Condition> {
    prop_oneof![
        (0.0f64..2.0).prop_map(Condition::DistanceAtLeast),
        (0.0f64..0.2).prop_map(Condition::ElapsedAtLeast),
        (0.0f64..1.0).prop_map(|meters| Condition::RangeBelow { sensor: 0, meters }),
        Just(Condition::EdgeValid),
        Just(Condition::EdgeLost),
    ]
}

fn raw_state() -> impl Strategy<Value = RawState> {
    (
        prop::collection::vec((condition(), any::<u32>()), 0..3),
        1u64..=MAX_TIMEOUT_MS,
        any::<u32>(),
    )
        .prop_map(|(guards, timeout_ms, timeout_target)| RawState {
            guards,
            timeout_ms,
            timeout_target,
        })
}

/// Outcome that only moves forward, so every path ends.
fn forward_outcome(index: usize, count: usize, raw: u32) -> Outcome {
    let choices = (count - index - 1) + 2;
    match raw as usize % choices {
        0 => Outcome::Finished,
        1 => Outcome::Lost,
        k => Outcome::GoTo(state_id(index + k - 1)),
    }
}

fn state_id(index: usize) -> StateId {
    StateId(u32::try_from(index).unwrap())
}

/// Entry velocity that identifies the state.
fn marker(index: usize) -> f64 {
    index as f64 + 1.0
}

fn build(raw: &[RawState]) -> MissionProgram {
    let count = raw.len();
    let mut builder = MissionProgram::builder("generated", 0);
    for (index, shape) in raw.iter().enumerate() {
        let mut state = MissionState::new(state_id(index))
            .with_entry(Action::Velocity {
                value: marker(index),
            })
            .with_timeout(Timeout::new(
                Duration::from_millis(shape.timeout_ms),
                forward_outcome(index, count, shape.timeout_target),
            ));
        for (when, target) in &shape.guards {
            state = state.with_transition(Transition::new(
                when.clone(),
                forward_outcome(index, count, *target),
            ));
        }
        builder = builder.state(state);
    }
    builder.build().unwrap()
}

fn script() -> impl Strategy<Value = Vec<SensorSnapshot>> {
    prop::collection::vec(
        (0.0f64..2.0, 0.0f64..1.0, any::<bool>()).prop_map(|(dist, range, valid)| {
            SensorSnapshot {
                distance_driven: dist,
                ranges: vec![range],
                edge: EdgeReading {
                    valid,
                    ..EdgeReading::default()
                },
                ..SensorSnapshot::default()
            }
        }),
        1..60,
    )
}

fn run(program: &MissionProgram, script: Vec<SensorSnapshot>) -> (robomission::MissionReport, MockRobot) {
    let mut robot = MockRobot::new(script);
    let clock = FakeClock::new();
    let ticker = FakeTicker::new(clock.clone(), Duration::from_millis(TICK_MS));
    let report = MissionRunner::new(program, &mut robot, clock, ticker).run();
    (report, robot)
}

proptest! {
    #[test]
    fn prop_terminates_within_timeout_bound(
        raw in prop::collection::vec(raw_state(), 1..6),
        snapshots in script()
    ) {
        let program = build(&raw);
        let (report, _) = run(&program, snapshots);

        let per_state = MAX_TIMEOUT_MS / TICK_MS + 2;
        prop_assert!(report.ticks <= per_state * raw.len() as u64);
        prop_assert!(report.transitions.len() < raw.len());
    }

    #[test]
    fn prop_at_most_one_transition_per_tick(
        raw in prop::collection::vec(raw_state(), 1..6),
        snapshots in script()
    ) {
        let program = build(&raw);
        let (report, _) = run(&program, snapshots);

        for pair in report.transitions.windows(2) {
            prop_assert!(pair[0].tick < pair[1].tick);
            prop_assert_eq!(pair[0].to, pair[1].from);
        }
        if let Some(first) = report.transitions.first() {
            prop_assert_eq!(first.from, program.start());
        }
    }

    #[test]
    fn prop_entry_issued_once_per_visit(
        raw in prop::collection::vec(raw_state(), 1..6),
        snapshots in script()
    ) {
        let program = build(&raw);
        let (report, robot) = run(&program, snapshots);

        for index in 0..raw.len() {
            let id = state_id(index);
            let visits = usize::from(id == program.start())
                + report.transitions.iter().filter(|t| t.to == id).count();
            let entries = robot
                .calls
                .iter()
                .filter(|c| **c == Call::Velocity(marker(index)))
                .count();
            prop_assert_eq!(entries, visits, "state {}", id);
        }
    }

    #[test]
    fn prop_lost_always_ends_with_stop(
        raw in prop::collection::vec(raw_state(), 1..6),
        snapshots in script()
    ) {
        let program = build(&raw);
        let (report, robot) = run(&program, snapshots);

        match report.outcome {
            MissionOutcome::Lost(_) => {
                prop_assert_eq!(
                    robot.final_stop(),
                    vec![Call::Velocity(0.0), Call::TurnRate(0.0)]
                );
            }
            MissionOutcome::Finished => {
                prop_assert!(robot.calls_after_last_snapshot().is_empty());
            }
        }
    }
}
