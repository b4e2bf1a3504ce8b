//! Transition evaluation.
//!
//! `evaluate` is a pure function of the state, one sensor snapshot and the
//! time spent in the state. Guards are tested in declared order and the first
//! match wins. The timeout is considered only when no guard matched.

use crate::program::{Action, Condition, MissionState, Outcome, StateId};
use crate::sensors::SensorSnapshot;
use std::time::Duration;

/// What fired a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    /// Guarded transition at this index
    Guard(usize),
    Timeout,
}

impl std::fmt::Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guard(index) => write!(f, "guard {index}"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

/// The rule that produced a decision, borrowed from the program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule<'a> {
    pub cause: Cause,
    pub message: Option<&'a str>,
    /// Actions attached to the rule (empty for timeouts)
    pub actions: &'a [Action],
}

/// Result of evaluating one state for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision<'a> {
    Stay,
    GoTo { target: StateId, rule: Rule<'a> },
    Finished(Rule<'a>),
    Lost(Rule<'a>),
}

impl Decision<'_> {
    /// The fired rule, if any.
    pub fn rule(&self) -> Option<&Rule<'_>> {
        match self {
            Self::Stay => None,
            Self::GoTo { rule, .. } | Self::Finished(rule) | Self::Lost(rule) => Some(rule),
        }
    }
}

/// Decide the next step for `state`.
pub fn evaluate<'a>(
    state: &'a MissionState,
    snapshot: &SensorSnapshot,
    elapsed: Duration,
) -> Decision<'a> {
    for (index, transition) in state.transitions.iter().enumerate() {
        if transition.when.holds(snapshot, elapsed) {
            let rule = Rule {
                cause: Cause::Guard(index),
                message: transition.message.as_deref(),
                actions: &transition.actions,
            };
            return decide(transition.outcome, rule);
        }
    }

    if let Some(timeout) = &state.timeout {
        if elapsed >= timeout.duration() {
            let rule = Rule {
                cause: Cause::Timeout,
                message: timeout.message.as_deref(),
                actions: &[],
            };
            return decide(timeout.outcome, rule);
        }
    }

    Decision::Stay
}

fn decide(outcome: Outcome, rule: Rule<'_>) -> Decision<'_> {
    match outcome {
        Outcome::GoTo(target) => Decision::GoTo { target, rule },
        Outcome::Finished => Decision::Finished(rule),
        Outcome::Lost => Decision::Lost(rule),
    }
}

impl Condition {
    /// Test the condition against one snapshot.
    ///
    /// `elapsed` is the time spent in the current state.
    pub fn holds(&self, snapshot: &SensorSnapshot, elapsed: Duration) -> bool {
        match self {
            Self::DistanceAtLeast(m) => snapshot.distance_driven >= *m,
            Self::DistanceAtMost(m) => snapshot.distance_driven <= *m,
            Self::TurnedAtLeast(r) => snapshot.angle_turned >= *r,
            Self::TurnedAtMost(r) => snapshot.angle_turned <= *r,
            Self::RangeBelow { sensor, meters } => snapshot.range(*sensor) < *meters,
            Self::RangeAtLeast { sensor, meters } => snapshot.range(*sensor) >= *meters,
            Self::EdgeWidthAbove(m) => snapshot.edge.width > *m,
            Self::EdgeValid => snapshot.edge.valid,
            Self::EdgeLost => !snapshot.edge.valid,
            Self::RightEdgeAbove(m) => snapshot.edge.right_edge_offset > *m,
            Self::ElapsedAtLeast(secs) => elapsed.as_secs_f64() >= *secs,
            Self::Always => true,
            Self::All(parts) => parts.iter().all(|c| c.holds(snapshot, elapsed)),
            Self::Any(parts) => parts.iter().any(|c| c.holds(snapshot, elapsed)),
            Self::Not(inner) => !inner.holds(snapshot, elapsed),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::program::{Timeout, Transition};
    use crate::sensors::EdgeReading;

    fn snapshot(dist: f64) -> SensorSnapshot {
        SensorSnapshot {
            distance_driven: dist,
            ..SensorSnapshot::default()
        }
    }

    fn drive_state() -> MissionState {
        MissionState::new(10)
            .with_entry(Action::Velocity { value: -0.6 })
            .with_transition(
                Transition::new(Condition::DistanceAtMost(-1.0), Outcome::Finished)
                    .with_message("back at start"),
            )
            .with_transition(Transition::new(
                Condition::RangeBelow {
                    sensor: 0,
                    meters: 0.2,
                },
                Outcome::GoTo(StateId(20)),
            ))
            .with_timeout(
                Timeout::new(Duration::from_secs(10), Outcome::Lost).with_message("too long"),
            )
    }

    #[test]
    fn test_stay_when_nothing_matches() {
        let state = drive_state();
        let decision = evaluate(&state, &snapshot(-0.5), Duration::from_secs(2));
        assert_eq!(decision, Decision::Stay);
        assert!(decision.rule().is_none());
    }

    #[test]
    fn test_first_matching_guard_wins() {
        let state = drive_state();
        let snap = SensorSnapshot {
            distance_driven: -1.2,
            ranges: vec![0.1],
            ..SensorSnapshot::default()
        };
        match evaluate(&state, &snap, Duration::ZERO) {
            Decision::Finished(rule) => {
                assert_eq!(rule.cause, Cause::Guard(0));
                assert_eq!(rule.message, Some("back at start"));
            }
            other => panic!("expected finished, got {other:?}"),
        }
    }

    #[test]
    fn test_guard_beats_timeout_on_same_tick() {
        let state = drive_state();
        let snap = SensorSnapshot {
            ranges: vec![0.1],
            ..SensorSnapshot::default()
        };
        let decision = evaluate(&state, &snap, Duration::from_secs(30));
        assert!(matches!(
            decision,
            Decision::GoTo { target: StateId(20), rule } if rule.cause == Cause::Guard(1)
        ));
    }

    #[test]
    fn test_timeout_fires_at_exact_duration() {
        let state = drive_state();
        let before = evaluate(&state, &snapshot(0.0), Duration::from_millis(9_998));
        assert_eq!(before, Decision::Stay);

        match evaluate(&state, &snapshot(0.0), Duration::from_secs(10)) {
            Decision::Lost(rule) => {
                assert_eq!(rule.cause, Cause::Timeout);
                assert_eq!(rule.message, Some("too long"));
                assert!(rule.actions.is_empty());
            }
            other => panic!("expected lost, got {other:?}"),
        }
    }

    #[test]
    fn test_transition_actions_are_borrowed() {
        let state = MissionState::new(1).with_transition(
            Transition::new(Condition::Always, Outcome::GoTo(StateId(2)))
                .with_action(Action::ResetPose)
                .with_action(Action::Velocity { value: 0.25 }),
        );
        let decision = evaluate(&state, &snapshot(0.0), Duration::ZERO);
        let rule = decision.rule().unwrap();
        assert_eq!(rule.actions.len(), 2);
        assert_eq!(rule.actions[0], Action::ResetPose);
    }

    #[test]
    fn test_compound_edge_condition() {
        let condition = Condition::All(vec![
            Condition::EdgeValid,
            Condition::RightEdgeAbove(-0.04),
            Condition::TurnedAtLeast(0.3),
        ]);
        let mut snap = SensorSnapshot {
            angle_turned: 0.5,
            edge: EdgeReading {
                width: 0.03,
                valid: true,
                right_edge_offset: -0.01,
            },
            ..SensorSnapshot::default()
        };
        assert!(condition.holds(&snap, Duration::ZERO));

        snap.edge.right_edge_offset = -0.05;
        assert!(!condition.holds(&snap, Duration::ZERO));
    }

    #[test]
    fn test_any_with_elapsed() {
        let condition = Condition::Any(vec![
            Condition::ElapsedAtLeast(10.0),
            Condition::DistanceAtLeast(0.6),
        ]);
        assert!(!condition.holds(&snapshot(0.3), Duration::from_secs(5)));
        assert!(condition.holds(&snapshot(0.3), Duration::from_secs(10)));
        assert!(condition.holds(&snapshot(0.7), Duration::ZERO));
    }

    #[test]
    fn test_missing_range_sensor_never_close() {
        let condition = Condition::RangeBelow {
            sensor: 4,
            meters: 0.25,
        };
        assert!(!condition.holds(&snapshot(0.0), Duration::ZERO));
        assert!(Condition::Not(Box::new(condition)).holds(&snapshot(0.0), Duration::ZERO));
    }

    #[test]
    fn test_edge_lost_and_width() {
        let mut snap = snapshot(0.0);
        assert!(Condition::EdgeLost.holds(&snap, Duration::ZERO));
        snap.edge.valid = true;
        snap.edge.width = 0.06;
        assert!(!Condition::EdgeLost.holds(&snap, Duration::ZERO));
        assert!(Condition::EdgeWidthAbove(0.05).holds(&snap, Duration::ZERO));
    }
}
