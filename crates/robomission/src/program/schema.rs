//! Mission YAML schema types.
//!
//! A mission is a table of states. Each state carries an entry action, an
//! ordered list of guarded transitions and an optional timeout. Programs are
//! validated once on load and are immutable afterwards.

use crate::error::ProgramError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Duration;

/// Supported mission file version.
pub const SCHEMA_VERSION: &str = "1.0";

/// State identifier.
///
/// Plain integers, as in hand-written mission tables (`10`, `11`, `55`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub u32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StateId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Validated mission program.
///
/// Deserializing goes through [`MissionProgram::try_from`], so a program
/// obtained from any serde format is validated and indexed like one from
/// [`MissionProgram::from_yaml`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ProgramTable", into = "ProgramTable")]
pub struct MissionProgram {
    table: ProgramTable,
    index: HashMap<StateId, usize>,
}

/// Mission file contents before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramTable {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start: StateId,
    /// Issued on a clean `Finished` exit, after the firing rule's own actions
    #[serde(default)]
    pub finish_actions: Vec<Action>,
    pub states: Vec<MissionState>,
}

/// One step of a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionState {
    pub id: StateId,
    #[serde(default)]
    pub description: String,
    /// Issued exactly once per visit, on the tick the state is entered
    #[serde(default)]
    pub entry: Vec<Action>,
    /// Tested in declared order; the first match wins
    #[serde(default)]
    pub transitions: Vec<Transition>,
    /// Applied only when no transition matched
    #[serde(default)]
    pub timeout: Option<Timeout>,
}

/// Guarded exit from a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(with = "serde_yaml_ng::with::singleton_map_recursive")]
    pub when: Condition,
    #[serde(with = "serde_yaml_ng::with::singleton_map_recursive")]
    pub outcome: Outcome,
    #[serde(default)]
    pub message: Option<String>,
    /// Issued when this guard fires, before the next state's entry action
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Time limit for staying in a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeout {
    pub after_secs: f64,
    #[serde(with = "serde_yaml_ng::with::singleton_map_recursive")]
    pub outcome: Outcome,
    #[serde(default)]
    pub message: Option<String>,
}

/// Where a fired rule leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Move to another state (or re-enter the current one)
    GoTo(StateId),
    /// Terminal success
    Finished,
    /// Terminal failure; always followed by a fail-safe stop
    Lost,
}

/// Actuation or pose command issued by a state or transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Linear velocity in m/s
    Velocity { value: f64 },
    /// Turn rate in rad/s
    TurnRate { value: f64 },
    /// Desired absolute heading in radians
    Heading { radians: f64 },
    /// Follow a line edge
    EdgeFollow { left: bool, offset: f64 },
    /// Servo position command
    Servo {
        index: u8,
        enabled: bool,
        position: i32,
        #[serde(default)]
        velocity: i32,
    },
    /// Reset distance, angle and heading
    ResetPose,
    /// Reset distance driven only
    ResetDistance,
    /// Reset angle turned only
    ResetTurned,
}

/// Guard predicate over the sensor snapshot and time spent in the state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Distance driven >= meters
    DistanceAtLeast(f64),
    /// Distance driven <= meters (reversing)
    DistanceAtMost(f64),
    /// Angle turned >= radians
    TurnedAtLeast(f64),
    /// Angle turned <= radians (turning right)
    TurnedAtMost(f64),
    /// Ranging sensor reads closer than meters
    RangeBelow { sensor: usize, meters: f64 },
    /// Ranging sensor reads at least meters
    RangeAtLeast { sensor: usize, meters: f64 },
    /// Detected line is wider than meters
    EdgeWidthAbove(f64),
    EdgeValid,
    EdgeLost,
    /// Right edge offset is greater than meters
    RightEdgeAbove(f64),
    /// Seconds spent in the current state
    ElapsedAtLeast(f64),
    Always,
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl MissionProgram {
    /// Parse and validate a mission from YAML.
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the program is structurally unsound.
    pub fn from_yaml(yaml: &str) -> Result<Self, ProgramError> {
        let table: ProgramTable =
            serde_yaml_ng::from_str(yaml).map_err(|e| ProgramError::ParseError(e.to_string()))?;
        Self::try_from(table)
    }

    /// Start building a program in code.
    pub fn builder(name: impl Into<String>, start: impl Into<StateId>) -> ProgramBuilder {
        ProgramBuilder {
            name: name.into(),
            description: String::new(),
            start: start.into(),
            finish_actions: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ProgramError> {
        serde_yaml_ng::to_string(self).map_err(|e| ProgramError::ParseError(e.to_string()))
    }

    /// Check the structural invariants.
    ///
    /// # Errors
    /// Same as [`ProgramTable::validate`].
    pub fn validate(&self) -> Result<(), ProgramError> {
        self.table.validate()
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn description(&self) -> &str {
        &self.table.description
    }

    pub fn start(&self) -> StateId {
        self.table.start
    }

    pub fn finish_actions(&self) -> &[Action] {
        &self.table.finish_actions
    }

    /// States in declaration order.
    pub fn states(&self) -> &[MissionState] {
        &self.table.states
    }

    /// Look up a state by id.
    pub fn state(&self, id: StateId) -> Option<&MissionState> {
        self.index.get(&id).and_then(|&i| self.table.states.get(i))
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.index.contains_key(&id)
    }

    /// Drop a state from the lookup table while keeping its declaration.
    #[cfg(test)]
    pub(crate) fn forget_state(&mut self, id: StateId) {
        self.index.remove(&id);
    }
}

impl ProgramTable {
    /// Check the structural invariants.
    ///
    /// # Errors
    /// Returns the first defect found: wrong version, no states, duplicate
    /// state id, undefined start, non-finite guard threshold, undefined
    /// transition or timeout target, or an invalid timeout.
    pub fn validate(&self) -> Result<(), ProgramError> {
        if self.version != SCHEMA_VERSION {
            return Err(ProgramError::InvalidVersion(self.version.clone()));
        }
        if self.states.is_empty() {
            return Err(ProgramError::EmptyStates(self.name.clone()));
        }

        let mut seen = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !seen.insert(state.id) {
                return Err(ProgramError::DuplicateState(state.id));
            }
        }

        if !seen.contains(&self.start) {
            return Err(ProgramError::UndefinedStart(self.start));
        }

        for state in &self.states {
            for (index, transition) in state.transitions.iter().enumerate() {
                if !transition.when.is_finite() {
                    return Err(ProgramError::InvalidThreshold {
                        state: state.id,
                        index,
                    });
                }
                if let Outcome::GoTo(target) = transition.outcome {
                    if !seen.contains(&target) {
                        return Err(ProgramError::UndefinedTarget {
                            from: state.id,
                            index,
                            target,
                        });
                    }
                }
            }
            if let Some(timeout) = &state.timeout {
                if !timeout.after_secs.is_finite() || timeout.after_secs < 0.0 {
                    return Err(ProgramError::InvalidTimeout {
                        state: state.id,
                        secs: timeout.after_secs,
                    });
                }
                if let Outcome::GoTo(target) = timeout.outcome {
                    if !seen.contains(&target) {
                        return Err(ProgramError::UndefinedTimeoutTarget {
                            from: state.id,
                            target,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl TryFrom<ProgramTable> for MissionProgram {
    type Error = ProgramError;

    fn try_from(table: ProgramTable) -> Result<Self, Self::Error> {
        table.validate()?;
        let index = build_index(&table.states);
        Ok(Self { table, index })
    }
}

impl From<MissionProgram> for ProgramTable {
    fn from(program: MissionProgram) -> Self {
        program.table
    }
}

fn build_index(states: &[MissionState]) -> HashMap<StateId, usize> {
    states
        .iter()
        .enumerate()
        .map(|(i, state)| (state.id, i))
        .collect()
}

/// Builder for programs assembled in code rather than YAML.
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    name: String,
    description: String,
    start: StateId,
    finish_actions: Vec<Action>,
    states: Vec<MissionState>,
}

impl ProgramBuilder {
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn finish_action(mut self, action: Action) -> Self {
        self.finish_actions.push(action);
        self
    }

    #[must_use]
    pub fn state(mut self, state: MissionState) -> Self {
        self.states.push(state);
        self
    }

    /// Validate and freeze the program.
    ///
    /// # Errors
    /// Same as [`MissionProgram::validate`].
    pub fn build(self) -> Result<MissionProgram, ProgramError> {
        MissionProgram::try_from(ProgramTable {
            version: SCHEMA_VERSION.to_string(),
            name: self.name,
            description: self.description,
            start: self.start,
            finish_actions: self.finish_actions,
            states: self.states,
        })
    }
}

impl MissionState {
    pub fn new(id: impl Into<StateId>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            entry: Vec::new(),
            transitions: Vec::new(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_entry(mut self, action: Action) -> Self {
        self.entry.push(action);
        self
    }

    #[must_use]
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Transition {
    pub fn new(when: Condition, outcome: Outcome) -> Self {
        Self {
            when,
            outcome,
            message: None,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

impl Timeout {
    pub fn new(after: Duration, outcome: Outcome) -> Self {
        Self {
            after_secs: after.as_secs_f64(),
            outcome,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Timeout as a duration. Validation guarantees a finite, non-negative value.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.after_secs).unwrap_or(Duration::MAX)
    }
}

impl Condition {
    /// Whether every numeric threshold in the condition is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::DistanceAtLeast(v)
            | Self::DistanceAtMost(v)
            | Self::TurnedAtLeast(v)
            | Self::TurnedAtMost(v)
            | Self::EdgeWidthAbove(v)
            | Self::RightEdgeAbove(v)
            | Self::ElapsedAtLeast(v) => v.is_finite(),
            Self::RangeBelow { meters, .. } | Self::RangeAtLeast { meters, .. } => {
                meters.is_finite()
            }
            Self::EdgeValid | Self::EdgeLost | Self::Always => true,
            Self::All(parts) | Self::Any(parts) => parts.iter().all(Self::is_finite),
            Self::Not(inner) => inner.is_finite(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoTo(id) => write!(f, "-> {id}"),
            Self::Finished => write!(f, "finished"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DistanceAtLeast(m) => write!(f, "dist >= {m}"),
            Self::DistanceAtMost(m) => write!(f, "dist <= {m}"),
            Self::TurnedAtLeast(r) => write!(f, "turned >= {r}"),
            Self::TurnedAtMost(r) => write!(f, "turned <= {r}"),
            Self::RangeBelow { sensor, meters } => write!(f, "range[{sensor}] < {meters}"),
            Self::RangeAtLeast { sensor, meters } => write!(f, "range[{sensor}] >= {meters}"),
            Self::EdgeWidthAbove(m) => write!(f, "edge.width > {m}"),
            Self::EdgeValid => write!(f, "edge.valid"),
            Self::EdgeLost => write!(f, "!edge.valid"),
            Self::RightEdgeAbove(m) => write!(f, "edge.right > {m}"),
            Self::ElapsedAtLeast(s) => write!(f, "t >= {s}s"),
            Self::Always => write!(f, "always"),
            Self::All(conditions) => write_joined(f, conditions, " and "),
            Self::Any(conditions) => write_joined(f, conditions, " or "),
            Self::Not(inner) => write!(f, "not ({inner})"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, conditions: &[Condition], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{condition}")?;
    }
    write!(f, ")")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    const PLAN99: &str = r#"
version: "1.0"
name: plan99
description: "wait for the gate robot, then find and follow the line"
start: 5
states:
  - id: 5
    description: "wait for Regbot"
    transitions:
      - when: { range_below: { sensor: 0, meters: 0.25 } }
        outcome: { go_to: 12 }
        message: "forward 0.25 m/s"
        actions:
          - type: reset_pose
          - type: velocity
            value: 0.25
          - type: turn_rate
            value: 0.0
    timeout:
      after_secs: 10
      outcome: lost
      message: "Gave up waiting for Regbot"
  - id: 12
    transitions:
      - when: { distance_at_least: 0.3 }
        outcome: { go_to: 20 }
        actions:
          - type: reset_distance
    timeout:
      after_secs: 10
      outcome: lost
  - id: 20
    transitions:
      - when: { edge_width_above: 0.05 }
        outcome: finished
      - when: { any: [ { elapsed_at_least: 10 }, { distance_at_least: 0.6 } ] }
        outcome: lost
        message: "failed to find line after 10 sec / 60cm"
"#;

    #[test]
    fn test_parse_valid_program() {
        let program = MissionProgram::from_yaml(PLAN99).expect("should parse");
        assert_eq!(program.name(), "plan99");
        assert_eq!(program.start(), StateId(5));
        assert_eq!(program.states().len(), 3);

        let wait = program.state(StateId(5)).unwrap();
        assert_eq!(wait.transitions.len(), 1);
        assert_eq!(wait.transitions[0].outcome, Outcome::GoTo(StateId(12)));
        assert_eq!(wait.transitions[0].actions.len(), 3);
        assert!(matches!(
            wait.transitions[0].when,
            Condition::RangeBelow { sensor: 0, meters } if meters == 0.25
        ));
        assert_eq!(
            wait.timeout.as_ref().unwrap().duration(),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_parse_compound_conditions() {
        let program = MissionProgram::from_yaml(PLAN99).unwrap();
        let search = program.state(StateId(20)).unwrap();
        match &search.transitions[1].when {
            Condition::Any(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0], Condition::ElapsedAtLeast(10.0));
            }
            other => panic!("expected any, got {other:?}"),
        }
    }

    #[test]
    fn test_reject_duplicate_state_id() {
        let yaml = r#"
version: "1.0"
name: dup
start: 10
states:
  - id: 10
    transitions:
      - when: always
        outcome: { go_to: 11 }
  - id: 11
    transitions:
      - when: always
        outcome: finished
  - id: 11
    transitions:
      - when: always
        outcome: lost
"#;
        let result = MissionProgram::from_yaml(yaml);
        assert_eq!(result.unwrap_err(), ProgramError::DuplicateState(StateId(11)));
    }

    #[test]
    fn test_reject_undefined_target() {
        let yaml = PLAN99.replace("go_to: 20", "go_to: 21");
        let result = MissionProgram::from_yaml(&yaml);
        assert!(matches!(
            result,
            Err(ProgramError::UndefinedTarget { from: StateId(12), index: 0, target: StateId(21) })
        ));
    }

    #[test]
    fn test_reject_undefined_start() {
        let yaml = PLAN99.replace("start: 5", "start: 4");
        let result = MissionProgram::from_yaml(&yaml);
        assert_eq!(result.unwrap_err(), ProgramError::UndefinedStart(StateId(4)));
    }

    #[test]
    fn test_reject_undefined_timeout_target() {
        let program = MissionProgram::builder("t", 1)
            .state(
                MissionState::new(1)
                    .with_timeout(Timeout::new(Duration::from_secs(1), Outcome::GoTo(StateId(9)))),
            )
            .build();
        assert!(matches!(
            program,
            Err(ProgramError::UndefinedTimeoutTarget { from: StateId(1), target: StateId(9) })
        ));
    }

    #[test]
    fn test_reject_negative_timeout() {
        let yaml = PLAN99.replace("after_secs: 10\n      outcome: lost\n      message", "after_secs: -1\n      outcome: lost\n      message");
        let result = MissionProgram::from_yaml(&yaml);
        assert!(matches!(result, Err(ProgramError::InvalidTimeout { state: StateId(5), .. })));
    }

    #[test]
    fn test_reject_invalid_version() {
        let yaml = PLAN99.replace("version: \"1.0\"", "version: \"2.0\"");
        assert!(matches!(
            MissionProgram::from_yaml(&yaml),
            Err(ProgramError::InvalidVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_reject_empty_states() {
        let yaml = "version: \"1.0\"\nname: empty\nstart: 1\nstates: []\n";
        assert!(matches!(
            MissionProgram::from_yaml(yaml),
            Err(ProgramError::EmptyStates(_))
        ));
    }

    #[test]
    fn test_parse_error_invalid_yaml() {
        let result = MissionProgram::from_yaml("states: [[[");
        assert!(matches!(result, Err(ProgramError::ParseError(_))));
    }

    #[test]
    fn test_self_loop_is_legal() {
        let program = MissionProgram::builder("loop", 1)
            .state(
                MissionState::new(1)
                    .with_transition(Transition::new(
                        Condition::ElapsedAtLeast(0.5),
                        Outcome::GoTo(StateId(1)),
                    ))
                    .with_transition(Transition::new(
                        Condition::DistanceAtLeast(1.0),
                        Outcome::Finished,
                    )),
            )
            .build();
        assert!(program.is_ok());
    }

    #[test]
    fn test_action_variants_parsing() {
        let yaml = r#"
version: "1.0"
name: actions
start: 1
states:
  - id: 1
    entry:
      - type: velocity
        value: -0.2
      - type: turn_rate
        value: 0.628
      - type: heading
        radians: 3.14
      - type: edge_follow
        left: false
        offset: -0.03
      - type: servo
        index: 1
        enabled: true
        position: 0
        velocity: 500
      - type: reset_pose
      - type: reset_distance
      - type: reset_turned
    transitions:
      - when: edge_valid
        outcome: finished
"#;
        let program = MissionProgram::from_yaml(yaml).unwrap();
        let entry = &program.state(StateId(1)).unwrap().entry;
        assert_eq!(entry.len(), 8);
        assert_eq!(entry[0], Action::Velocity { value: -0.2 });
        assert_eq!(
            entry[3],
            Action::EdgeFollow {
                left: false,
                offset: -0.03
            }
        );
        assert_eq!(
            entry[4],
            Action::Servo {
                index: 1,
                enabled: true,
                position: 0,
                velocity: 500
            }
        );
        assert_eq!(entry[7], Action::ResetTurned);
    }

    #[test]
    fn test_yaml_roundtrip_preserves_lookup() {
        let program = MissionProgram::from_yaml(PLAN99).unwrap();
        let yaml = program.to_yaml().unwrap();
        let reparsed = MissionProgram::from_yaml(&yaml).unwrap();
        assert!(reparsed.contains(StateId(20)));
        assert_eq!(reparsed.states(), program.states());
    }

    #[test]
    fn test_to_yaml_writes_map_form() {
        let program = MissionProgram::from_yaml(PLAN99).unwrap();
        let yaml = program.to_yaml().unwrap();
        assert!(yaml.contains("go_to: 12"));
        assert!(yaml.contains("distance_at_least: 0.3"));
        assert!(!yaml.contains('!'));
    }

    #[test]
    fn test_serde_deserialize_validates_and_indexes() {
        let program = MissionProgram::builder("serde", 10)
            .state(
                MissionState::new(10)
                    .with_transition(Transition::new(
                        Condition::DistanceAtLeast(1.0),
                        Outcome::GoTo(StateId(11)),
                    ))
                    .with_timeout(Timeout::new(Duration::from_secs(2), Outcome::Lost)),
            )
            .state(MissionState::new(11).with_transition(Transition::new(
                Condition::Always,
                Outcome::Finished,
            )))
            .build()
            .unwrap();
        let yaml = program.to_yaml().unwrap();

        let loaded: MissionProgram = serde_yaml_ng::from_str(&yaml).unwrap();
        assert!(loaded.contains(StateId(10)));
        assert!(loaded.state(StateId(11)).is_some());

        let broken = yaml.replace("go_to: 11", "go_to: 12");
        let err = serde_yaml_ng::from_str::<MissionProgram>(&broken).unwrap_err();
        assert!(err.to_string().contains("undefined state 12"));
    }

    #[test]
    fn test_reject_non_finite_threshold() {
        let program = MissionProgram::builder("nan", 1)
            .state(
                MissionState::new(1)
                    .with_transition(Transition::new(Condition::Always, Outcome::Lost))
                    .with_transition(Transition::new(
                        Condition::Not(Box::new(Condition::Any(vec![
                            Condition::EdgeValid,
                            Condition::DistanceAtLeast(f64::NAN),
                        ]))),
                        Outcome::Finished,
                    )),
            )
            .build();
        assert!(matches!(
            program,
            Err(ProgramError::InvalidThreshold { state: StateId(1), index: 1 })
        ));

        let yaml = PLAN99.replace("distance_at_least: 0.3", "distance_at_least: .inf");
        assert!(matches!(
            MissionProgram::from_yaml(&yaml),
            Err(ProgramError::InvalidThreshold { state: StateId(12), index: 0 })
        ));
    }

    #[test]
    fn test_condition_display() {
        let condition = Condition::All(vec![
            Condition::EdgeValid,
            Condition::RightEdgeAbove(-0.04),
            Condition::TurnedAtLeast(0.3),
        ]);
        assert_eq!(
            condition.to_string(),
            "(edge.valid and edge.right > -0.04 and turned >= 0.3)"
        );
    }
}
