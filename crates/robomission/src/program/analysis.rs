//! Static analysis of mission programs.
//!
//! Validation rejects programs that cannot run at all. The analyzer looks at
//! programs that can run but probably do not do what their author meant:
//! unreachable states, states that hold forever, states without a timeout,
//! and guards shadowed by an earlier `always`.

use super::schema::{Condition, MissionProgram, MissionState, Outcome, StateId};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt::Write as _;

/// Result of analyzing a program.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// False when any issue has error severity
    pub is_sound: bool,
    pub issues: Vec<AnalysisIssue>,
    /// States reachable from the start state
    pub reachable: BTreeSet<StateId>,
    /// Whether any reachable rule can finish the mission
    pub can_finish: bool,
}

/// Findings of the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisIssue {
    /// State cannot be reached from the start state
    OrphanedState { state: StateId },
    /// Reachable state with no transitions and no timeout; it holds forever
    DeadEnd { state: StateId },
    /// Reachable state without a timeout
    NoTimeout { state: StateId },
    /// No reachable rule leads to `Finished`
    NeverFinishes,
    /// Guard can never fire because an earlier guard is `always`
    ShadowedGuard { state: StateId, index: usize },
}

impl AnalysisIssue {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::OrphanedState { .. } | Self::NoTimeout { .. } => IssueSeverity::Warning,
            Self::DeadEnd { .. } => IssueSeverity::Error,
            Self::NeverFinishes => IssueSeverity::Info,
            Self::ShadowedGuard { .. } => IssueSeverity::Warning,
        }
    }
}

impl std::fmt::Display for AnalysisIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrphanedState { state } => write!(f, "state {state} is unreachable"),
            Self::DeadEnd { state } => {
                write!(f, "state {state} has no transitions and no timeout")
            }
            Self::NoTimeout { state } => write!(f, "state {state} has no timeout"),
            Self::NeverFinishes => write!(f, "no reachable rule finishes the mission"),
            Self::ShadowedGuard { state, index } => {
                write!(f, "state {state} transition {index} is shadowed by an earlier 'always'")
            }
        }
    }
}

/// Severity levels for analysis issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Program analyzer.
#[derive(Debug)]
pub struct ProgramAnalyzer<'a> {
    program: &'a MissionProgram,
}

impl<'a> ProgramAnalyzer<'a> {
    pub fn new(program: &'a MissionProgram) -> Self {
        Self { program }
    }

    /// Run every check.
    pub fn analyze(&self) -> AnalysisReport {
        let mut issues = Vec::new();
        let reachable = self.reachable_states();

        for state in self.program.states() {
            if !reachable.contains(&state.id) {
                issues.push(AnalysisIssue::OrphanedState { state: state.id });
            }
        }

        for state in self.reachable_in_order(&reachable) {
            if state.transitions.is_empty() && state.timeout.is_none() {
                issues.push(AnalysisIssue::DeadEnd { state: state.id });
            } else if state.timeout.is_none() {
                issues.push(AnalysisIssue::NoTimeout { state: state.id });
            }
            Self::check_shadowing(state, &mut issues);
        }

        let can_finish = self
            .reachable_in_order(&reachable)
            .any(|state| outcomes(state).any(|o| o == Outcome::Finished));
        if !can_finish {
            issues.push(AnalysisIssue::NeverFinishes);
        }

        let is_sound = !issues
            .iter()
            .any(|i| i.severity() == IssueSeverity::Error);

        AnalysisReport {
            is_sound,
            issues,
            reachable,
            can_finish,
        }
    }

    /// Breadth-first search over `GoTo` edges from the start state.
    fn reachable_states(&self) -> BTreeSet<StateId> {
        let mut reachable = BTreeSet::new();
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        queue.push_back(self.program.start());
        visited.insert(self.program.start());

        while let Some(current) = queue.pop_front() {
            reachable.insert(current);
            let Some(state) = self.program.state(current) else {
                continue;
            };
            for outcome in outcomes(state) {
                if let Outcome::GoTo(target) = outcome {
                    if visited.insert(target) {
                        queue.push_back(target);
                    }
                }
            }
        }

        reachable
    }

    fn reachable_in_order<'s>(
        &'s self,
        reachable: &'s BTreeSet<StateId>,
    ) -> impl Iterator<Item = &'a MissionState> + 's {
        self.program
            .states()
            .iter()
            .filter(move |s| reachable.contains(&s.id))
    }

    fn check_shadowing(state: &MissionState, issues: &mut Vec<AnalysisIssue>) {
        let Some(first_always) = state
            .transitions
            .iter()
            .position(|t| t.when == Condition::Always)
        else {
            return;
        };
        for index in first_always + 1..state.transitions.len() {
            issues.push(AnalysisIssue::ShadowedGuard {
                state: state.id,
                index,
            });
        }
    }
}

fn outcomes(state: &MissionState) -> impl Iterator<Item = Outcome> + '_ {
    state
        .transitions
        .iter()
        .map(|t| t.outcome)
        .chain(state.timeout.iter().map(|t| t.outcome))
}

/// Generate a state diagram in DOT format for visualization.
pub fn to_dot(program: &MissionProgram) -> String {
    let mut dot = String::new();
    let _ = writeln!(dot, "digraph \"{}\" {{", escape(program.name()));
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=ellipse];\n");
    dot.push_str("  __start [shape=point];\n");
    let _ = writeln!(dot, "  __start -> \"{}\";", program.start());
    dot.push_str("  __finished [shape=doublecircle, label=\"finished\"];\n");
    dot.push_str("  __lost [shape=doubleoctagon, label=\"lost\"];\n");

    for state in program.states() {
        let label = if state.description.is_empty() {
            state.id.to_string()
        } else {
            format!("{}\\n{}", state.id, escape(&state.description))
        };
        let _ = writeln!(dot, "  \"{}\" [label=\"{}\"];", state.id, label);
    }

    for state in program.states() {
        for (index, transition) in state.transitions.iter().enumerate() {
            let _ = writeln!(
                dot,
                "  \"{}\" -> {} [label=\"{}: {}\"];",
                state.id,
                node(transition.outcome),
                index,
                escape(&transition.when.to_string())
            );
        }
        if let Some(timeout) = &state.timeout {
            let _ = writeln!(
                dot,
                "  \"{}\" -> {} [label=\"timeout {}s\", style=dashed];",
                state.id,
                node(timeout.outcome),
                timeout.after_secs
            );
        }
    }

    dot.push_str("}\n");
    dot
}

fn node(outcome: Outcome) -> String {
    match outcome {
        Outcome::GoTo(id) => format!("\"{id}\""),
        Outcome::Finished => "__finished".to_string(),
        Outcome::Lost => "__lost".to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
