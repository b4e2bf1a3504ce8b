//! Inspect and dot command handlers

use super::load_program;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::{DotArgs, InspectArgs, InspectFormat};
use robomission::{to_dot, Action, MissionProgram};
use std::fmt::Write as _;

/// One-line description of an action
#[must_use]
pub fn describe_action(action: &Action) -> String {
    match action {
        Action::Velocity { value } => format!("velocity {value} m/s"),
        Action::TurnRate { value } => format!("turn rate {value} rad/s"),
        Action::Heading { radians } => format!("heading {radians} rad"),
        Action::EdgeFollow { left, offset } => format!(
            "follow {} edge, offset {offset} m",
            if *left { "left" } else { "right" }
        ),
        Action::Servo {
            index,
            enabled,
            position,
            velocity,
        } => format!(
            "servo {index} {} position {position} velocity {velocity}",
            if *enabled { "on" } else { "off" }
        ),
        Action::ResetPose => "reset pose".to_string(),
        Action::ResetDistance => "reset distance".to_string(),
        Action::ResetTurned => "reset turned".to_string(),
    }
}

fn actions(list: &[Action]) -> String {
    list.iter()
        .map(describe_action)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a program as an indented listing
#[must_use]
pub fn render_text(program: &MissionProgram) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "mission {} (start {})", program.name(), program.start());
    if !program.description().is_empty() {
        let _ = writeln!(out, "  {}", program.description());
    }
    if !program.finish_actions().is_empty() {
        let _ = writeln!(out, "  on finish: {}", actions(program.finish_actions()));
    }

    for state in program.states() {
        let _ = write!(out, "\nstate {}", state.id);
        if !state.description.is_empty() {
            let _ = write!(out, ": {}", state.description);
        }
        out.push('\n');
        if !state.entry.is_empty() {
            let _ = writeln!(out, "  entry: {}", actions(&state.entry));
        }
        for (index, transition) in state.transitions.iter().enumerate() {
            let _ = write!(out, "  [{index}] {} => {}", transition.when, transition.outcome);
            if let Some(message) = &transition.message {
                let _ = write!(out, " \"{message}\"");
            }
            out.push('\n');
            if !transition.actions.is_empty() {
                let _ = writeln!(out, "      then: {}", actions(&transition.actions));
            }
        }
        if let Some(timeout) = &state.timeout {
            let _ = write!(out, "  after {}s => {}", timeout.after_secs, timeout.outcome);
            if let Some(message) = &timeout.message {
                let _ = write!(out, " \"{message}\"");
            }
            out.push('\n');
        }
    }
    out
}

/// Execute the inspect command
pub fn execute_inspect(args: &InspectArgs) -> CliResult<()> {
    let program = load_program(&args.file)?;
    match args.format {
        InspectFormat::Text => print!("{}", render_text(&program)),
        InspectFormat::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }
    Ok(())
}

/// Execute the dot command
pub fn execute_dot(config: &CliConfig, args: &DotArgs) -> CliResult<()> {
    let program = load_program(&args.file)?;
    let diagram = to_dot(&program);

    if let Some(output) = &args.output {
        std::fs::write(output, &diagram)?;
        Reporter::new(config.use_color(), config.verbosity.is_quiet())
            .success(&format!("Diagram exported to: {}", output.display()));
    } else {
        print!("{diagram}");
    }
    Ok(())
}
