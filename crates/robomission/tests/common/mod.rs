//! Shared test robot with scripted sensor readings and a call log.

#![allow(dead_code)]

use robomission::{ActuationFacade, CancelSignal, PoseReset, SensorFeed, SensorSnapshot};

/// Everything the runner did to the robot, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Snapshot,
    Velocity(f64),
    TurnRate(f64),
    Heading(f64),
    EdgeFollow { left: bool, offset: f64 },
    Servo { index: u8, position: i32 },
    Reset(PoseReset),
}

impl Call {
    pub fn is_actuation(&self) -> bool {
        !matches!(self, Self::Snapshot | Self::Reset(_))
    }
}

/// Replays a fixed snapshot script, repeating the last entry once the script
/// runs out.
#[derive(Debug, Default)]
pub struct MockRobot {
    script: Vec<SensorSnapshot>,
    cursor: usize,
    pub calls: Vec<Call>,
    cancel_at: Option<(usize, CancelSignal)>,
}

impl MockRobot {
    pub fn new(script: Vec<SensorSnapshot>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Robot whose odometer reports the given distances, one per tick.
    pub fn with_distances(distances: &[f64]) -> Self {
        Self::new(
            distances
                .iter()
                .map(|&d| SensorSnapshot {
                    distance_driven: d,
                    ..SensorSnapshot::default()
                })
                .collect(),
        )
    }

    /// Set `signal` while taking snapshot number `n` (zero-based).
    pub fn cancel_on_snapshot(mut self, n: usize, signal: CancelSignal) -> Self {
        self.cancel_at = Some((n, signal));
        self
    }

    pub fn snapshots_taken(&self) -> usize {
        self.cursor
    }

    pub fn actuation_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|c| c.is_actuation())
            .cloned()
            .collect()
    }

    /// Calls made after the final snapshot.
    pub fn calls_after_last_snapshot(&self) -> &[Call] {
        let last = self
            .calls
            .iter()
            .rposition(|c| *c == Call::Snapshot)
            .map_or(0, |i| i + 1);
        &self.calls[last..]
    }

    /// Last two actuation calls.
    pub fn final_stop(&self) -> Vec<Call> {
        let actuation = self.actuation_calls();
        actuation[actuation.len().saturating_sub(2)..].to_vec()
    }
}

impl SensorFeed for MockRobot {
    fn snapshot(&mut self) -> SensorSnapshot {
        if let Some((n, signal)) = &self.cancel_at {
            if *n == self.cursor {
                signal.cancel();
            }
        }
        self.calls.push(Call::Snapshot);
        let snap = self
            .script
            .get(self.cursor)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_default();
        self.cursor += 1;
        snap
    }

    fn reset_pose(&mut self, scope: PoseReset) {
        self.calls.push(Call::Reset(scope));
    }
}

impl ActuationFacade for MockRobot {
    fn set_velocity(&mut self, meters_per_second: f64) {
        self.calls.push(Call::Velocity(meters_per_second));
    }

    fn set_turn_rate(&mut self, radians_per_second: f64) {
        self.calls.push(Call::TurnRate(radians_per_second));
    }

    fn set_desired_heading(&mut self, radians: f64) {
        self.calls.push(Call::Heading(radians));
    }

    fn set_edge_follow_mode(&mut self, left_side: bool, offset_meters: f64) {
        self.calls.push(Call::EdgeFollow {
            left: left_side,
            offset: offset_meters,
        });
    }

    fn set_servo(&mut self, index: u8, _enabled: bool, position: i32, _velocity: i32) {
        self.calls.push(Call::Servo { index, position });
    }
}
