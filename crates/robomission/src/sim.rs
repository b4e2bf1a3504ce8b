//! Simulated robot for dry runs and tests.
//!
//! Simple kinematics integrated against the injected clock: distance grows
//! with velocity, the angle with the turn rate, and a desired heading is
//! approached at a bounded turn rate. Ranging and edge readings are fixed
//! values that tests can change between runs.

use crate::actuation::{ActuationCommand, ActuationFacade, Steering};
use crate::clock::Clock;
use crate::sensors::{EdgeReading, PoseReset, SensorFeed, SensorSnapshot};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::time::Duration;

/// Simulator parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Fixed ranging readings in meters
    pub ranges: Vec<f64>,
    /// Fixed edge reading; `None` reads as no line
    pub edge: Option<EdgeReading>,
    /// Turn rate limit while tracking a heading (rad/s)
    pub max_turn_rate: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ranges: Vec::new(),
            edge: None,
            max_turn_rate: 1.0,
        }
    }
}

/// Robot model implementing both the sensor feed and the actuator.
#[derive(Debug, Clone)]
pub struct SimulatedRobot<C> {
    clock: C,
    config: SimConfig,
    command: ActuationCommand,
    distance: f64,
    turned: f64,
    heading: f64,
    last_update: Duration,
    servos: BTreeMap<u8, (bool, i32)>,
}

impl<C: Clock> SimulatedRobot<C> {
    pub fn new(clock: C, config: SimConfig) -> Self {
        let last_update = clock.now();
        Self {
            clock,
            config,
            command: ActuationCommand::default(),
            distance: 0.0,
            turned: 0.0,
            heading: 0.0,
            last_update,
            servos: BTreeMap::new(),
        }
    }

    pub fn command(&self) -> &ActuationCommand {
        &self.command
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn turned(&self) -> f64 {
        self.turned
    }

    /// Absolute heading in (-pi, pi]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Last commanded (enabled, position) of a servo.
    pub fn servo(&self, index: u8) -> Option<(bool, i32)> {
        self.servos.get(&index).copied()
    }

    pub fn set_ranges(&mut self, ranges: Vec<f64>) {
        self.config.ranges = ranges;
    }

    pub fn set_edge(&mut self, edge: Option<EdgeReading>) {
        self.config.edge = edge;
    }

    /// Advance the model to the clock's current time under the last command.
    fn integrate(&mut self) {
        let now = self.clock.now();
        let dt = now.saturating_sub(self.last_update).as_secs_f64();
        self.last_update = now;
        if dt == 0.0 {
            return;
        }

        self.distance += self.command.velocity * dt;
        let delta = match self.command.steering {
            Steering::TurnRate => self.command.turn_rate * dt,
            Steering::Heading(target) => {
                let limit = self.config.max_turn_rate.abs() * dt;
                normalize(target - self.heading).clamp(-limit, limit)
            }
            Steering::Edge(_) => 0.0,
        };
        self.turned += delta;
        self.heading = normalize(self.heading + delta);
    }
}

fn normalize(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

impl<C: Clock> SensorFeed for SimulatedRobot<C> {
    fn snapshot(&mut self) -> SensorSnapshot {
        self.integrate();
        SensorSnapshot {
            distance_driven: self.distance,
            angle_turned: self.turned,
            ranges: self.config.ranges.clone(),
            edge: self.config.edge.unwrap_or_default(),
        }
    }

    fn reset_pose(&mut self, scope: PoseReset) {
        self.integrate();
        match scope {
            PoseReset::All => {
                self.distance = 0.0;
                self.turned = 0.0;
                self.heading = 0.0;
            }
            PoseReset::Distance => self.distance = 0.0,
            PoseReset::Turned => self.turned = 0.0,
        }
    }
}

impl<C: Clock> ActuationFacade for SimulatedRobot<C> {
    fn set_velocity(&mut self, meters_per_second: f64) {
        self.integrate();
        self.command.set_velocity(meters_per_second);
    }

    fn set_turn_rate(&mut self, radians_per_second: f64) {
        self.integrate();
        self.command.set_turn_rate(radians_per_second);
    }

    fn set_desired_heading(&mut self, radians: f64) {
        self.integrate();
        self.command.set_desired_heading(radians);
    }

    fn set_edge_follow_mode(&mut self, left_side: bool, offset_meters: f64) {
        self.integrate();
        self.command.set_edge_follow_mode(left_side, offset_meters);
    }

    fn set_servo(&mut self, index: u8, enabled: bool, position: i32, _velocity: i32) {
        self.servos.insert(index, (enabled, position));
    }
}
