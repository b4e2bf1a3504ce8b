//! Actuation facade: velocity, turn rate, heading, edge following and servos.

use serde::{Deserialize, Serialize};

/// Write-only motion interface. The engine assumes exclusive ownership for
/// the duration of one mission run.
pub trait ActuationFacade {
    fn set_velocity(&mut self, meters_per_second: f64);
    fn set_turn_rate(&mut self, radians_per_second: f64);
    fn set_desired_heading(&mut self, radians: f64);
    fn set_edge_follow_mode(&mut self, left_side: bool, offset_meters: f64);

    /// Servo command. Robots without servos ignore it.
    fn set_servo(&mut self, index: u8, enabled: bool, position: i32, velocity: i32) {
        tracing::debug!(index, enabled, position, velocity, "servo command ignored");
    }
}

impl<T: ActuationFacade + ?Sized> ActuationFacade for &mut T {
    fn set_velocity(&mut self, meters_per_second: f64) {
        (**self).set_velocity(meters_per_second);
    }

    fn set_turn_rate(&mut self, radians_per_second: f64) {
        (**self).set_turn_rate(radians_per_second);
    }

    fn set_desired_heading(&mut self, radians: f64) {
        (**self).set_desired_heading(radians);
    }

    fn set_edge_follow_mode(&mut self, left_side: bool, offset_meters: f64) {
        (**self).set_edge_follow_mode(left_side, offset_meters);
    }

    fn set_servo(&mut self, index: u8, enabled: bool, position: i32, velocity: i32) {
        (**self).set_servo(index, enabled, position, velocity);
    }
}

/// Edge-follow mode parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeFollow {
    pub left_side: bool,
    pub offset: f64,
}

/// Steering source currently selected in the mixer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Steering {
    /// Open-loop turn rate in rad/s
    #[default]
    TurnRate,
    /// Closed-loop on an absolute heading in radians
    Heading(f64),
    /// Closed-loop on a line edge
    Edge(EdgeFollow),
}

/// Last-command-wins actuation record.
///
/// Turn rate, heading and edge following are mutually exclusive steering
/// modes: selecting one replaces the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuationCommand {
    pub velocity: f64,
    pub turn_rate: f64,
    pub steering: Steering,
}

impl ActuationCommand {
    pub fn desired_heading(&self) -> Option<f64> {
        match self.steering {
            Steering::Heading(h) => Some(h),
            _ => None,
        }
    }

    pub fn edge_follow(&self) -> Option<EdgeFollow> {
        match self.steering {
            Steering::Edge(e) => Some(e),
            _ => None,
        }
    }

    /// True when the robot has been commanded to stand still.
    pub fn is_halted(&self) -> bool {
        self.velocity == 0.0 && self.turn_rate == 0.0 && self.steering == Steering::TurnRate
    }
}

impl ActuationFacade for ActuationCommand {
    fn set_velocity(&mut self, meters_per_second: f64) {
        self.velocity = meters_per_second;
    }

    fn set_turn_rate(&mut self, radians_per_second: f64) {
        self.turn_rate = radians_per_second;
        self.steering = Steering::TurnRate;
    }

    fn set_desired_heading(&mut self, radians: f64) {
        self.steering = Steering::Heading(radians);
    }

    fn set_edge_follow_mode(&mut self, left_side: bool, offset_meters: f64) {
        self.steering = Steering::Edge(EdgeFollow {
            left_side,
            offset: offset_meters,
        });
    }
}
