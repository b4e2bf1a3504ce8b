//! Sensor side of the robot: pose, ranging sensors and the line-edge detector.
//!
//! The engine reads one [`SensorSnapshot`] per tick through [`SensorFeed`].
//! [`SensorBundle`] assembles a feed from the three hardware collaborators.

use serde::{Deserialize, Serialize};

/// Line-edge detector reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeReading {
    /// Detected line width in meters
    pub width: f64,
    pub valid: bool,
    /// Right edge offset from the robot center line in meters
    pub right_edge_offset: f64,
}

/// Read-only sensor state for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Meters since the last distance reset (negative when reversing)
    pub distance_driven: f64,
    /// Signed radians since the last angle reset
    pub angle_turned: f64,
    /// Ranging sensor distances in meters; index 0 is the obstacle sensor
    pub ranges: Vec<f64>,
    pub edge: EdgeReading,
}

impl SensorSnapshot {
    /// Distance reported by a ranging sensor.
    ///
    /// A missing sensor reads as infinitely far away, so "obstacle close"
    /// guards never fire on it.
    pub fn range(&self, sensor: usize) -> f64 {
        self.ranges.get(sensor).copied().unwrap_or(f64::INFINITY)
    }
}

/// Which pose counters to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseReset {
    /// Distance, angle and heading
    All,
    Distance,
    Turned,
}

/// Per-tick sensor source used by the runner.
pub trait SensorFeed {
    /// Refresh and return the current readings. Must not block.
    fn snapshot(&mut self) -> SensorSnapshot;

    /// Zero pose counters. Takes effect from the next snapshot.
    fn reset_pose(&mut self, scope: PoseReset);
}

impl<T: SensorFeed + ?Sized> SensorFeed for &mut T {
    fn snapshot(&mut self) -> SensorSnapshot {
        (**self).snapshot()
    }

    fn reset_pose(&mut self, scope: PoseReset) {
        (**self).reset_pose(scope);
    }
}

/// Odometry collaborator.
pub trait Pose {
    fn reset_pose(&mut self);
    fn reset_distance(&mut self);
    fn reset_turned(&mut self);
    fn distance_driven(&self) -> f64;
    fn angle_turned(&self) -> f64;
}

/// Ranging sensor collaborator.
pub trait RangingSensors {
    fn distances(&self) -> Vec<f64>;
}

/// Line-edge sensor collaborator.
pub trait EdgeSensor {
    fn edge(&self) -> EdgeReading;
}

/// Adapter that builds snapshots from separate pose, ranging and edge
/// collaborators.
#[derive(Debug, Clone)]
pub struct SensorBundle<P, R, E> {
    pub pose: P,
    pub ranging: R,
    pub edge: E,
}

impl<P, R, E> SensorBundle<P, R, E> {
    pub fn new(pose: P, ranging: R, edge: E) -> Self {
        Self {
            pose,
            ranging,
            edge,
        }
    }
}

impl<P: Pose, R: RangingSensors, E: EdgeSensor> SensorFeed for SensorBundle<P, R, E> {
    fn snapshot(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            distance_driven: self.pose.distance_driven(),
            angle_turned: self.pose.angle_turned(),
            ranges: self.ranging.distances(),
            edge: self.edge.edge(),
        }
    }

    fn reset_pose(&mut self, scope: PoseReset) {
        match scope {
            PoseReset::All => self.pose.reset_pose(),
            PoseReset::Distance => self.pose.reset_distance(),
            PoseReset::Turned => self.pose.reset_turned(),
        }
    }
}
