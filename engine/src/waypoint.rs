use nalgebra::{Point3, Vector3};

use crate::constants::DEFAULT_SPEED;

/// Orientation constraint attached to a waypoint.
///
/// Two incompatible rotation models exist in the wild, so the choice is a
/// tagged variant selected per waypoint at configuration time rather than a
/// hard-coded engine mode.
///
/// Angles are euler degrees stored as `(x = pitch, y = yaw, z = roll)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationTarget {
    /// Position-only waypoint; the mover keeps whatever orientation it has.
    None,
    /// Absolute orientation reached exactly on arrival. In transit the mover
    /// interpolates toward it, scaled so the rotation completes together
    /// with the remaining translation.
    Absolute(Vector3<f32>),
    /// Relative rotation delta accumulated over the segment that *ends* at
    /// this waypoint, applied at the precomputed constant per-segment rate.
    DuringTransit(Vector3<f32>),
}

/// One entry in the cyclic waypoint table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// Target position in world space.
    pub location: Point3<f32>,
    pub rotation: RotationTarget,
    /// Travel speed (world units per second) governing the segment that
    /// *leaves* this waypoint, toward its successor.
    pub speed: f32,
    /// Seconds to hold position after arriving here before moving on.
    /// Zero means no dwell.
    pub wait_time: f32,
}

impl Waypoint {
    /// Position-only waypoint with an explicit speed, no rotation, no dwell.
    pub fn at(location: Point3<f32>, speed: f32) -> Self {
        Self {
            location,
            rotation: RotationTarget::None,
            speed,
            wait_time: 0.0,
        }
    }

    pub fn with_wait(mut self, wait_time: f32) -> Self {
        self.wait_time = wait_time;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationTarget) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Default for Waypoint {
    fn default() -> Self {
        Self::at(Point3::origin(), DEFAULT_SPEED)
    }
}
