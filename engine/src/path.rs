use nalgebra::{Point3, Vector3, distance};

use crate::waypoint::{RotationTarget, Waypoint};

/// Ordered, cyclic waypoint table plus the constants derived from it.
///
/// The derived fields are a cache over the table: segment travel times
/// accumulate into a per-waypoint time-to-reach, each segment gets a constant
/// rotation rate, and the final accumulation is the loop's total cycle time.
/// `recompute()` rebuilds all of it from scratch; constructors call it once,
/// and any authoring-time edit through `waypoints_mut()` must be followed by
/// another call before ticking resumes.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointPath {
    waypoints: Vec<Waypoint>,

    // Derived. Consistent with `waypoints` whenever ticking is allowed.
    time_to_reach: Vec<f32>,
    segment_rotation_rate: Vec<Vector3<f32>>,
    total_cycle_time: f32,
}

impl WaypointPath {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        let mut path = Self {
            waypoints,
            time_to_reach: Vec::new(),
            segment_rotation_rate: Vec::new(),
            total_cycle_time: 0.0,
        };
        path.recompute();
        path
    }

    /// Plain-positions configuration: every segment travels at one global
    /// speed, no rotation, no dwell.
    pub fn from_locations(locations: impl IntoIterator<Item = Point3<f32>>, speed: f32) -> Self {
        Self::new(
            locations
                .into_iter()
                .map(|location| Waypoint::at(location, speed))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Authoring-time access to the table. Derived fields are stale after any
    /// mutation until `recompute()` runs again.
    pub fn waypoints_mut(&mut self) -> &mut Vec<Waypoint> {
        &mut self.waypoints
    }

    /// Cumulative seconds from loop start to arrival at waypoint `index`,
    /// waits included.
    pub fn time_to_reach(&self, index: usize) -> f32 {
        self.time_to_reach.get(index).copied().unwrap_or(0.0)
    }

    /// Constant rotation rate (euler degrees per second) applied while
    /// traversing the segment that leaves waypoint `index`.
    pub fn segment_rotation_rate(&self, index: usize) -> Vector3<f32> {
        self.segment_rotation_rate
            .get(index)
            .copied()
            .unwrap_or_else(Vector3::zeros)
    }

    /// Total seconds for one full loop: every segment's travel time plus
    /// every configured wait.
    pub fn total_cycle_time(&self) -> f32 {
        self.total_cycle_time
    }

    /// Pose to snap a freshly spawned mover to: waypoint 0's location with
    /// zero rotation. `None` for an empty table, in which case the host
    /// leaves the mover wherever it already is.
    pub fn start_pose(&self) -> Option<(Point3<f32>, Vector3<f32>)> {
        self.waypoints
            .first()
            .map(|wp| (wp.location, Vector3::zeros()))
    }

    /// Rebuild every derived field from the current table.
    ///
    /// For each waypoint `i` with successor `j = (i + 1) % n`:
    /// - `segment_time = distance(i, j) / speed[i]` when `speed[i] > 0`,
    ///   otherwise zero (a zero-speed segment contributes no time and is
    ///   never a division);
    /// - the running total after the segment lands in `time_to_reach[j]`,
    ///   then `j`'s wait is added to the running total;
    /// - a `DuringTransit` delta on `j` divided by `segment_time` becomes
    ///   the constant rate stored at `i`, the waypoint being left.
    ///
    /// The loop closes (segment `n-1 -> 0` is included), so the final total
    /// is the full cycle time. Tables shorter than two waypoints have no
    /// segments and a zero cycle time.
    pub fn recompute(&mut self) {
        let n = self.waypoints.len();
        self.time_to_reach = vec![0.0; n];
        self.segment_rotation_rate = vec![Vector3::zeros(); n];
        self.total_cycle_time = 0.0;

        if n < 2 {
            return;
        }

        let mut cumulative = 0.0f32;
        for i in 0..n {
            let j = (i + 1) % n;
            let speed = self.waypoints[i].speed;

            let segment_time = if speed > 0.0 {
                distance(&self.waypoints[i].location, &self.waypoints[j].location) / speed
            } else {
                0.0
            };

            cumulative += segment_time;
            self.time_to_reach[j] = cumulative;

            if segment_time > 0.0 {
                if let RotationTarget::DuringTransit(delta) = self.waypoints[j].rotation {
                    self.segment_rotation_rate[i] = delta / segment_time;
                }
            }

            if self.waypoints[j].wait_time > 0.0 {
                cumulative += self.waypoints[j].wait_time;
            }
        }

        self.total_cycle_time = cumulative;
    }
}
