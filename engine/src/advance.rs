use nalgebra::{Point3, Vector3};

use crate::constants::DIST_EPS;
use crate::path::WaypointPath;
use crate::utils::direction_to;
use crate::waypoint::RotationTarget;

/// What the mover is doing between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Moving toward the waypoint at `target_index`.
    Traveling,
    /// Holding position at a waypoint; seconds left before travel resumes.
    Waiting { remaining: f32 },
}

/// Runtime traversal state, initialized once and mutated only by `advance()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraversalState {
    /// Index of the waypoint currently being approached, always in
    /// `[0, path.len())` while the table is non-empty.
    pub target_index: usize,
    pub phase: Phase,
}

impl TraversalState {
    pub fn new() -> Self {
        Self {
            target_index: 0,
            phase: Phase::Traveling,
        }
    }
}

impl Default for TraversalState {
    fn default() -> Self {
        Self::new()
    }
}

/// Input for one per-frame advance.
///
/// The engine never owns the transform: the host supplies the current pose
/// (which may have been perturbed externally since the last frame) and is
/// responsible for applying the result.
#[derive(Clone, Copy, Debug)]
pub struct AdvanceParams {
    /// Current world position of the mover.
    pub current_translation: Point3<f32>,
    /// Current orientation as euler degrees (pitch, yaw, roll).
    pub current_rotation: Vector3<f32>,
    /// Elapsed time since the previous frame, in seconds.
    pub dt_seconds: f32,
}

/// Result of one per-frame advance.
#[derive(Clone, Copy, Debug)]
pub struct AdvanceResult {
    /// Pose to apply for this frame. Equal to the input pose on frames with
    /// no movement (waiting, empty table, zero-speed segment).
    pub new_translation: Point3<f32>,
    pub new_rotation: Vector3<f32>,
    /// Did the pose change this frame? Hosts can skip the write-back when
    /// this is false.
    pub moved: bool,
    /// Index of the waypoint reached this frame, if any.
    pub arrived_at: Option<usize>,
}

impl AdvanceResult {
    fn hold(params: &AdvanceParams) -> Self {
        Self {
            new_translation: params.current_translation,
            new_rotation: params.current_rotation,
            moved: false,
            arrived_at: None,
        }
    }
}

/// Advance the traversal by one frame.
///
/// Converts elapsed time into a new pose: walks toward the target waypoint at
/// the governing speed, applies the segment's rotation, snaps exactly onto
/// the target when it is reachable within this frame (never overshooting,
/// however large `dt` is), wraps the target index around the cyclic table,
/// and starts the configured dwell on arrival.
///
/// The speed and precomputed rotation rate governing a segment are read from
/// the *source* waypoint, the one being left. A zero-speed segment holds the
/// mover in place.
#[inline]
pub fn advance(
    path: &WaypointPath,
    state: &mut TraversalState,
    params: AdvanceParams,
) -> AdvanceResult {
    let n = path.len();
    if n == 0 {
        return AdvanceResult::hold(&params);
    }

    let dt = params.dt_seconds.max(0.0);

    // The table may have shrunk since the last frame (edit + recompute).
    if state.target_index >= n {
        state.target_index %= n;
    }

    // 1) Dwell: burn the frame without moving. The frame that empties the
    //    countdown only transitions; travel resumes next frame.
    if let Phase::Waiting { remaining } = &mut state.phase {
        *remaining -= dt;
        if *remaining <= 0.0 {
            state.phase = Phase::Traveling;
        }
        return AdvanceResult::hold(&params);
    }

    let target = path.waypoints()[state.target_index];
    let source_index = (state.target_index + n - 1) % n;
    let speed = path.waypoints()[source_index].speed.max(0.0);

    let delta = target.location - params.current_translation;
    let dist = delta.norm();
    let step = speed * dt;

    // 2) Arrival: the target is reachable within this frame. Snap exactly,
    //    never past or short, then advance the index and arm the dwell.
    if dist <= step {
        let new_rotation = match target.rotation {
            RotationTarget::Absolute(rot) => rot,
            RotationTarget::DuringTransit(_) => {
                params.current_rotation + path.segment_rotation_rate(source_index) * dt
            }
            RotationTarget::None => params.current_rotation,
        };

        let reached = state.target_index;
        state.target_index = (reached + 1) % n;
        if target.wait_time > 0.0 {
            state.phase = Phase::Waiting {
                remaining: target.wait_time,
            };
        }

        return AdvanceResult {
            new_translation: target.location,
            new_rotation,
            moved: params.current_translation != target.location
                || params.current_rotation != new_rotation,
            arrived_at: Some(reached),
        };
    }

    // 3) Mid-segment: translate along the (safe-normalized) direction and
    //    apply this segment's rotation for the frame.
    let direction = direction_to(params.current_translation, target.location);
    let new_translation = params.current_translation + direction * step;

    let rotation_step = match target.rotation {
        RotationTarget::Absolute(rot) => {
            if speed > 0.0 && dist > DIST_EPS {
                // Scale so the rotation finishes together with the
                // translation: dist > step here, so the fraction is < 1.
                let remaining_time = dist / speed;
                (rot - params.current_rotation) * (dt / remaining_time)
            } else {
                Vector3::zeros()
            }
        }
        RotationTarget::DuringTransit(_) => path.segment_rotation_rate(source_index) * dt,
        RotationTarget::None => Vector3::zeros(),
    };
    let new_rotation = params.current_rotation + rotation_step;

    AdvanceResult {
        new_translation,
        new_rotation,
        moved: new_translation != params.current_translation
            || new_rotation != params.current_rotation,
        arrived_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_path(length: f32, speed: f32) -> WaypointPath {
        WaypointPath::from_locations(
            [Point3::new(0.0, 0.0, 0.0), Point3::new(length, 0.0, 0.0)],
            speed,
        )
    }

    fn params(translation: Point3<f32>, dt: f32) -> AdvanceParams {
        AdvanceParams {
            current_translation: translation,
            current_rotation: Vector3::zeros(),
            dt_seconds: dt,
        }
    }

    #[test]
    fn empty_table_is_a_noop() {
        let path = WaypointPath::new(Vec::new());
        let mut state = TraversalState::new();
        let start = Point3::new(1.0, 2.0, 3.0);

        let result = advance(&path, &mut state, params(start, 0.5));

        assert_eq!(result.new_translation, start);
        assert!(!result.moved);
        assert_eq!(result.arrived_at, None);
        assert_eq!(state, TraversalState::new());
    }

    #[test]
    fn mid_segment_step_is_speed_times_dt() {
        let path = line_path(100.0, 10.0);
        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        let result = advance(&path, &mut state, params(Point3::origin(), 0.5));

        assert!((result.new_translation - Point3::new(5.0, 0.0, 0.0)).norm() < 1.0e-5);
        assert!(result.moved);
        assert_eq!(result.arrived_at, None);
        assert_eq!(state.target_index, 1);
    }

    #[test]
    fn huge_dt_snaps_exactly_onto_the_target() {
        // No partial interpolation past the waypoint, regardless of frame size.
        let path = line_path(100.0, 10.0);
        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        let result = advance(&path, &mut state, params(Point3::origin(), 1.0e6));

        assert_eq!(result.new_translation, Point3::new(100.0, 0.0, 0.0));
        assert_eq!(result.arrived_at, Some(1));
        // Wrapped back to waypoint 0, not out of range.
        assert_eq!(state.target_index, 0);
    }

    #[test]
    fn index_wraps_from_last_waypoint_to_zero() {
        let path = WaypointPath::from_locations(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 10.0),
            ],
            10.0,
        );
        let mut state = TraversalState {
            target_index: 2,
            phase: Phase::Traveling,
        };

        let result = advance(&path, &mut state, params(Point3::new(10.0, 0.0, 9.0), 1.0));

        assert_eq!(result.arrived_at, Some(2));
        assert_eq!(state.target_index, 0);
    }

    #[test]
    fn dwell_holds_position_for_the_configured_seconds() {
        let mut path = line_path(100.0, 100.0);
        path.waypoints_mut()[1].wait_time = 2.0;
        path.recompute();

        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        // Arrive at waypoint 1: its dwell arms.
        let arrival = advance(&path, &mut state, params(Point3::new(99.0, 0.0, 0.0), 1.0));
        assert_eq!(arrival.arrived_at, Some(1));
        assert_eq!(state.phase, Phase::Waiting { remaining: 2.0 });

        // Four half-second frames burn exactly 2.0 seconds without movement.
        let at_waypoint = Point3::new(100.0, 0.0, 0.0);
        for _ in 0..4 {
            assert_eq!(state.target_index, 0);
            let held = advance(&path, &mut state, params(at_waypoint, 0.5));
            assert_eq!(held.new_translation, at_waypoint);
            assert!(!held.moved);
        }
        assert_eq!(state.phase, Phase::Traveling);

        // The next frame travels again, back toward waypoint 0.
        let resumed = advance(&path, &mut state, params(at_waypoint, 0.1));
        assert!(resumed.moved);
        assert!((resumed.new_translation - Point3::new(90.0, 0.0, 0.0)).norm() < 1.0e-4);
    }

    #[test]
    fn coincident_waypoints_arrive_immediately() {
        // Degenerate table: both waypoints on the same spot. Zero distance
        // means arrival on the very first frame, whatever dt is.
        let path = WaypointPath::from_locations(
            [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)],
            50.0,
        );
        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        let result = advance(&path, &mut state, params(Point3::origin(), 1.0e-4));

        assert_eq!(result.new_translation, Point3::origin());
        assert_eq!(result.arrived_at, Some(1));
        assert_eq!(state.target_index, 0);
    }

    #[test]
    fn zero_speed_segment_holds_the_mover() {
        let mut path = line_path(100.0, 10.0);
        path.waypoints_mut()[0].speed = 0.0;
        path.recompute();

        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        let result = advance(&path, &mut state, params(Point3::origin(), 5.0));

        assert_eq!(result.new_translation, Point3::origin());
        assert!(!result.moved);
        assert_eq!(result.arrived_at, None);
    }

    #[test]
    fn absolute_rotation_scales_with_remaining_travel_time() {
        let mut path = line_path(100.0, 100.0);
        path.waypoints_mut()[1].rotation =
            RotationTarget::Absolute(Vector3::new(0.0, 90.0, 0.0));
        path.recompute();

        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        // A quarter of the remaining second elapses, so a quarter of the
        // remaining rotation is applied.
        let result = advance(&path, &mut state, params(Point3::origin(), 0.25));
        assert!((result.new_rotation - Vector3::new(0.0, 22.5, 0.0)).norm() < 1.0e-4);

        // Arrival snaps the rotation exactly.
        let arrival = advance(
            &path,
            &mut state,
            AdvanceParams {
                current_translation: result.new_translation,
                current_rotation: result.new_rotation,
                dt_seconds: 10.0,
            },
        );
        assert_eq!(arrival.new_rotation, Vector3::new(0.0, 90.0, 0.0));
        assert_eq!(arrival.new_translation, Point3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn transit_rotation_accumulates_at_the_precomputed_rate() {
        let mut path = line_path(100.0, 100.0);
        path.waypoints_mut()[1].rotation =
            RotationTarget::DuringTransit(Vector3::new(0.0, 90.0, 0.0));
        path.recompute();

        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        // Segment 0 -> 1 takes one second, so the rate is 90 deg/s of yaw.
        let result = advance(&path, &mut state, params(Point3::origin(), 0.25));
        assert!((result.new_rotation - Vector3::new(0.0, 22.5, 0.0)).norm() < 1.0e-4);
    }

    #[test]
    fn perturbed_start_position_is_tolerated() {
        // The host may move the entity off the path between frames; the
        // engine just heads toward the target from wherever it is now.
        let path = line_path(100.0, 10.0);
        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        let off_path = Point3::new(100.0, 50.0, 0.0);
        let result = advance(&path, &mut state, params(off_path, 1.0));

        let expected = off_path + Vector3::new(0.0, -1.0, 0.0) * 10.0;
        assert!((result.new_translation - expected).norm() < 1.0e-4);
    }

    #[test]
    fn stale_target_index_rewraps_after_table_shrinks() {
        let mut path = WaypointPath::from_locations(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(20.0, 0.0, 0.0),
            ],
            10.0,
        );
        let mut state = TraversalState {
            target_index: 2,
            phase: Phase::Traveling,
        };

        path.waypoints_mut().truncate(2);
        path.recompute();

        let result = advance(&path, &mut state, params(Point3::new(5.0, 0.0, 0.0), 0.1));
        assert!(state.target_index < 2);
        assert!(result.moved);
    }

    #[test]
    fn negative_dt_is_treated_as_zero() {
        let path = line_path(100.0, 10.0);
        let mut state = TraversalState {
            target_index: 1,
            phase: Phase::Traveling,
        };

        let result = advance(&path, &mut state, params(Point3::origin(), -1.0));
        assert_eq!(result.new_translation, Point3::origin());
        assert!(!result.moved);
    }
}
