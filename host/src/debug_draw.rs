use engine::WaypointPath;
use nalgebra::{Point3, Vector3};

/// Speed that maps to the hot end of the sphere color ramp (units/second).
const SPEED_COLOR_FULL_SCALE: f32 = 200.0;
/// Marker sphere radius at each waypoint (world units).
const WAYPOINT_SPHERE_RADIUS: f32 = 20.0;
/// Height above a waypoint at which its speed label is placed (world units).
const LABEL_HEIGHT_OFFSET: f32 = 30.0;

/// Rendering collaborator for the authored waypoint loop.
///
/// The traversal engine never depends on this; hosts opt in per mover and
/// supply whatever backend they have (editor gizmos, console, nothing).
pub trait PathVisualizer {
    fn line(&mut self, from: Point3<f32>, to: Point3<f32>);
    /// `speed_scalar` is the waypoint's speed mapped into `0..=1` for a
    /// red-to-green color ramp.
    fn sphere(&mut self, center: Point3<f32>, radius: f32, speed_scalar: f32);
    fn label(&mut self, at: Point3<f32>, text: &str);
}

/// Default collaborator: draws nothing.
pub struct NullVisualizer;

impl PathVisualizer for NullVisualizer {
    fn line(&mut self, _from: Point3<f32>, _to: Point3<f32>) {}
    fn sphere(&mut self, _center: Point3<f32>, _radius: f32, _speed_scalar: f32) {}
    fn label(&mut self, _at: Point3<f32>, _text: &str) {}
}

/// Renders path primitives through `log::trace!` for headless hosts.
pub struct LogVisualizer;

impl PathVisualizer for LogVisualizer {
    fn line(&mut self, from: Point3<f32>, to: Point3<f32>) {
        log::trace!("path line {from:?} -> {to:?}");
    }

    fn sphere(&mut self, center: Point3<f32>, radius: f32, speed_scalar: f32) {
        log::trace!("path waypoint {center:?} r={radius} speed_scalar={speed_scalar:.2}");
    }

    fn label(&mut self, at: Point3<f32>, text: &str) {
        log::trace!("path label {at:?}: {text}");
    }
}

/// Draw the whole loop: a line from the mover's current position through
/// every waypoint and back, a speed-colored sphere and a "`<speed>` u/s"
/// label at each waypoint.
pub fn draw_path(path: &WaypointPath, origin: Point3<f32>, viz: &mut dyn PathVisualizer) {
    if path.is_empty() {
        return;
    }

    let mut previous = origin;
    for wp in path.waypoints() {
        viz.line(previous, wp.location);

        let speed_scalar = (wp.speed / SPEED_COLOR_FULL_SCALE).clamp(0.0, 1.0);
        viz.sphere(wp.location, WAYPOINT_SPHERE_RADIUS, speed_scalar);
        viz.label(
            wp.location + Vector3::new(0.0, LABEL_HEIGHT_OFFSET, 0.0),
            &format!("{:.0} u/s", wp.speed),
        );

        previous = wp.location;
    }

    // Close the loop back to where the mover currently is.
    viz.line(previous, origin);
}
