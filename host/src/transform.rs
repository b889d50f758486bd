use nalgebra::{Point3, Vector3};

/// Host-owned world transform for one mover.
///
/// The traversal engine reads this each frame and the host writes the
/// advance result back. Anything else (physics, scripts) is free to perturb
/// it between frames; the engine tolerates that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoverTransform {
    pub translation: Point3<f32>,
    /// Orientation as euler degrees (pitch, yaw, roll).
    pub rotation: Vector3<f32>,
}

impl Default for MoverTransform {
    fn default() -> Self {
        Self {
            translation: Point3::origin(),
            rotation: Vector3::zeros(),
        }
    }
}
