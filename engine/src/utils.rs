use nalgebra::{Point3, Vector3};

use crate::constants::DIST_EPS;

/// Unit direction from `from` toward `to`.
///
/// Returns the zero vector when the two positions are coincident (within
/// `DIST_EPS`) instead of dividing by a vanishing length.
pub fn direction_to(from: Point3<f32>, to: Point3<f32>) -> Vector3<f32> {
    let delta = to - from;
    let dist = delta.norm();
    if dist > DIST_EPS {
        delta / dist
    } else {
        Vector3::zeros()
    }
}
