/// Practical small distance for world-space comparisons (world units).
///
/// Two positions closer than this are treated as coincident: direction
/// normalization returns the zero vector instead of dividing by a vanishing
/// length. Favor a practical world-space tolerance over machine epsilon for
/// robust behavior.
pub const DIST_EPS: f32 = 1.0e-6;

/// Default travel speed in world units per second for waypoints that don't
/// override it (the plain-positions-plus-one-global-speed configuration).
pub const DEFAULT_SPEED: f32 = 100.0;
