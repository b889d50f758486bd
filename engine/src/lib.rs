pub mod advance;
pub mod constants;
pub mod path;
pub mod utils;
pub mod waypoint;

pub use advance::{AdvanceParams, AdvanceResult, Phase, TraversalState, advance};
pub use constants::{DEFAULT_SPEED, DIST_EPS};
pub use path::WaypointPath;
pub use utils::direction_to;
pub use waypoint::{RotationTarget, Waypoint};
