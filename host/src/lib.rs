pub mod debug_draw;
pub mod mover;
pub mod tick;
pub mod transform;

pub use debug_draw::{LogVisualizer, NullVisualizer, PathVisualizer, draw_path};
pub use mover::{Mover, MoverId, World};
pub use tick::tick;
pub use transform::MoverTransform;
