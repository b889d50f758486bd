use engine::{AdvanceParams, advance};

use crate::mover::World;

/// Drive every mover forward by one frame.
///
/// Exactly one `advance` per mover per call. `dt_seconds` is passed through
/// untouched so the engine's snap-on-arrival guarantee holds for any frame
/// size the scheduler produces.
pub fn tick(world: &mut World, dt_seconds: f32) {
    for mover in world.movers_mut() {
        let result = advance(
            &mover.path,
            &mut mover.state,
            AdvanceParams {
                current_translation: mover.transform.translation,
                current_rotation: mover.transform.rotation,
                dt_seconds,
            },
        );

        if result.moved {
            mover.transform.translation = result.new_translation;
            mover.transform.rotation = result.new_rotation;
        }

        if let Some(index) = result.arrived_at {
            log::debug!(
                "mover {} arrived at waypoint {} ({:.2}s into loop)",
                mover.id,
                index,
                mover.path.time_to_reach(index)
            );
        }
    }
}
