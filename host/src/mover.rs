use engine::{TraversalState, Waypoint, WaypointPath};

use crate::debug_draw::{NullVisualizer, PathVisualizer, draw_path};
use crate::transform::MoverTransform;

pub type MoverId = u64;

/// One path-following entity: its authored path, runtime traversal state,
/// and the host-owned transform the engine reads and writes through.
pub struct Mover {
    pub id: MoverId,
    pub path: WaypointPath,
    pub state: TraversalState,
    pub transform: MoverTransform,
    /// Redraw the waypoint loop through the visualizer on spawn and edits.
    pub show_path: bool,
}

/// Registry of movers plus the shared debug-draw collaborator.
pub struct World {
    movers: Vec<Mover>,
    next_id: MoverId,
    visualizer: Box<dyn PathVisualizer>,
}

impl World {
    pub fn new() -> Self {
        Self::with_visualizer(Box::new(NullVisualizer))
    }

    pub fn with_visualizer(visualizer: Box<dyn PathVisualizer>) -> Self {
        Self {
            movers: Vec::new(),
            next_id: 0,
            visualizer,
        }
    }

    /// Register a mover on the given path.
    ///
    /// Snaps it onto waypoint 0 with zero rotation when the path has one;
    /// an empty path leaves the mover at the default transform.
    pub fn spawn(&mut self, path: WaypointPath, show_path: bool) -> MoverId {
        let id = self.next_id;
        self.next_id += 1;

        let mut transform = MoverTransform::default();
        if let Some((translation, rotation)) = path.start_pose() {
            transform.translation = translation;
            transform.rotation = rotation;
        }

        log::debug!(
            "mover {} spawned, loop cycle time {:.2}s",
            id,
            path.total_cycle_time()
        );
        if show_path {
            draw_path(&path, transform.translation, self.visualizer.as_mut());
        }

        self.movers.push(Mover {
            id,
            path,
            state: TraversalState::new(),
            transform,
            show_path,
        });
        id
    }

    pub fn get(&self, id: MoverId) -> Option<&Mover> {
        self.movers.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: MoverId) -> Option<&mut Mover> {
        self.movers.iter_mut().find(|m| m.id == id)
    }

    pub fn movers_mut(&mut self) -> impl Iterator<Item = &mut Mover> {
        self.movers.iter_mut()
    }

    /// Apply an authoring-time edit to a mover's waypoint table, then rebuild
    /// the derived fields and redraw the path before ticking resumes.
    ///
    /// Returns false (and logs) when the id is unknown.
    pub fn edit_path(&mut self, id: MoverId, edit: impl FnOnce(&mut Vec<Waypoint>)) -> bool {
        let Some(mover) = self.movers.iter_mut().find(|m| m.id == id) else {
            log::error!("edit_path: no mover with id {id}");
            return false;
        };

        edit(mover.path.waypoints_mut());
        mover.path.recompute();

        log::debug!(
            "mover {} path edited, loop cycle time {:.2}s",
            id,
            mover.path.total_cycle_time()
        );
        if mover.show_path {
            draw_path(
                &mover.path,
                mover.transform.translation,
                self.visualizer.as_mut(),
            );
        }
        true
    }

    /// Total loop cycle time of a mover's path, for host-side scheduling.
    pub fn cycle_time(&self, id: MoverId) -> Option<f32> {
        self.get(id).map(|m| m.path.total_cycle_time())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
