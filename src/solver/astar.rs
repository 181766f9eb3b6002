use crate::{solver::GridSolver, Coordinate, C};

/// A* with the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic,
/// which is admissible and consistent on a 4-connected unit-cost grid, so returned paths are
/// shortest paths. A `heuristic_factor` above 1.0 turns this into weighted A*, which expands
/// fewer nodes but may return longer paths.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    pub fn with_heuristic_factor(heuristic_factor: f32) -> AstarSolver {
        AstarSolver { heuristic_factor }
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    /// The Manhattan distance times the heuristic factor.
    fn heuristic(&self, p1: &Coordinate, p2: &Coordinate) -> u32 {
        ((p1.manhattan_distance(p2) as u32 * C) as f32 * self.heuristic_factor) as u32
    }
}
