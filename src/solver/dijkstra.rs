use crate::{solver::GridSolver, Coordinate};

/// Uniform-cost search. Expands far more nodes than [AstarSolver](super::astar::AstarSolver) but
/// needs no heuristic, which makes it a convenient reference for path lengths.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Coordinate, _: &Coordinate) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridModel;

    #[test]
    fn matches_manhattan_on_open_grid() {
        let grid = GridModel::new(4, 6);
        let path = DijkstraSolver
            .find_path(&grid, Coordinate::new(3, 0), Coordinate::new(0, 5))
            .into_path()
            .unwrap();
        assert_eq!(path.len(), 3 + 5 + 1);
    }
}
