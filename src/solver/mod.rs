use core::fmt;
use itertools::Itertools;
use log::{info, warn};
use smallvec::SmallVec;

use crate::{
    astar_search::astar_search, grid_model::OccupancyGrid, Coordinate, C, N_SMALLVEC_SIZE,
};

pub mod astar;
pub mod dijkstra;

/// An ordered sequence of coordinates from start to goal, both inclusive. Consecutive
/// coordinates are orthogonal neighbours.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Coordinate>);

impl Path {
    pub fn new(coordinates: Vec<Coordinate>) -> Path {
        Path(coordinates)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Number of moves, one less than the number of coordinates.
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
    pub fn first(&self) -> Option<&Coordinate> {
        self.0.first()
    }
    pub fn last(&self) -> Option<&Coordinate> {
        self.0.last()
    }
    pub fn contains(&self, c: &Coordinate) -> bool {
        self.0.contains(c)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.0.iter()
    }
    pub fn as_slice(&self) -> &[Coordinate] {
        &self.0
    }
    pub fn into_inner(self) -> Vec<Coordinate> {
        self.0
    }
    /// True if every move is a single orthogonal step.
    pub fn is_contiguous(&self) -> bool {
        self.0.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" -> "))
    }
}

/// Outcome of a search. Not finding a path is an ordinary result, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    Found(Path),
    Unreachable,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchResult::Found(path) => Some(path),
            SearchResult::Unreachable => None,
        }
    }
    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchResult::Found(path) => Some(path),
            SearchResult::Unreachable => None,
        }
    }
}

impl From<Option<Path>> for SearchResult {
    fn from(path: Option<Path>) -> Self {
        path.map_or(SearchResult::Unreachable, SearchResult::Found)
    }
}

/// A best-first search over a 4-connected grid with unit move costs. Implementors choose the
/// heuristic; expansion, precondition checks and path reconstruction are shared.
pub trait GridSolver {
    /// Estimated remaining cost from `p1` to `p2`.
    fn heuristic(&self, p1: &Coordinate, p2: &Coordinate) -> u32;

    /// Cost of following `path`, which is its number of steps. Returns [None] if two
    /// consecutive coordinates are not orthogonal neighbours.
    fn path_cost(&self, path: &Path) -> Option<u32> {
        path.is_contiguous().then(|| path.steps() as u32)
    }

    /// Walkable orthogonal neighbours, each at cost [C].
    fn successors<G>(
        &self,
        grid: &G,
        node: &Coordinate,
    ) -> SmallVec<[(Coordinate, u32); N_SMALLVEC_SIZE]>
    where
        G: OccupancyGrid + ?Sized,
    {
        grid.walkable_neighbours(node)
            .into_iter()
            .map(|n| (n, C))
            .collect()
    }

    /// Computes a shortest path from start to goal. Fails with [SearchResult::Unreachable] if
    /// either endpoint is off the grid or blocked, if the grid knows the two to be disconnected,
    /// or if the frontier runs dry.
    fn find_path<G>(&self, grid: &G, start: Coordinate, goal: Coordinate) -> SearchResult
    where
        G: OccupancyGrid + ?Sized,
    {
        if !grid.is_walkable(&start) || !grid.is_walkable(&goal) {
            info!("{} or {} is not a free cell of the grid", start, goal);
            return SearchResult::Unreachable;
        }
        let hint = grid.reachable(&start, &goal);
        if hint == Some(false) {
            info!("{} is not reachable from {}", goal, start);
            return SearchResult::Unreachable;
        }
        let result = astar_search(
            &start,
            |node| self.successors(grid, node),
            |node| self.heuristic(node, &goal),
            |node| *node == goal,
        );
        match result {
            Some((path, cost)) => {
                info!("Found path from {} to {} with cost {}", start, goal, cost);
                SearchResult::Found(Path::new(path))
            }
            None => {
                if hint == Some(true) {
                    warn!("Reachable goal could not be pathed to, is reachable graph correct?");
                }
                info!("No path from {} to {}", start, goal);
                SearchResult::Unreachable
            }
        }
    }
}

/// Runs a default [AstarSolver](astar::AstarSolver) search.
pub fn find_path<G>(grid: &G, start: Coordinate, goal: Coordinate) -> SearchResult
where
    G: OccupancyGrid + ?Sized,
{
    astar::AstarSolver::new().find_path(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_accessors() {
        let path = Path::new(vec![
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            Coordinate::new(1, 1),
        ]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.steps(), 2);
        assert!(path.is_contiguous());
        assert_eq!(path.to_string(), "(0, 0) -> (0, 1) -> (1, 1)");
        let broken = Path::new(vec![Coordinate::new(0, 0), Coordinate::new(1, 1)]);
        assert!(!broken.is_contiguous());
        assert_eq!(astar::AstarSolver::new().path_cost(&broken), None);
        assert_eq!(astar::AstarSolver::new().path_cost(&path), Some(2));
    }

    #[test]
    fn search_result_conversions() {
        let found = SearchResult::from(Some(Path::new(vec![Coordinate::new(1, 1)])));
        assert!(found.is_found());
        assert_eq!(found.path().map(Path::len), Some(1));
        assert_eq!(SearchResult::from(None), SearchResult::Unreachable);
        assert_eq!(SearchResult::Unreachable.into_path(), None);
    }
}
