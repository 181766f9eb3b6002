use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use itertools::Itertools;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::{EditError, Endpoint};
use crate::Coordinate;

/// Read-only view of grid occupancy: the only thing a search needs to know about the grid.
pub trait OccupancyGrid {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    /// Whether the cell blocks traversal. Cells outside the grid are not obstacles, they are
    /// simply not part of the grid.
    fn is_obstacle(&self, c: &Coordinate) -> bool;

    fn contains(&self, c: &Coordinate) -> bool {
        c.row < self.rows() && c.col < self.cols()
    }
    fn is_walkable(&self, c: &Coordinate) -> bool {
        self.contains(c) && !self.is_obstacle(c)
    }
    /// Walkable orthogonal neighbours, in the order up, down, left, right.
    fn walkable_neighbours(&self, c: &Coordinate) -> SmallVec<[Coordinate; 4]> {
        c.neumann_neighborhood()
            .into_iter()
            .filter(|n| self.is_walkable(n))
            .collect()
    }
    /// Cheap connectivity answer if the grid can give one. [None] means "unknown, search to find
    /// out".
    fn reachable(&self, _start: &Coordinate, _goal: &Coordinate) -> Option<bool> {
        None
    }
}

/// Per-cell flags. Whether a cell is the start or end is held by the grid, not the cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_obstacle: bool,
    pub is_path: bool,
}

/// What a rendering adapter should paint for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Obstacle,
    Path,
    Start,
    End,
}

impl CellKind {
    fn classify(
        c: Coordinate,
        cell: Cell,
        start: Option<Coordinate>,
        end: Option<Coordinate>,
    ) -> Self {
        if start == Some(c) {
            CellKind::Start
        } else if end == Some(c) {
            CellKind::End
        } else if cell.is_obstacle {
            CellKind::Obstacle
        } else if cell.is_path {
            CellKind::Path
        } else {
            CellKind::Empty
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Obstacle => '#',
            CellKind::Path => '*',
            CellKind::Start => 'S',
            CellKind::End => 'E',
        }
    }
}

/// [GridModel] owns the obstacle and path flags of an R×C grid together with the start and end
/// points. The obstacle layer is the single source of truth for occupancy. Connected components
/// of free cells are tracked in a [UnionFind] so that searches between disconnected cells can be
/// rejected without flood-filling.
#[derive(Clone, Debug)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    obstacles: BoolGrid,
    path: BoolGrid,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl GridModel {
    pub fn new(rows: usize, cols: usize) -> GridModel {
        let mut grid = GridModel {
            rows,
            cols,
            obstacles: BoolGrid::new(cols, rows, false),
            path: BoolGrid::new(cols, rows, false),
            start: None,
            end: None,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Every coordinate of the grid in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(Coordinate::from)
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }
    pub fn end(&self) -> Option<Coordinate> {
        self.end
    }
    /// Both endpoints, if both are set.
    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        self.start.zip(self.end)
    }

    pub fn cell(&self, c: Coordinate) -> Option<Cell> {
        self.contains(&c).then(|| Cell {
            is_obstacle: self.obstacles.get_point(c.to_point()),
            is_path: self.path.get_point(c.to_point()),
        })
    }

    pub fn kind(&self, c: Coordinate) -> Option<CellKind> {
        self.cell(c)
            .map(|cell| CellKind::classify(c, cell, self.start, self.end))
    }

    pub fn is_path(&self, c: Coordinate) -> bool {
        self.contains(&c) && self.path.get_point(c.to_point())
    }

    pub fn obstacle_count(&self) -> usize {
        self.coordinates().filter(|c| self.is_obstacle(c)).count()
    }

    pub fn path_len(&self) -> usize {
        self.coordinates().filter(|c| self.is_path(*c)).count()
    }

    fn check_bounds(&self, c: Coordinate) -> Result<(), EditError> {
        if self.contains(&c) {
            Ok(())
        } else {
            Err(EditError::OutOfBounds {
                coordinate: c,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn endpoint_at(&self, c: Coordinate) -> Option<Endpoint> {
        if self.start == Some(c) {
            Some(Endpoint::Start)
        } else if self.end == Some(c) {
            Some(Endpoint::End)
        } else {
            None
        }
    }

    /// Flips the obstacle flag of a cell and returns the new value. Fails without touching the
    /// grid if the cell holds the start or end point.
    pub fn toggle_obstacle(&mut self, c: Coordinate) -> Result<bool, EditError> {
        self.check_bounds(c)?;
        let blocked = !self.obstacles.get_point(c.to_point());
        self.set_obstacle(c, blocked)?;
        Ok(blocked)
    }

    /// Sets the obstacle flag of a cell. Newly freed cells are joined to the components of their
    /// neighbours; blocking a cell may split a component, so the components are flagged as dirty
    /// instead.
    pub fn set_obstacle(&mut self, c: Coordinate, blocked: bool) -> Result<(), EditError> {
        self.check_bounds(c)?;
        if let Some(endpoint) = self.endpoint_at(c) {
            return Err(EditError::CellOccupied {
                coordinate: c,
                endpoint,
            });
        }
        if self.obstacles.get_point(c.to_point()) == blocked {
            return Ok(());
        }
        self.obstacles.set_point(c.to_point(), blocked);
        if blocked {
            self.components_dirty = true;
        } else {
            let ix = c.index(self.cols);
            for n in self.walkable_neighbours(&c) {
                self.components.union(ix, n.index(self.cols));
            }
        }
        Ok(())
    }

    fn check_endpoint(
        &self,
        c: Coordinate,
        other: Option<Coordinate>,
        other_kind: Endpoint,
    ) -> Result<(), EditError> {
        self.check_bounds(c)?;
        if self.obstacles.get_point(c.to_point()) {
            return Err(EditError::Obstacle(c));
        }
        if other == Some(c) {
            return Err(EditError::CellOccupied {
                coordinate: c,
                endpoint: other_kind,
            });
        }
        Ok(())
    }

    /// Moves the start point to `c`. The previous start, if any, is forgotten.
    pub fn set_start(&mut self, c: Coordinate) -> Result<(), EditError> {
        self.check_endpoint(c, self.end, Endpoint::End)?;
        self.start = Some(c);
        Ok(())
    }

    /// Moves the end point to `c`. The previous end, if any, is forgotten.
    pub fn set_end(&mut self, c: Coordinate) -> Result<(), EditError> {
        self.check_endpoint(c, self.start, Endpoint::Start)?;
        self.end = Some(c);
        Ok(())
    }

    /// Flags a cell as part of the revealed path. Coordinates outside the grid are ignored.
    pub fn mark_path(&mut self, c: Coordinate) {
        if self.contains(&c) {
            self.path.set_point(c.to_point(), true);
        }
    }

    pub fn clear_path(&mut self) {
        self.path = BoolGrid::new(self.cols, self.rows, false);
    }

    /// Clears all obstacles, path flags and both endpoints. The grid keeps its size.
    pub fn reset(&mut self) {
        info!("Resetting {}x{} grid", self.rows, self.cols);
        self.obstacles = BoolGrid::new(self.cols, self.rows, false);
        self.clear_path();
        self.start = None;
        self.end = None;
        self.components_dirty = true;
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free orthogonal neighbours.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for c in self.coordinates() {
            if self.is_obstacle(&c) {
                continue;
            }
            let ix = c.index(self.cols);
            // Linking down and right is enough to cover every orthogonal pair once.
            for n in [Coordinate::new(c.row + 1, c.col), Coordinate::new(c.row, c.col + 1)] {
                if self.is_walkable(&n) {
                    self.components.union(ix, n.index(self.cols));
                }
            }
        }
    }

    /// Owned copy of the grid state, for renderers or for searching on a frozen revision.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .coordinates()
                .map(|c| Cell {
                    is_obstacle: self.obstacles.get_point(c.to_point()),
                    is_path: self.path.get_point(c.to_point()),
                })
                .collect(),
            start: self.start,
            end: self.end,
        }
    }
}

impl OccupancyGrid for GridModel {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
    fn is_obstacle(&self, c: &Coordinate) -> bool {
        self.contains(c) && self.obstacles.get_point(c.to_point())
    }
    /// Checks if start and goal are free cells on the same component. Unknown while the
    /// components are dirty.
    fn reachable(&self, start: &Coordinate, goal: &Coordinate) -> Option<bool> {
        if self.components_dirty {
            return None;
        }
        if !self.is_walkable(start) || !self.is_walkable(goal) {
            return Some(false);
        }
        Some(
            self.components
                .equiv(start.index(self.cols), goal.index(self.cols)),
        )
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line = (0..self.cols)
                .filter_map(|col| self.kind(Coordinate::new(row, col)))
                .map(|kind| kind.symbol())
                .join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Frozen copy of a [GridModel].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major cells.
    pub cells: Vec<Cell>,
    pub start: Option<Coordinate>,
    pub end: Option<Coordinate>,
}

impl GridSnapshot {
    pub fn cell(&self, c: Coordinate) -> Option<Cell> {
        if self.contains(&c) {
            self.cells.get(c.index(self.cols)).copied()
        } else {
            None
        }
    }

    pub fn kind(&self, c: Coordinate) -> Option<CellKind> {
        self.cell(c)
            .map(|cell| CellKind::classify(c, cell, self.start, self.end))
    }

    /// Every cell with its kind, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, CellKind)> + '_ {
        self.cells.iter().enumerate().map(move |(ix, cell)| {
            let c = Coordinate::from_index(ix, self.cols);
            (c, CellKind::classify(c, *cell, self.start, self.end))
        })
    }
}

impl OccupancyGrid for GridSnapshot {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
    fn is_obstacle(&self, c: &Coordinate) -> bool {
        self.cell(*c).is_some_and(|cell| cell.is_obstacle)
    }
}
