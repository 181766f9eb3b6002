use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

/// A (row, column) grid address. Rows grow downwards and columns grow to the right, matching
/// the layout of the rendered grid. Equality, hashing and ordering all work on the value, so a
/// [Coordinate] can be used directly as a search key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }

    /// Packs the coordinate into the row-major index `row * cols + col`.
    pub fn index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Inverse of [index](Self::index).
    pub fn from_index(index: usize, cols: usize) -> Coordinate {
        Coordinate::new(index / cols, index % cols)
    }

    pub fn manhattan_distance(&self, other: &Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The orthogonal neighbours in the fixed order up, down, left, right. Neighbours that would
    /// have a negative component are skipped; the upper bounds are left to the caller.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coordinate; 4]> {
        let mut neighbours = SmallVec::new();
        if let Some(row) = self.row.checked_sub(1) {
            neighbours.push(Coordinate::new(row, self.col));
        }
        neighbours.push(Coordinate::new(self.row + 1, self.col));
        if let Some(col) = self.col.checked_sub(1) {
            neighbours.push(Coordinate::new(self.row, col));
        }
        neighbours.push(Coordinate::new(self.row, self.col + 1));
        neighbours
    }

    /// True if the two coordinates differ by exactly one orthogonal step.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The [Point] used to address [grid_util] grids, with x as the column and y as the row.
    pub(crate) fn to_point(self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
