use core::fmt;
use thiserror::Error;

use crate::Coordinate;

/// Which of the two search endpoints a cell holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Rejected grid edit. None of these are faults: the editor absorbs them and leaves the grid
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{coordinate} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        coordinate: Coordinate,
        rows: usize,
        cols: usize,
    },
    /// The cell holds the start or end point.
    #[error("{coordinate} is occupied by the {endpoint} point")]
    CellOccupied {
        coordinate: Coordinate,
        endpoint: Endpoint,
    },
    /// Start and end may not be placed on an obstacle.
    #[error("{0} is an obstacle")]
    Obstacle(Coordinate),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row")]
    NoRows,
    #[error("grid must have at least one column")]
    NoColumns,
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("reveal interval must be positive")]
    ZeroRevealInterval,
    #[error("a {width}x{height} px canvas cannot hold a single {cell_size} px cell")]
    CanvasTooSmall {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}
