use std::time::Duration;

use crate::{error::ConfigError, Coordinate};

/// Cell edge length in pixels used when none is given.
pub const DEFAULT_CELL_SIZE: u32 = 40;
/// Delay between two revealed path cells.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(100);

/// Fixed layout of an editor session. Supplied once at construction; nothing in here changes
/// while the grid is being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Edge length of a cell in pixels. Only used for the pixel helpers; the core works in
    /// [Coordinate]s.
    pub cell_size: u32,
    pub reveal_interval: Duration,
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize) -> GridConfig {
        GridConfig {
            rows,
            cols,
            cell_size: DEFAULT_CELL_SIZE,
            reveal_interval: DEFAULT_REVEAL_INTERVAL,
        }
    }

    /// Fits as many whole cells as possible onto a canvas of the given pixel size. Partial cells
    /// at the right and bottom edge are dropped.
    pub fn from_canvas(width: u32, height: u32, cell_size: u32) -> Result<GridConfig, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let rows = (height / cell_size) as usize;
        let cols = (width / cell_size) as usize;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::CanvasTooSmall {
                width,
                height,
                cell_size,
            });
        }
        Ok(GridConfig::new(rows, cols).with_cell_size(cell_size))
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> GridConfig {
        self.cell_size = cell_size;
        self
    }

    pub fn with_reveal_interval(mut self, reveal_interval: Duration) -> GridConfig {
        self.reveal_interval = reveal_interval;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.cols == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.reveal_interval.is_zero() {
            return Err(ConfigError::ZeroRevealInterval);
        }
        Ok(())
    }

    /// Maps a pixel position to the cell under it, or [None] if the position is off the grid.
    pub fn cell_at(&self, x: u32, y: u32) -> Option<Coordinate> {
        if self.cell_size == 0 {
            return None;
        }
        let c = Coordinate::new((y / self.cell_size) as usize, (x / self.cell_size) as usize);
        (c.row < self.rows && c.col < self.cols).then_some(c)
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, c: Coordinate) -> (u32, u32) {
        (c.col as u32 * self.cell_size, c.row as u32 * self.cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_floors_partial_cells() {
        let config = GridConfig::from_canvas(420, 400, 40).unwrap();
        assert_eq!(config.rows, 10);
        assert_eq!(config.cols, 10);
        assert_eq!(config.reveal_interval, DEFAULT_REVEAL_INTERVAL);
    }

    #[test]
    fn canvas_too_small() {
        assert_eq!(
            GridConfig::from_canvas(30, 400, 40),
            Err(ConfigError::CanvasTooSmall {
                width: 30,
                height: 400,
                cell_size: 40
            })
        );
        assert_eq!(
            GridConfig::from_canvas(400, 400, 0),
            Err(ConfigError::ZeroCellSize)
        );
    }

    #[test]
    fn hit_testing() {
        let config = GridConfig::new(5, 8);
        assert_eq!(config.cell_at(0, 0), Some(Coordinate::new(0, 0)));
        assert_eq!(config.cell_at(85, 41), Some(Coordinate::new(1, 2)));
        assert_eq!(config.cell_at(320, 0), None);
        assert_eq!(config.cell_at(0, 200), None);
        assert_eq!(config.cell_origin(Coordinate::new(1, 2)), (80, 40));
    }

    #[test]
    fn validation() {
        assert!(GridConfig::new(3, 3).validate().is_ok());
        assert_eq!(GridConfig::new(0, 3).validate(), Err(ConfigError::NoRows));
        assert_eq!(GridConfig::new(3, 0).validate(), Err(ConfigError::NoColumns));
        assert_eq!(
            GridConfig::new(3, 3)
                .with_reveal_interval(Duration::ZERO)
                .validate(),
            Err(ConfigError::ZeroRevealInterval)
        );
    }
}
