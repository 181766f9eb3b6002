//! # grid_path_editor
//!
//! The state core of an interactive shortest-path demo. A user places obstacles, a start and an
//! end on a grid; the core finds a shortest path with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over the 4-connected grid and reveals
//! it one cell at a time. Rendering and input are left to an adapter that forwards clicks as
//! [Coordinate]s, pumps elapsed time into [PathEditor::advance] and redraws on [GridEvent]s.
//!
//! Connected components of free cells are tracked alongside the grid so that a search between
//! disconnected cells fails without flood-filling.
//!
//! ```
//! use grid_path_editor::{Coordinate, GridConfig, Mode, PathEditor, RunOutcome};
//! use std::time::Duration;
//!
//! let mut editor = PathEditor::new(GridConfig::new(3, 3)).unwrap();
//! editor.on_cell_clicked(Coordinate::new(1, 1));
//! editor.set_mode(Mode::Start);
//! editor.on_cell_clicked(Coordinate::new(0, 0));
//! editor.set_mode(Mode::End);
//! editor.on_cell_clicked(Coordinate::new(2, 2));
//! let RunOutcome::Started { steps, .. } = editor.run_search() else {
//!     panic!("no path");
//! };
//! assert_eq!(steps, 4);
//! editor.advance(Duration::from_secs(1));
//! assert_eq!(editor.grid().path_len(), 5);
//! ```
pub mod animator;
pub mod astar_search;
pub mod config;
pub mod coordinate;
pub mod editor;
pub mod error;
pub mod grid_model;
pub mod path_editor;
pub mod solver;

pub use animator::{IntervalTimer, PathAnimator, RevealHandle, RevealStep};
pub use config::{GridConfig, DEFAULT_CELL_SIZE, DEFAULT_REVEAL_INTERVAL};
pub use coordinate::Coordinate;
pub use editor::{Edit, EditorModeController, Mode};
pub use error::{ConfigError, EditError, Endpoint};
pub use grid_model::{Cell, CellKind, GridModel, GridSnapshot, OccupancyGrid};
pub use path_editor::{GridEvent, Notice, PathEditor, RunOutcome, SubscriptionId};
pub use solver::{
    astar::AstarSolver, dijkstra::DijkstraSolver, find_path, GridSolver, Path, SearchResult,
};

/// Cost of a single orthogonal move.
pub const C: u32 = 1;
/// Inline capacity for successor lists: a cell has at most four orthogonal neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;
