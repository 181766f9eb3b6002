use core::fmt;
use log::debug;

use crate::{Coordinate, GridModel};

/// What a click on a cell does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Obstacle,
    Start,
    End,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Obstacle => f.write_str("obstacle"),
            Mode::Start => f.write_str("start"),
            Mode::End => f.write_str("end"),
        }
    }
}

/// A grid change caused by a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    ObstacleToggled { coordinate: Coordinate, blocked: bool },
    StartPlaced(Coordinate),
    EndPlaced(Coordinate),
}

/// Routes clicks to the [GridModel] according to the active [Mode]. Invalid clicks are absorbed:
/// they change nothing and surface nothing.
#[derive(Clone, Debug, Default)]
pub struct EditorModeController {
    mode: Mode,
}

impl EditorModeController {
    pub fn new() -> EditorModeController {
        EditorModeController::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Applies a click at `c` and returns the resulting change, or [None] if the click was
    /// absorbed.
    pub fn handle_click(&self, grid: &mut GridModel, c: Coordinate) -> Option<Edit> {
        let result = match self.mode {
            Mode::Obstacle => grid
                .toggle_obstacle(c)
                .map(|blocked| Edit::ObstacleToggled {
                    coordinate: c,
                    blocked,
                }),
            Mode::Start => grid.set_start(c).map(|_| Edit::StartPlaced(c)),
            Mode::End => grid.set_end(c).map(|_| Edit::EndPlaced(c)),
        };
        match result {
            Ok(edit) => Some(edit),
            Err(e) => {
                debug!("Ignoring {} click: {}", self.mode, e);
                None
            }
        }
    }
}
