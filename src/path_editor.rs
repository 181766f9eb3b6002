use core::fmt;
use std::time::Duration;

use log::info;

use crate::animator::{PathAnimator, RevealHandle, RevealStep};
use crate::config::GridConfig;
use crate::editor::{Edit, EditorModeController, Mode};
use crate::error::ConfigError;
use crate::grid_model::{GridModel, GridSnapshot};
use crate::solver::{astar::AstarSolver, GridSolver, SearchResult};
use crate::Coordinate;

/// Informational message for the user. Neither is an error state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Notice {
    NoPathFound,
    EndpointsRequired,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notice::NoPathFound => f.write_str("No path found."),
            Notice::EndpointsRequired => f.write_str("Set both a start and an end point first."),
        }
    }
}

/// Sent to subscribers after every state change so they can redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridEvent {
    ObstacleToggled { coordinate: Coordinate, blocked: bool },
    StartPlaced(Coordinate),
    EndPlaced(Coordinate),
    /// Path flags of an earlier run were cleared.
    PathCleared,
    PathRevealed(Coordinate),
    RevealFinished,
    GridReset,
    Notice(Notice),
}

impl From<Edit> for GridEvent {
    fn from(edit: Edit) -> Self {
        match edit {
            Edit::ObstacleToggled {
                coordinate,
                blocked,
            } => GridEvent::ObstacleToggled {
                coordinate,
                blocked,
            },
            Edit::StartPlaced(c) => GridEvent::StartPlaced(c),
            Edit::EndPlaced(c) => GridEvent::EndPlaced(c),
        }
    }
}

#[derive(Clone, Debug)]
pub enum RunOutcome {
    /// A path was found and its reveal has started. `handle` cancels the reveal.
    Started { steps: usize, handle: RevealHandle },
    NoPathFound,
    MissingEndpoints,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GridEvent)>;

fn dispatch(listeners: &mut [(SubscriptionId, Listener)], event: &GridEvent) {
    for (_, listener) in listeners.iter_mut() {
        listener(event);
    }
}

/// The editing session an input and rendering adapter talk to. Owns the grid, the mode
/// controller and at most one running reveal. Everything runs on the caller's thread: each
/// method runs to completion, and time only passes when the host calls
/// [advance](Self::advance).
pub struct PathEditor {
    config: GridConfig,
    grid: GridModel,
    editor: EditorModeController,
    solver: AstarSolver,
    animator: Option<PathAnimator>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl PathEditor {
    pub fn new(config: GridConfig) -> Result<PathEditor, ConfigError> {
        config.validate()?;
        info!("Creating {}x{} editor", config.rows, config.cols);
        Ok(PathEditor {
            grid: GridModel::new(config.rows, config.cols),
            config,
            editor: EditorModeController::new(),
            solver: AstarSolver::new(),
            animator: None,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    pub fn mode(&self) -> Mode {
        self.editor.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.editor.set_mode(mode);
    }

    /// Registers a callback that is invoked after every state change.
    pub fn subscribe<F>(&mut self, on_change: F) -> SubscriptionId
    where
        F: FnMut(&GridEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(on_change)));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: GridEvent) {
        dispatch(&mut self.listeners, &event);
    }

    /// Applies a click according to the current mode. Invalid clicks change nothing and notify
    /// nobody.
    pub fn on_cell_clicked(&mut self, c: Coordinate) -> Option<Edit> {
        let edit = self.editor.handle_click(&mut self.grid, c)?;
        self.notify(edit.into());
        Some(edit)
    }

    /// Searches between the current start and end and starts revealing the result. Any reveal
    /// still running is cancelled first, and path flags left by an earlier run are cleared.
    pub fn run_search(&mut self) -> RunOutcome {
        let Some((start, end)) = self.grid.endpoints() else {
            self.notify(GridEvent::Notice(Notice::EndpointsRequired));
            return RunOutcome::MissingEndpoints;
        };
        self.cancel_reveal();
        if self.grid.path_len() > 0 {
            self.grid.clear_path();
            self.notify(GridEvent::PathCleared);
        }
        self.grid.update();
        info!("Searching for a path from {} to {}", start, end);
        match self.solver.find_path(&self.grid, start, end) {
            SearchResult::Found(path) => {
                let steps = path.steps();
                let (animator, handle) = PathAnimator::start(path, self.config.reveal_interval);
                self.animator = Some(animator);
                RunOutcome::Started { steps, handle }
            }
            SearchResult::Unreachable => {
                self.notify(GridEvent::Notice(Notice::NoPathFound));
                RunOutcome::NoPathFound
            }
        }
    }

    /// Feeds elapsed time to the running reveal, if any. Returns the number of coordinates
    /// revealed.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let Some(animator) = self.animator.as_mut() else {
            return 0;
        };
        let listeners = &mut self.listeners;
        let revealed = animator.advance(dt, &mut self.grid, |step| match step {
            RevealStep::Revealed(c) => {
                dispatch(listeners.as_mut_slice(), &GridEvent::PathRevealed(c));
            }
            RevealStep::Finished(c) => {
                dispatch(listeners.as_mut_slice(), &GridEvent::PathRevealed(c));
                dispatch(listeners.as_mut_slice(), &GridEvent::RevealFinished);
            }
            RevealStep::Idle => {}
        });
        if animator.is_idle() {
            self.animator = None;
        }
        revealed
    }

    /// Time until the running reveal fires next.
    pub fn until_next_reveal(&self) -> Option<Duration> {
        self.animator.as_ref().and_then(PathAnimator::until_next)
    }

    pub fn is_revealing(&self) -> bool {
        self.animator
            .as_ref()
            .is_some_and(|animator| !animator.is_idle())
    }

    /// Stops the running reveal. Returns false if there was none.
    pub fn cancel_reveal(&mut self) -> bool {
        match self.animator.take() {
            Some(mut animator) => {
                let active = !animator.is_idle();
                animator.cancel();
                active
            }
            None => false,
        }
    }

    /// Cancels any reveal and clears the grid.
    pub fn reset(&mut self) {
        self.cancel_reveal();
        self.grid.reset();
        self.notify(GridEvent::GridReset);
    }
}

impl fmt::Debug for PathEditor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PathEditor")
            .field("config", &self.config)
            .field("grid", &self.grid)
            .field("mode", &self.editor.mode())
            .field("animator", &self.animator)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
