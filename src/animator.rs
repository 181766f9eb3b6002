use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::{solver::Path, Coordinate, GridModel};

/// Cancellation token for a running reveal. Clones share the same flag, so the caller can keep
/// one while the animator holds another.
#[derive(Clone, Debug, Default)]
pub struct RevealHandle {
    cancelled: Arc<AtomicBool>,
}

impl RevealHandle {
    pub fn new() -> RevealHandle {
        RevealHandle::default()
    }

    /// Requests cancellation. Calling this more than once, or after the reveal finished, has no
    /// further effect.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A repeating timer on a logical clock. The host feeds it elapsed time and it reports how many
/// periods have passed, carrying the remainder over to the next call.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    period: Duration,
    elapsed: Duration,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> IntervalTimer {
        IntervalTimer {
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next fire.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }

    /// Advances the clock by `dt` and returns the number of fires that became due. A zero period
    /// fires once per call.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 1;
        }
        let elapsed = (self.elapsed + dt).as_nanos();
        let period = self.period.as_nanos();
        self.elapsed = Duration::from_nanos((elapsed % period) as u64);
        u32::try_from(elapsed / period).unwrap_or(u32::MAX)
    }
}

/// What a single timer fire did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStep {
    Revealed(Coordinate),
    /// The last coordinate of the path was revealed and the timer has been released.
    Finished(Coordinate),
    /// Nothing left to do: the reveal finished or was cancelled.
    Idle,
}

/// Reveals a path one coordinate per timer fire by setting the path flag in a [GridModel].
/// Created per run; once it finishes or is cancelled it stays idle and owns no timer.
#[derive(Debug)]
pub struct PathAnimator {
    path: Vec<Coordinate>,
    cursor: usize,
    timer: Option<IntervalTimer>,
    handle: RevealHandle,
}

impl PathAnimator {
    /// Starts revealing `path` with one coordinate every `interval`. An empty path yields an
    /// animator that is idle from the start.
    pub fn start(path: Path, interval: Duration) -> (PathAnimator, RevealHandle) {
        let handle = RevealHandle::new();
        let path = path.into_inner();
        let timer = if path.is_empty() {
            None
        } else {
            info!(
                "Revealing {} cells every {} ms",
                path.len(),
                interval.as_millis()
            );
            Some(IntervalTimer::new(interval))
        };
        let animator = PathAnimator {
            path,
            cursor: 0,
            timer,
            handle: handle.clone(),
        };
        (animator, handle)
    }

    pub fn handle(&self) -> RevealHandle {
        self.handle.clone()
    }

    pub fn is_idle(&self) -> bool {
        self.timer.is_none() || self.handle.is_cancelled()
    }

    /// Coordinates revealed so far, in path order.
    pub fn revealed(&self) -> &[Coordinate] {
        &self.path[..self.cursor]
    }

    pub fn remaining(&self) -> usize {
        if self.is_idle() {
            0
        } else {
            self.path.len() - self.cursor
        }
    }

    /// Time until the next fire, or [None] when idle.
    pub fn until_next(&self) -> Option<Duration> {
        if self.handle.is_cancelled() {
            return None;
        }
        self.timer.as_ref().map(IntervalTimer::until_next)
    }

    /// Stops the reveal and releases the timer. Safe to call on an idle animator.
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            debug!(
                "Reveal cancelled after {} of {} cells",
                self.cursor,
                self.path.len()
            );
        }
        self.handle.cancel();
    }

    /// Handles one timer fire: marks the next coordinate and advances the cursor.
    pub fn fire(&mut self, grid: &mut GridModel) -> RevealStep {
        if self.handle.is_cancelled() {
            self.timer = None;
        }
        if self.timer.is_none() {
            return RevealStep::Idle;
        }
        let Some(&c) = self.path.get(self.cursor) else {
            self.timer = None;
            return RevealStep::Idle;
        };
        grid.mark_path(c);
        self.cursor += 1;
        if self.cursor == self.path.len() {
            self.timer = None;
            info!("Revealed all {} cells", self.path.len());
            RevealStep::Finished(c)
        } else {
            RevealStep::Revealed(c)
        }
    }

    /// Feeds `dt` of elapsed time to the timer and handles every fire that became due, calling
    /// `on_step` after each reveal. Returns the number of coordinates revealed.
    pub fn advance<F>(&mut self, dt: Duration, grid: &mut GridModel, mut on_step: F) -> usize
    where
        F: FnMut(RevealStep),
    {
        let fires = match self.timer.as_mut() {
            Some(timer) if !self.handle.is_cancelled() => timer.advance(dt),
            _ => return 0,
        };
        let mut revealed = 0;
        for _ in 0..fires {
            let step = self.fire(grid);
            if step == RevealStep::Idle {
                break;
            }
            revealed += 1;
            on_step(step);
        }
        revealed
    }
}
