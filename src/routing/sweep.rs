//! Parameter-sweep search driver.
//!
//! A route attempt is retried over a grid of (step size, tolerance digits,
//! heuristic weight) combinations, from coarse and fast toward fine and
//! thorough, until one search produces a path or the grid, deadline or
//! cancellation token ends the sweep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::Point3;

/// Default wall-clock budget for a whole sweep.
pub const DEFAULT_DEADLINE: Duration = Duration::from_millis(200_000);

/// Terminal state of a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The sweep has not finished.
    Running,
    /// A search produced a path.
    Found,
    /// The wall-clock budget ran out.
    TimedOut,
    /// The external token requested a stop.
    Cancelled,
    /// Every grid combination was tried without a path.
    Exhausted,
}

/// One configurable search attempt inside a sweep.
pub trait SweepSearch {
    /// Run a search with the given step size, coordinate-rounding digit
    /// count and heuristic weight percentage. An empty result means no
    /// path was found at these settings.
    fn search(&mut self, step: f64, tolerance_digits: u32, heuristic_weight: i32) -> Vec<Point3>;
}

/// Restartable cursor over one sweep axis.
///
/// Once exhausted the cursor stays clamped on its last value; only an
/// explicit [`reset`](SweepCursor::reset) rewinds it.
#[derive(Clone, Debug)]
pub struct SweepCursor<T: Copy> {
    values: Vec<T>,
    index: usize,
}

impl<T: Copy> SweepCursor<T> {
    /// Cursor over `values`, positioned on the first.
    ///
    /// # Panics
    /// Panics when `values` is empty.
    pub fn new(values: Vec<T>) -> Self {
        assert!(!values.is_empty(), "sweep axis needs at least one value");
        Self { values, index: 0 }
    }

    /// The value under the cursor (the last one when exhausted).
    pub fn current(&self) -> T {
        self.values[self.index.min(self.values.len() - 1)]
    }

    /// Move to the next value; false when already on the last.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.values.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Rewind to the first value.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// Drives a [`SweepSearch`] across the parameter grid.
pub struct PathFindEnumerator<S> {
    search: S,
    steps: SweepCursor<f64>,
    tolerances: SweepCursor<u32>,
    heuristics: SweepCursor<i32>,
    deadline: Duration,
    cancel: Option<Arc<AtomicBool>>,
    started: Option<Instant>,
    primed: bool,
    path: Vec<Point3>,
    status: SearchStatus,
}

impl<S: SweepSearch> PathFindEnumerator<S> {
    /// Sweep `search` over the given axes.
    pub fn new(
        search: S,
        steps: Vec<f64>,
        tolerances: Vec<u32>,
        heuristics: Vec<i32>,
    ) -> Self {
        Self {
            search,
            steps: SweepCursor::new(steps),
            tolerances: SweepCursor::new(tolerances),
            heuristics: SweepCursor::new(heuristics),
            deadline: DEFAULT_DEADLINE,
            cancel: None,
            started: None,
            primed: true,
            path: Vec::new(),
            status: SearchStatus::Running,
        }
    }

    /// Override the wall-clock budget.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Attach an external cancellation token, polled once per attempt.
    pub fn with_cancellation(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The path adopted by the sweep so far.
    pub fn path(&self) -> &[Point3] {
        &self.path
    }

    /// The sweep's current status.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Run one attempt; false when the sweep is over.
    pub fn move_next(&mut self) -> bool {
        if self.status != SearchStatus::Running {
            return false;
        }
        let started = *self.started.get_or_insert_with(Instant::now);

        if let Some(token) = &self.cancel {
            if token.load(Ordering::Relaxed) {
                tracing::debug!("route sweep cancelled");
                self.status = SearchStatus::Cancelled;
                return false;
            }
        }
        if started.elapsed() >= self.deadline {
            tracing::warn!(deadline_ms = self.deadline.as_millis() as u64, "route sweep timed out");
            self.status = SearchStatus::TimedOut;
            return false;
        }

        if self.primed {
            self.primed = false;
        } else if !self.advance_combination() {
            self.status = SearchStatus::Exhausted;
            return false;
        }

        let step = self.steps.current();
        let tolerance = self.tolerances.current();
        let heuristic = self.heuristics.current();

        let attempt_start = Instant::now();
        let path = self.search.search(step, tolerance, heuristic);
        tracing::debug!(
            step,
            tolerance,
            heuristic,
            elapsed_ms = attempt_start.elapsed().as_millis() as u64,
            found = !path.is_empty(),
            "sweep attempt"
        );

        if !path.is_empty() {
            tracing::info!(
                points = path.len(),
                step,
                tolerance,
                heuristic,
                total_ms = started.elapsed().as_millis() as u64,
                "path found"
            );
            self.path = path;
            self.status = SearchStatus::Found;
            return false;
        }
        true
    }

    /// Run attempts until the sweep ends, returning the adopted path.
    pub fn run(&mut self) -> (Vec<Point3>, SearchStatus) {
        while self.move_next() {}
        (std::mem::take(&mut self.path), self.status)
    }

    /// Next grid combination: heuristic first, then tolerance, then step.
    /// Only a step advance rewinds the inner axes; a tolerance advance
    /// leaves the heuristic cursor clamped where it ended.
    fn advance_combination(&mut self) -> bool {
        if self.heuristics.advance() {
            return true;
        }
        if self.tolerances.advance() {
            return true;
        }
        if self.steps.advance() {
            self.heuristics.reset();
            self.tolerances.reset();
            return true;
        }
        false
    }
}
