//! Incremental A* search.
//!
//! [AstarSearch] performs one node expansion per call to [Iterator::next] and reports what it
//! did as a [SearchStep]. Hosts that only care about the result can use
//! [drive](AstarSearch::drive), which forwards every step to a [SearchObserver].
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::{manhattan_distance, N_NEIGHBOURS, STEP_COST};
use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{info, trace};
use smallvec::SmallVec;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Shared flag that stops a running search at its next step. Clones refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a single step of the search did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStep {
    /// `visited` moved from the open to the closed set; `discovered` lists the cells that entered
    /// the open set for the first time, in neighbour order.
    Expanded {
        visited: Point,
        discovered: SmallVec<[Point; N_NEIGHBOURS]>,
    },
    /// The end was selected for expansion. Holds the path from start to end, both included.
    Found(Vec<Point>),
    /// The open set ran empty before the end was reached.
    NoPath,
    /// The cancel token was raised before this step could run.
    Cancelled,
}

impl SearchStep {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchStep::Expanded { .. })
    }

    /// Forwards the step to `observer` and returns the outcome if the step ends the search.
    pub fn notify<O: SearchObserver + ?Sized>(self, observer: &mut O) -> Option<SearchOutcome> {
        match self {
            SearchStep::Expanded {
                visited,
                discovered,
            } => {
                observer.on_visited(visited);
                for cell in discovered {
                    observer.on_discovered(cell);
                }
                None
            }
            SearchStep::Found(path) => {
                observer.on_path_found(&path);
                Some(SearchOutcome::Found(path))
            }
            SearchStep::NoPath => {
                observer.on_no_path_found();
                Some(SearchOutcome::NoPathFound)
            }
            SearchStep::Cancelled => {
                observer.on_cancelled();
                Some(SearchOutcome::Cancelled)
            }
        }
    }
}

/// Final result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<Point>),
    NoPathFound,
    Cancelled,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Receives the progress of a search, typically to render it. Every method defaults to doing
/// nothing.
pub trait SearchObserver {
    fn on_visited(&mut self, _cell: Point) {}
    fn on_discovered(&mut self, _cell: Point) {}
    fn on_path_found(&mut self, _path: &[Point]) {}
    fn on_no_path_found(&mut self) {}
    fn on_cancelled(&mut self) {}
}

impl SearchObserver for () {}

/// A single A* run from `start` to `end`. Holds the grid exclusively until it is dropped, so
/// walls cannot change and no second search can start while it is alive.
///
/// The open set keeps insertion order and the cell with the lowest `f` is selected by a linear
/// scan that keeps the first minimum, which makes the expansion order fully deterministic.
#[derive(Debug)]
pub struct AstarSearch<'g> {
    grid: &'g mut Grid,
    start: Point,
    end: Point,
    open_set: FxIndexSet<Point>,
    closed_set: FxHashSet<Point>,
    cancel: Option<CancelToken>,
    outcome: Option<SearchOutcome>,
}

impl<'g> AstarSearch<'g> {
    /// Prepares a search. Fails if either endpoint is off the grid or a wall, or if the grid
    /// still holds scratch values of an earlier search.
    pub fn new(grid: &'g mut Grid, start: Point, end: Point) -> Result<AstarSearch<'g>> {
        for point in [start, end] {
            grid.checked_ix(&point)?;
            if grid.is_wall(&point) {
                return Err(Error::WalledEndpoint { point });
            }
        }
        if grid.has_stale_scratch() {
            return Err(Error::StaleSearchState);
        }
        let mut open_set = FxIndexSet::default();
        open_set.insert(start);
        Ok(AstarSearch {
            grid,
            start,
            end,
            open_set,
            closed_set: FxHashSet::default(),
            cancel: None,
            outcome: None,
        })
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> AstarSearch<'g> {
        self.cancel = Some(token);
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }
    /// Cells waiting to be expanded, in the order they were discovered.
    pub fn open_set(&self) -> impl ExactSizeIterator<Item = &Point> + '_ {
        self.open_set.iter()
    }
    pub fn closed_set(&self) -> &FxHashSet<Point> {
        &self.closed_set
    }
    /// The outcome, once a terminal step has been produced.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Runs the search to completion, forwarding every step to `observer`. On an already
    /// finished search this returns the recorded outcome without notifying anyone.
    pub fn drive<O: SearchObserver + ?Sized>(&mut self, observer: &mut O) -> SearchOutcome {
        self.pace(observer, Duration::ZERO)
    }

    /// Like [drive](Self::drive), but sleeps for `delay` after every expansion so that a
    /// renderer can show it.
    pub fn pace<O: SearchObserver + ?Sized>(
        &mut self,
        observer: &mut O,
        delay: Duration,
    ) -> SearchOutcome {
        while let Some(step) = self.next() {
            if let Some(outcome) = step.notify(observer) {
                return outcome;
            }
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
        // The iterator only stops after recording an outcome.
        self.outcome.clone().unwrap_or(SearchOutcome::Cancelled)
    }

    /// Position in the open set of the first cell with the strictly lowest `f`.
    fn select_current(&self) -> Option<(usize, Point)> {
        self.open_set
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| self.f_of(p))
            .map(|(ix, p)| (ix, *p))
    }

    fn f_of(&self, point: &Point) -> i32 {
        self.grid.cell(point).map_or(i32::MAX, |cell| cell.f)
    }

    fn reconstruct_path(&self, end: Point) -> Vec<Point> {
        let mut path: Vec<Point> =
            std::iter::successors(Some(end), |p| self.grid.cell(p).and_then(|c| c.parent))
                .collect();
        path.reverse();
        path
    }

    fn expand(&mut self, ix: usize, current: Point) -> SearchStep {
        self.open_set.shift_remove_index(ix);
        self.closed_set.insert(current);
        let current_g = self.grid.cell(&current).map_or(0, |cell| cell.g);
        let mut discovered = SmallVec::new();
        for neighbour in self.grid.neighbors_of(&current) {
            if self.closed_set.contains(&neighbour) || self.grid.is_wall(&neighbour) {
                continue;
            }
            let tentative_g = current_g + STEP_COST;
            let in_open = self.open_set.contains(&neighbour);
            let end = self.end;
            let Some(cell) = self.grid.cell_mut(&neighbour) else {
                continue;
            };
            let improved = if in_open {
                tentative_g < cell.g
            } else {
                true
            };
            if improved {
                cell.g = tentative_g;
                cell.h = manhattan_distance(&neighbour, &end);
                cell.f = cell.g + cell.h;
                cell.parent = Some(current);
            }
            if !in_open {
                self.open_set.insert(neighbour);
                discovered.push(neighbour);
            }
        }
        trace!(
            "Expanded {}: {} open, {} closed",
            current,
            self.open_set.len(),
            self.closed_set.len()
        );
        SearchStep::Expanded {
            visited: current,
            discovered,
        }
    }

    fn finish(&mut self, step: SearchStep) -> SearchStep {
        self.outcome = match &step {
            SearchStep::Found(path) => {
                info!(
                    "Found a path of {} cells from {} to {} after closing {} cells",
                    path.len(),
                    self.start,
                    self.end,
                    self.closed_set.len()
                );
                Some(SearchOutcome::Found(path.clone()))
            }
            SearchStep::NoPath => {
                info!(
                    "No path from {} to {} after closing {} cells",
                    self.start,
                    self.end,
                    self.closed_set.len()
                );
                Some(SearchOutcome::NoPathFound)
            }
            SearchStep::Cancelled => {
                info!("Search from {} to {} was cancelled", self.start, self.end);
                Some(SearchOutcome::Cancelled)
            }
            SearchStep::Expanded { .. } => None,
        };
        step
    }
}

impl Iterator for AstarSearch<'_> {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        if self.is_finished() {
            return None;
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Some(self.finish(SearchStep::Cancelled));
        }
        let step = match self.select_current() {
            None => self.finish(SearchStep::NoPath),
            Some((_, current)) if current == self.end => {
                let path = self.reconstruct_path(current);
                self.finish(SearchStep::Found(path))
            }
            Some((ix, current)) => self.expand(ix, current),
        };
        Some(step)
    }
}

impl FusedIterator for AstarSearch<'_> {}
