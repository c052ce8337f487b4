use crate::config::Config;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::search::{AstarSearch, CancelToken, SearchObserver, SearchOutcome};
use core::fmt;
use grid_util::point::Point;
use log::{debug, info};

/// Everything a front-end needs to edit a grid and run searches on it: the [Grid], the start
/// and end markers and the [Config] the grid was built from.
///
/// The start and end cells are never walls. Setting a marker clears the wall on its cell and
/// wall edits on a marked cell are ignored.
#[derive(Clone, Debug)]
pub struct Session {
    config: Config,
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
}

impl Session {
    pub fn new(config: Config) -> Result<Session> {
        config.validate()?;
        info!("Creating a {}x{} grid", config.cols, config.rows);
        Ok(Session {
            grid: Grid::new(config.rows, config.cols),
            config,
            start: None,
            end: None,
        })
    }

    /// A session with the given dimensions and the default step delay.
    pub fn configure(rows: usize, cols: usize) -> Result<Session> {
        Session::new(Config::default().with_dimensions(rows, cols))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }
    fn is_marker(&self, point: &Point) -> bool {
        self.start.as_ref() == Some(point) || self.end.as_ref() == Some(point)
    }

    /// Sets or clears the wall on `point`. Does nothing on the start or end cell.
    pub fn set_wall(&mut self, point: Point, blocked: bool) -> Result<()> {
        self.grid.checked_ix(&point)?;
        if self.is_marker(&point) {
            return Ok(());
        }
        self.grid.set_wall(&point, blocked)
    }

    /// Flips the wall on `point`, returning the new state. Start and end cells stay free.
    pub fn toggle_wall(&mut self, point: Point) -> Result<bool> {
        let blocked = !self.grid.is_wall(&point);
        self.set_wall(point, blocked)?;
        Ok(self.grid.is_wall(&point))
    }

    pub fn set_start(&mut self, point: Point) -> Result<()> {
        self.grid.set_wall(&point, false)?;
        self.start = Some(point);
        Ok(())
    }

    pub fn set_end(&mut self, point: Point) -> Result<()> {
        self.grid.set_wall(&point, false)?;
        self.end = Some(point);
        Ok(())
    }

    /// Clears the markers, every wall and all search state.
    pub fn reset(&mut self) {
        info!("Resetting grid");
        self.start = None;
        self.end = None;
        self.grid.clear_scratch();
        self.grid.clear_walls();
    }

    /// Clears the search state of the last run but keeps walls and markers.
    pub fn clear_search(&mut self) {
        self.grid.clear_scratch();
    }

    fn endpoints(&self) -> Result<(Point, Point)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (start, end) => Err(Error::MissingEndpoints {
                start_set: start.is_some(),
                end_set: end.is_some(),
            }),
        }
    }

    /// Starts a new search between the current markers. Search state left by an earlier run
    /// is cleared first; nothing is touched if a marker is missing. The region check before
    /// the search only feeds the debug log; the search runs either way.
    pub fn run(&mut self) -> Result<AstarSearch<'_>> {
        let (start, end) = self.endpoints()?;
        self.clear_search();
        self.grid.update();
        if self.grid.reachable(&start, &end) {
            debug!("{} is reachable from {}, computing path", end, start);
        } else {
            debug!("{} is not reachable from {}", end, start);
        }
        info!("Searching from {} to {}", start, end);
        AstarSearch::new(&mut self.grid, start, end)
    }

    /// [run](Self::run) with a token that can cancel the search from elsewhere.
    pub fn run_cancellable(&mut self, cancel: CancelToken) -> Result<AstarSearch<'_>> {
        Ok(self.run()?.with_cancel_token(cancel))
    }

    /// Runs a search to completion, reporting every step to `observer`.
    pub fn run_with<O: SearchObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<SearchOutcome> {
        Ok(self.run()?.drive(observer))
    }

    /// Runs a search to completion, sleeping for the configured step delay after every
    /// expansion.
    pub fn animate<O: SearchObserver + ?Sized>(
        &mut self,
        observer: &mut O,
        cancel: CancelToken,
    ) -> Result<SearchOutcome> {
        let delay = self.config.step_delay;
        Ok(self.run_cancellable(cancel)?.pace(observer, delay))
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.rows() as i32 {
            for x in 0..self.grid.cols() as i32 {
                let p = Point::new(x, y);
                let c = if self.start == Some(p) {
                    'S'
                } else if self.end == Some(p) {
                    'E'
                } else if self.grid.is_wall(&p) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
