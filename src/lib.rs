//! # grid_astar
//!
//! Step-by-step [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search on a 4-connected
//! grid with unit edge costs and a
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic.
//!
//! The search is exposed as an iterator over [SearchStep]s so that a host (a terminal renderer,
//! a web front-end, a test) can observe every expansion and animate it at its own pace. A
//! [Session] owns the [Grid] together with the start and end markers and is the entry point for
//! most users:
//!
//! ```no_run
//! use grid_astar::{Session, SearchOutcome};
//! use grid_util::point::Point;
//!
//! let mut session = Session::configure(5, 5).unwrap();
//! session.set_start(Point::new(0, 0)).unwrap();
//! session.set_end(Point::new(4, 4)).unwrap();
//! if let SearchOutcome::Found(path) = session.run_with(&mut ()).unwrap() {
//!     assert_eq!(path.len(), 9);
//! }
//! ```
mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod search;
pub mod session;

use grid_util::point::Point;

pub use cell::Cell;
pub use config::Config;
pub use error::{Error, Result};
pub use grid::Grid;
pub use search::{AstarSearch, CancelToken, SearchObserver, SearchOutcome, SearchStep};
pub use session::Session;

/// Number of rows used by [Config::default].
pub const DEFAULT_ROWS: usize = 20;
/// Number of columns used by [Config::default].
pub const DEFAULT_COLS: usize = 20;
/// Delay between two animated steps used by [Config::default], in milliseconds.
pub const DEFAULT_STEP_DELAY_MS: u64 = 20;
/// Cost of moving between two adjacent cells.
pub const STEP_COST: i32 = 1;
/// A cell has at most four neighbours on a 4-connected grid.
pub const N_NEIGHBOURS: usize = 4;

/// Heuristic used by the search: the number of cardinal steps between two points when no
/// walls are in the way.
pub fn manhattan_distance(p1: &Point, p2: &Point) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}
