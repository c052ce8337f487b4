use grid_util::point::Point;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong before or while setting up a search. Not finding a path is a
/// regular [SearchOutcome](crate::SearchOutcome) and never an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A search was requested while the start or end marker is unset.
    #[error("a start and an end cell must be set before searching (start set: {start_set}, end set: {end_set})")]
    MissingEndpoints { start_set: bool, end_set: bool },

    /// A coordinate does not name a cell of the grid.
    #[error("{point} lies outside the {cols}x{rows} grid")]
    OutOfBounds {
        point: Point,
        cols: usize,
        rows: usize,
    },

    /// The configuration asks for a grid without cells.
    #[error("grid dimensions must be non-zero, got {cols}x{rows}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// The grid still carries g/h/f/parent values of an earlier run.
    #[error("grid holds search state from a previous run; clear it before searching again")]
    StaleSearchState,

    /// The start or end of a search sits on a wall.
    #[error("search endpoint {point} is a wall")]
    WalledEndpoint { point: Point },
}
