use crate::error::{Error, Result};
use crate::{DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_STEP_DELAY_MS};
use std::time::Duration;

/// Static settings of a [Session](crate::Session). The dimensions are fixed for the lifetime
/// of the session; the step delay only affects [Session::animate](crate::Session::animate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub step_delay: Duration,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
        }
    }
}

impl Config {
    pub fn with_dimensions(mut self, rows: usize, cols: usize) -> Config {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Config {
        self.step_delay = step_delay;
        self
    }

    /// Rejects configurations that would produce an empty grid.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}
