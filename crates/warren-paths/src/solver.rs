//! The common solver contract.

use std::fmt;

use warren_core::{Direction, Position};

/// Errors raised by [`Solver::shortest_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The settle sequence has not been fully consumed yet.
    Incomplete,
    /// No path exists between the maze entry and exit.
    Unreachable,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => write!(f, "solve was not run to completion"),
            Self::Unreachable => write!(f, "no path exists from entry to exit"),
        }
    }
}

impl std::error::Error for SolveError {}

/// A maze solver.
///
/// The solver value itself is the lazy settle sequence: iterating yields
/// each position in the order it is settled and, as a side effect,
/// records its shortest distance from the entry. The sequence is finite,
/// single-pass, and non-restartable; a caller that stops iterating early
/// simply abandons the remaining frontier.
///
/// [`shortest_path`](Solver::shortest_path) is only available once the
/// iterator is exhausted; calling it earlier fails with
/// [`SolveError::Incomplete`].
pub trait Solver: Iterator<Item = Position> {
    /// The ordered steps from entry to exit along a shortest path.
    ///
    /// Empty if entry equals exit. Fails with [`SolveError::Unreachable`]
    /// when the exit was never reached.
    fn shortest_path(&self) -> Result<Vec<Direction>, SolveError>;
}
