//! The [`Maze`] value — a validated wall/empty grid with entry and exit.

use std::fmt;

use crate::geom::Position;
use crate::grid::Grid;

/// State of a single maze cell. Immutable once the maze is constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Empty,
    Wall,
}

/// Errors raised at [`Maze`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Entry or exit does not index an empty in-bounds cell.
    InvalidMaze { entry: Position, exit: Position },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaze { entry, exit } => {
                write!(f, "entry {entry} and exit {exit} must both be empty cells")
            }
        }
    }
}

impl std::error::Error for MazeError {}

/// A rectangular maze: a grid of walls and empty cells plus an entry and
/// an exit position. Read-only after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid<CellState>,
    entry: Position,
    exit: Position,
}

impl Maze {
    /// Create a maze, validating that both `entry` and `exit` index
    /// in-bounds [`CellState::Empty`] cells.
    pub fn new(grid: Grid<CellState>, entry: Position, exit: Position) -> Result<Self, MazeError> {
        let empty_at = |pos| grid.get(pos) == Ok(&CellState::Empty);
        if !empty_at(entry) || !empty_at(exit) {
            return Err(MazeError::InvalidMaze { entry, exit });
        }
        Ok(Self { grid, entry, exit })
    }

    /// The underlying cell grid.
    #[inline]
    pub fn grid(&self) -> &Grid<CellState> {
        &self.grid
    }

    /// The entry position.
    #[inline]
    pub fn entry(&self) -> Position {
        self.entry
    }

    /// The exit position.
    #[inline]
    pub fn exit(&self) -> Position {
        self.exit
    }

    /// Whether `pos` is an in-bounds empty cell.
    #[inline]
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        self.grid.get(pos) == Ok(&CellState::Empty)
    }
}
