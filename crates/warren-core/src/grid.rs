//! The [`Grid`] type — an owned, rectangular, row-major 2D container.
//!
//! Unlike a shared-view grid, a `Grid<T>` owns its cells exclusively and
//! its dimensions are fixed at construction. Out-of-bounds access is an
//! error, never clamped or wrapped.

use std::fmt;

use crate::geom::{Direction, Position};

/// Errors raised by [`Grid`] indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The position lies outside the grid's dimensions.
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "position {pos} out of bounds for {rows}x{cols} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A rectangular row-major grid indexable by [`Position`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Grid<T> {
    /// Create a grid of `(rows, cols)` filled with clones of `value`.
    pub fn filled((rows, cols): (usize, usize), value: T) -> Self
    where
        T: Clone,
    {
        Self {
            cells: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a grid of `(rows, cols)` where each cell is produced by a
    /// factory keyed on its position, in row-major order.
    pub fn from_fn((rows, cols): (usize, usize), mut f: impl FnMut(Position) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(Position::new(row as i32, col as i32)));
            }
        }
        Self { cells, rows, cols }
    }

    /// Grid dimensions as `(rows, cols)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether `pos` is inside the grid.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    /// Whether `pos` lies on the outer boundary of the grid.
    #[inline]
    pub fn on_boundary(&self, pos: Position) -> bool {
        pos.row == 0
            || pos.col == 0
            || pos.row == self.rows as i32 - 1
            || pos.col == self.cols as i32 - 1
    }

    #[inline]
    fn index(&self, pos: Position) -> Result<usize, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(pos.row as usize * self.cols + pos.col as usize)
    }

    /// Read the cell at `pos`.
    pub fn get(&self, pos: Position) -> Result<&T, GridError> {
        let idx = self.index(pos)?;
        Ok(&self.cells[idx])
    }

    /// Mutable access to the cell at `pos`.
    pub fn get_mut(&mut self, pos: Position) -> Result<&mut T, GridError> {
        let idx = self.index(pos)?;
        Ok(&mut self.cells[idx])
    }

    /// Overwrite the cell at `pos`.
    pub fn set(&mut self, pos: Position, value: T) -> Result<(), GridError> {
        let idx = self.index(pos)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Enumerate the in-bounds cardinal neighbors of `pos` that satisfy
    /// `predicate`, in [`Direction::ALL`] order.
    pub fn neighbors(
        &self,
        pos: Position,
        mut predicate: impl FnMut(Position, &T) -> bool,
    ) -> Vec<(Direction, &T)> {
        let mut out = Vec::with_capacity(4);
        for dir in Direction::ALL {
            let np = pos.step(dir);
            if let Ok(value) = self.get(np) {
                if predicate(np, value) {
                    out.push((dir, value));
                }
            }
        }
        out
    }

    /// All in-bounds cardinal neighbors of `pos`, in [`Direction::ALL`] order.
    pub fn neighbors_all(&self, pos: Position) -> Vec<(Direction, &T)> {
        self.neighbors(pos, |_, _| true)
    }

    /// Iterate over `(Position, &T)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.cells.iter().enumerate().map(|(i, v)| {
            let pos = Position::new((i / self.cols) as i32, (i % self.cols) as i32);
            (pos, v)
        })
    }
}
