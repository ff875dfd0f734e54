//! **warren-core** — Maze pathfinding toolkit (core types).
//!
//! This crate provides the foundational types used across the *warren*
//! ecosystem: geometry primitives, a generic owned 2D grid, and the
//! validated [`Maze`] value that solvers consume.

pub mod geom;
pub mod grid;
pub mod maze;

pub use geom::{Direction, Position};
pub use grid::{Grid, GridError};
pub use maze::{CellState, Maze, MazeError};
