//! **warren-paths** — maze compression and shortest-path solvers.
//!
//! This crate turns a dense [`warren_core::Maze`] into answers:
//!
//! - [`IndexedMinHeap`] — a binary min-heap with O(log n) decrease-key
//! - [`Graph`] / [`compress`] — collapses straight corridors into single
//!   weighted edges, leaving only junctions, dead ends, and the maze
//!   endpoints as vertices
//! - [`BfsSolver`] — unweighted breadth-first search over the raw grid
//! - [`DijkstraSolver`] — weighted search over the compressed graph
//!
//! Both solvers implement [`Solver`]: the solver value itself is the lazy
//! sequence of settled positions, and once it is exhausted
//! [`Solver::shortest_path`] yields the entry→exit step sequence.

mod bfs;
mod compress;
mod dijkstra;
mod graph;
mod heap;
mod solver;

pub use bfs::BfsSolver;
pub use compress::compress;
pub use dijkstra::DijkstraSolver;
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use heap::{HeapError, IndexedMinHeap};
pub use solver::{SolveError, Solver};
