//! Dijkstra solver over the compressed junction graph.

use std::collections::{HashMap, HashSet};

use warren_core::{Direction, Maze, Position};

use crate::compress::compress;
use crate::graph::{EdgeId, Graph, VertexId};
use crate::heap::IndexedMinHeap;
use crate::solver::{SolveError, Solver};

/// Weighted shortest-path search over the compressed maze graph.
///
/// The maze is compressed on construction; every graph vertex is pushed
/// into an [`IndexedMinHeap`] at +∞ (the entry vertex at 0) and settled
/// in non-decreasing distance order, relaxing incident corridor edges by
/// their step count via decrease-key.
pub struct DijkstraSolver<'a> {
    maze: &'a Maze,
    graph: Graph,
    source: Option<VertexId>,
    dist: HashMap<VertexId, f64>,
    prev: HashMap<VertexId, EdgeId>,
    settled: HashSet<VertexId>,
    heap: IndexedMinHeap<VertexId>,
    completed: bool,
}

impl<'a> DijkstraSolver<'a> {
    /// Compress `maze` and prepare the search. Iterate the solver to
    /// completion before asking for the shortest path.
    pub fn new(maze: &'a Maze) -> Self {
        let graph = compress(maze);
        let source = graph.vertex_at(maze.entry());

        let mut ids: Vec<VertexId> = graph.vertices().map(|(id, _)| id).collect();
        ids.sort();

        let mut dist = HashMap::with_capacity(ids.len());
        let mut heap = IndexedMinHeap::new();
        for id in ids {
            let d = if Some(id) == source { 0.0 } else { f64::INFINITY };
            dist.insert(id, d);
            // Vertex handles are unique, so the push cannot collide.
            if let Err(err) = heap.push(id, d) {
                log::warn!("skipping duplicate graph vertex: {err}");
            }
        }

        Self {
            maze,
            graph,
            source,
            dist,
            prev: HashMap::new(),
            settled: HashSet::new(),
            heap,
            completed: false,
        }
    }

    /// The compressed graph being searched.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Shortest weighted distance from the entry to the vertex standing
    /// on `pos`, +∞ if unknown (so far) or if `pos` is not a vertex.
    pub fn distance(&self, pos: Position) -> f64 {
        self.graph
            .vertex_at(pos)
            .and_then(|id| self.dist.get(&id).copied())
            .unwrap_or(f64::INFINITY)
    }
}

impl Iterator for DijkstraSolver<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let Ok(current) = self.heap.pop() else {
            self.completed = true;
            return None;
        };
        self.settled.insert(current);
        let vertex = self.graph.vertex(current)?;
        let pos = vertex.pos();
        let current_dist = self.dist.get(&current).copied().unwrap_or(f64::INFINITY);

        let incident: Vec<EdgeId> = vertex.edges().collect();
        for edge_id in incident {
            let Some(edge) = self.graph.edge(edge_id) else {
                continue;
            };
            let other = edge.other_end(current);
            if self.settled.contains(&other) {
                continue;
            }
            let Some(&other_dist) = self.dist.get(&other) else {
                continue;
            };
            let relaxed = current_dist + edge.weight() as f64;
            if relaxed < other_dist {
                self.dist.insert(other, relaxed);
                self.prev.insert(other, edge_id);
                if let Err(err) = self.heap.decrease_priority(other, relaxed) {
                    log::warn!("relaxation of settled vertex skipped: {err}");
                }
            }
        }
        Some(pos)
    }
}

impl Solver for DijkstraSolver<'_> {
    fn shortest_path(&self) -> Result<Vec<Direction>, SolveError> {
        if !self.completed {
            return Err(SolveError::Incomplete);
        }
        if self.maze.entry() == self.maze.exit() {
            return Ok(Vec::new());
        }
        let source = self.source.ok_or(SolveError::Unreachable)?;
        let exit = self
            .graph
            .vertex_at(self.maze.exit())
            .ok_or(SolveError::Unreachable)?;
        if self.dist.get(&exit).copied().unwrap_or(f64::INFINITY) == f64::INFINITY {
            return Err(SolveError::Unreachable);
        }

        // Chain predecessor edges back to the source, orienting each
        // edge's step sequence to run towards the exit.
        let mut segments: Vec<Vec<Direction>> = Vec::new();
        let mut current = exit;
        while current != source {
            let Some(&edge_id) = self.prev.get(&current) else {
                return Err(SolveError::Unreachable);
            };
            let Some(edge) = self.graph.edge(edge_id) else {
                return Err(SolveError::Unreachable);
            };
            let upstream = edge.other_end(current);
            segments.push(edge.steps_from(upstream));
            current = upstream;
        }
        segments.reverse();
        Ok(segments.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_core::{CellState, Grid};

    fn maze_from(text: &str) -> Maze {
        let lines: Vec<&str> = text.trim().lines().collect();
        let rows = lines.len();
        let cols = lines[0].len();
        let mut grid = Grid::filled((rows, cols), CellState::Empty);
        let mut entry = None;
        let mut exit = None;
        for (r, line) in lines.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let pos = Position::new(r as i32, c as i32);
                match ch {
                    '#' => grid.set(pos, CellState::Wall).unwrap(),
                    'X' => entry = Some(pos),
                    'Y' => exit = Some(pos),
                    _ => {}
                }
            }
        }
        Maze::new(grid, entry.unwrap(), exit.unwrap()).unwrap()
    }

    #[test]
    fn straight_corridor() {
        let maze = maze_from(
            "\
##X##
##.##
##.##
##.##
##Y##",
        );
        let mut solver = DijkstraSolver::new(&maze);
        assert_eq!(solver.graph().vertex_count(), 2);
        for _ in solver.by_ref() {}
        assert_eq!(solver.shortest_path().unwrap(), vec![Direction::Down; 4]);
        assert_eq!(solver.distance(maze.exit()), 4.0);
    }

    #[test]
    fn settles_in_nondecreasing_distance_order() {
        let maze = maze_from(
            "\
X.....#
#.###.#
#.#...#
#.#.#.#
#...#.Y",
        );
        let mut solver = DijkstraSolver::new(&maze);
        let settled: Vec<Position> = solver.by_ref().collect();
        let dists: Vec<f64> = settled.iter().map(|&p| solver.distance(p)).collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(settled.len(), solver.graph().vertex_count());
    }

    #[test]
    fn path_before_completion_is_an_error() {
        let maze = maze_from(
            "\
X.
.Y",
        );
        let mut solver = DijkstraSolver::new(&maze);
        assert_eq!(solver.shortest_path(), Err(SolveError::Incomplete));
        for _ in solver.by_ref() {}
        assert!(solver.shortest_path().is_ok());
    }

    #[test]
    fn replaying_the_path_reaches_the_exit() {
        let maze = maze_from(
            "\
X.....#
#.###.#
#.#...#
#.#.#.#
#...#.Y",
        );
        let mut solver = DijkstraSolver::new(&maze);
        for _ in solver.by_ref() {}
        let path = solver.shortest_path().unwrap();
        let end = path.iter().fold(maze.entry(), |p, &d| p.step(d));
        assert_eq!(end, maze.exit());
    }

    #[test]
    fn unreachable_exit() {
        let maze = maze_from(
            "\
X.#.Y
..#..",
        );
        let mut solver = DijkstraSolver::new(&maze);
        for _ in solver.by_ref() {}
        assert_eq!(solver.shortest_path(), Err(SolveError::Unreachable));
    }

    #[test]
    fn agrees_with_bfs_on_path_length() {
        use crate::bfs::BfsSolver;

        let fixtures = [
            "\
X.....#
#.###.#
#.#...#
#.#.#.#
#...#.Y",
            "\
X...#....
#.#...#..
#.#.###.#
#.#...#.#
#.###.#.#
#.....#.Y",
            "\
##X##
##.##
##.##
##.##
##Y##",
        ];
        for text in fixtures {
            let maze = maze_from(text);

            let mut bfs = BfsSolver::new(&maze);
            for _ in bfs.by_ref() {}
            let bfs_path = bfs.shortest_path().unwrap();

            let mut dijkstra = DijkstraSolver::new(&maze);
            for _ in dijkstra.by_ref() {}
            let dijkstra_path = dijkstra.shortest_path().unwrap();

            assert_eq!(bfs_path.len(), dijkstra_path.len());
            assert_eq!(dijkstra.distance(maze.exit()), bfs_path.len() as f64);

            let end = dijkstra_path.iter().fold(maze.entry(), |p, &d| p.step(d));
            assert_eq!(end, maze.exit());
        }
    }

    #[test]
    fn entry_equals_exit_yields_empty_path() {
        let mut grid = Grid::filled((3, 3), CellState::Wall);
        grid.set(Position::new(1, 1), CellState::Empty).unwrap();
        let maze = Maze::new(grid, Position::new(1, 1), Position::new(1, 1)).unwrap();
        let mut solver = DijkstraSolver::new(&maze);
        for _ in solver.by_ref() {}
        assert_eq!(solver.shortest_path().unwrap(), Vec::new());
    }
}
