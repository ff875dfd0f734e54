//! Breadth-first solver over the raw maze grid.

use std::collections::VecDeque;

use warren_core::{Direction, Grid, Maze, Position};

use crate::solver::{SolveError, Solver};

/// Unweighted breadth-first search from the maze entry.
///
/// Distances (in grid hops) are recorded per cell in a parallel grid,
/// initialised to +∞ everywhere but the entry. The shortest path is
/// reconstructed by walking the distance gradient backwards from the exit.
pub struct BfsSolver<'a> {
    maze: &'a Maze,
    dist: Grid<f64>,
    frontier: VecDeque<Position>,
    completed: bool,
}

impl<'a> BfsSolver<'a> {
    /// Create a solver for `maze`. Iterate it to completion before asking
    /// for the shortest path.
    pub fn new(maze: &'a Maze) -> Self {
        let mut dist = Grid::filled(maze.grid().dimensions(), f64::INFINITY);
        // The entry is a validated empty cell.
        let _ = dist.set(maze.entry(), 0.0);
        let mut frontier = VecDeque::new();
        frontier.push_back(maze.entry());
        Self {
            maze,
            dist,
            frontier,
            completed: false,
        }
    }

    /// Shortest hop distance from the entry, +∞ if unreached (so far).
    pub fn distance(&self, pos: Position) -> f64 {
        self.dist.get(pos).copied().unwrap_or(f64::INFINITY)
    }
}

impl Iterator for BfsSolver<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let Some(pos) = self.frontier.pop_front() else {
            self.completed = true;
            return None;
        };
        let next_dist = self.distance(pos) + 1.0;
        let unseen: Vec<Position> = self
            .maze
            .grid()
            .neighbors(pos, |p, &cell| {
                cell == warren_core::CellState::Empty && self.distance(p) == f64::INFINITY
            })
            .into_iter()
            .map(|(dir, _)| pos.step(dir))
            .collect();
        for np in unseen {
            let _ = self.dist.set(np, next_dist);
            self.frontier.push_back(np);
        }
        Some(pos)
    }
}

impl Solver for BfsSolver<'_> {
    fn shortest_path(&self) -> Result<Vec<Direction>, SolveError> {
        if !self.completed {
            return Err(SolveError::Incomplete);
        }
        if self.maze.entry() == self.maze.exit() {
            return Ok(Vec::new());
        }
        if self.distance(self.maze.exit()) == f64::INFINITY {
            return Err(SolveError::Unreachable);
        }

        // Walk the gradient backwards: from the exit, repeatedly move to
        // the neighbor with the strictly smallest distance (first wins on
        // ties, in the fixed direction order) and record the inverse step.
        let mut steps = Vec::new();
        let mut pos = self.maze.exit();
        while pos != self.maze.entry() {
            let mut best: Option<(Direction, Position, f64)> = None;
            for dir in Direction::ALL {
                let np = pos.step(dir);
                if !self.maze.is_empty_cell(np) {
                    continue;
                }
                let d = self.distance(np);
                if best.is_none_or(|(_, _, bd)| d < bd) {
                    best = Some((dir, np, d));
                }
            }
            // The gradient always descends on a completed reachable maze.
            let Some((dir, np, d)) = best else {
                return Err(SolveError::Unreachable);
            };
            if d >= self.distance(pos) {
                return Err(SolveError::Unreachable);
            }
            steps.push(dir.opposite());
            pos = np;
        }
        steps.reverse();
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_core::CellState;

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
    fn straight_corridor_path() {
        let maze = maze_from(
            "\
##X##
##.##
##.##
##.##
##Y##",
        );
        let mut solver = BfsSolver::new(&maze);
        let settled: Vec<Position> = solver.by_ref().collect();
        assert_eq!(settled[0], maze.entry());
        assert_eq!(settled.len(), 5);
        assert_eq!(solver.shortest_path().unwrap(), vec![Direction::Down; 4]);
    }

    #[test]
    fn path_before_completion_is_an_error() {
        let maze = maze_from(
            "\
X.
.Y",
        );
        let mut solver = BfsSolver::new(&maze);
        assert_eq!(solver.shortest_path(), Err(SolveError::Incomplete));
        let _ = solver.next();
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
        let mut solver = BfsSolver::new(&maze);
        for _ in solver.by_ref() {}
        let path = solver.shortest_path().unwrap();
        let end = path.iter().fold(maze.entry(), |p, &d| p.step(d));
        assert_eq!(end, maze.exit());
        assert_eq!(path.len() as f64, solver.distance(maze.exit()));
    }

    #[test]
    fn unreachable_exit() {
        let maze = maze_from(
            "\
X.#.Y
..#..",
        );
        let mut solver = BfsSolver::new(&maze);
        for _ in solver.by_ref() {}
        assert_eq!(solver.shortest_path(), Err(SolveError::Unreachable));
    }

    #[test]
    fn entry_equals_exit_yields_empty_path() {
        let mut grid = Grid::filled((3, 3), CellState::Wall);
        grid.set(Position::new(1, 1), CellState::Empty).unwrap();
        let maze = Maze::new(grid, Position::new(1, 1), Position::new(1, 1)).unwrap();
        let mut solver = BfsSolver::new(&maze);
        for _ in solver.by_ref() {}
        assert_eq!(solver.shortest_path().unwrap(), Vec::new());
    }

    #[test]
    fn settle_order_is_by_distance() {
        let maze = maze_from(
            "\
X..
..Y",
        );
        let mut solver = BfsSolver::new(&maze);
        let settled: Vec<Position> = solver.by_ref().collect();
        let dist: Vec<f64> = settled.iter().map(|&p| solver.distance(p)).collect();
        assert!(dist.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(settled.len(), 6);
    }
}
