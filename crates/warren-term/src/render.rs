//! Crossterm maze renderer.
//!
//! [`Renderer::animate`] repaints the maze cell by cell as a solver settles
//! positions, then overlays the shortest path. [`render_static`] is the
//! plain one-shot text dump.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor, execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{self, ClearType},
};

use warren_core::{CellState, Direction, Maze, Position};
use warren_paths::Solver;

const WALL: (char, Color) = ('#', Color::DarkGrey);
const EMPTY: (char, Color) = ('.', Color::Reset);
const ENTRY: (char, Color) = ('X', Color::Green);
const EXIT: (char, Color) = ('Y', Color::Red);
const SETTLED: (char, Color) = ('+', Color::Blue);
const PATH: (char, Color) = ('*', Color::Yellow);

/// Animated terminal view of a maze solve.
pub struct Renderer {
    frame_delay: Duration,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            frame_delay: Duration::from_millis(25),
        }
    }

    /// Pause inserted after each settled cell repaint.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Drive `solver` to completion, painting each settled position, then
    /// overlay the shortest path. Returns the path on success.
    pub fn animate<S: Solver>(
        &self,
        maze: &Maze,
        solver: &mut S,
    ) -> Result<Vec<Direction>, Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();
        execute!(stdout, terminal::Clear(ClearType::All), cursor::Hide)?;
        let result = self.run(&mut stdout, maze, solver);
        let (rows, _) = maze.grid().dimensions();
        let _ = execute!(stdout, cursor::MoveTo(0, rows as u16), cursor::Show);
        result
    }

    fn run<S: Solver>(
        &self,
        stdout: &mut io::Stdout,
        maze: &Maze,
        solver: &mut S,
    ) -> Result<Vec<Direction>, Box<dyn std::error::Error>> {
        for (pos, state) in maze.grid().iter() {
            let glyph = match state {
                CellState::Wall => WALL,
                CellState::Empty => EMPTY,
            };
            draw_cell(stdout, maze, pos, glyph)?;
        }
        draw_cell(stdout, maze, maze.entry(), ENTRY)?;
        draw_cell(stdout, maze, maze.exit(), EXIT)?;
        stdout.flush()?;

        for pos in solver.by_ref() {
            draw_cell(stdout, maze, pos, SETTLED)?;
            stdout.flush()?;
            thread::sleep(self.frame_delay);
        }

        let path = solver.shortest_path()?;
        let mut pos = maze.entry();
        for &dir in &path {
            pos = pos.step(dir);
            draw_cell(stdout, maze, pos, PATH)?;
        }
        stdout.flush()?;
        Ok(path)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint one cell, leaving the entry and exit markers in place.
fn draw_cell(
    stdout: &mut io::Stdout,
    maze: &Maze,
    pos: Position,
    (ch, color): (char, Color),
) -> io::Result<()> {
    let (ch, color) = if pos == maze.entry() && ch != ENTRY.0 {
        ENTRY
    } else if pos == maze.exit() && ch != EXIT.0 {
        EXIT
    } else {
        (ch, color)
    };
    execute!(
        stdout,
        cursor::MoveTo(pos.col as u16, pos.row as u16),
        SetForegroundColor(color),
        Print(ch),
        SetForegroundColor(Color::Reset)
    )
}

/// Write the maze as plain text rows, one character per cell.
pub fn render_static(out: &mut impl Write, maze: &Maze) -> io::Result<()> {
    let (rows, cols) = maze.grid().dimensions();
    for row in 0..rows {
        for col in 0..cols {
            let pos = Position::new(row as i32, col as i32);
            let ch = if pos == maze.entry() {
                ENTRY.0
            } else if pos == maze.exit() {
                EXIT.0
            } else {
                match maze.grid().get(pos) {
                    Ok(CellState::Wall) => WALL.0,
                    _ => EMPTY.0,
                }
            };
            write!(out, "{ch}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
