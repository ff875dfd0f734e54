//! Text maze parsing and the stdin loader.

use std::fmt;
use std::io::{self, BufRead, Write};

use warren_core::{CellState, Grid, Maze, MazeError, Position};

// ---- errors ----

/// Errors from parsing the text maze format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No input lines at all.
    Empty,
    /// A row whose length differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// An entry or exit marker placed off the grid boundary.
    OffBoundary { marker: char, pos: Position },
    /// The same marker appearing twice.
    DuplicateMarker {
        marker: char,
        first: Position,
        second: Position,
    },
    /// No `X` in the input.
    MissingEntry,
    /// No `Y` in the input.
    MissingExit,
    /// Any character outside `#`, `.`, `X`, `Y`.
    UnrecognizedChar { ch: char, pos: Position },
    /// The parsed grid and markers do not form a valid maze.
    InvalidMaze(MazeError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty maze"),
            ParseError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} cells, expected {expected} like the first row"
            ),
            ParseError::OffBoundary { marker, pos } => {
                write!(f, "marker '{marker}' at {pos} is not on the maze boundary")
            }
            ParseError::DuplicateMarker {
                marker,
                first,
                second,
            } => write!(
                f,
                "marker '{marker}' already set at {first}, set again at {second}"
            ),
            ParseError::MissingEntry => write!(f, "entry marker 'X' not set"),
            ParseError::MissingExit => write!(f, "exit marker 'Y' not set"),
            ParseError::UnrecognizedChar { ch, pos } => {
                write!(f, "unrecognized character '{ch}' at {pos}")
            }
            ParseError::InvalidMaze(err) => write!(f, "invalid maze: {err}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidMaze(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MazeError> for ParseError {
    fn from(err: MazeError) -> Self {
        ParseError::InvalidMaze(err)
    }
}

/// Errors from loading a maze from standard input.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Parse(ParseError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "reading maze: {err}"),
            LoadError::Parse(err) => write!(f, "parsing maze: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        LoadError::Parse(err)
    }
}

// ---- parsing ----

/// Parse a maze from its text rows.
///
/// `#` is a wall, `.` an empty cell, `X` the entry and `Y` the exit. Both
/// markers stand on empty cells and must sit on the grid boundary. All rows
/// must have the length of the first one.
pub fn parse_maze(lines: &[&str]) -> Result<Maze, ParseError> {
    let cells: Vec<Vec<char>> = lines.iter().map(|line| line.chars().collect()).collect();
    if cells.is_empty() {
        return Err(ParseError::Empty);
    }
    let rows = cells.len();
    let cols = cells[0].len();
    for (row, line) in cells.iter().enumerate() {
        if line.len() != cols {
            return Err(ParseError::RaggedRow {
                row,
                expected: cols,
                found: line.len(),
            });
        }
    }

    let grid = Grid::from_fn((rows, cols), |pos| {
        match cells[pos.row as usize][pos.col as usize] {
            '#' => CellState::Wall,
            _ => CellState::Empty,
        }
    });
    let mut entry: Option<Position> = None;
    let mut exit: Option<Position> = None;

    for (row, line) in cells.iter().enumerate() {
        for (col, &ch) in line.iter().enumerate() {
            let pos = Position::new(row as i32, col as i32);
            match ch {
                '#' | '.' => {}
                'X' => place_marker('X', pos, &grid, &mut entry)?,
                'Y' => place_marker('Y', pos, &grid, &mut exit)?,
                _ => return Err(ParseError::UnrecognizedChar { ch, pos }),
            }
        }
    }

    let entry = entry.ok_or(ParseError::MissingEntry)?;
    let exit = exit.ok_or(ParseError::MissingExit)?;
    let maze = Maze::new(grid, entry, exit)?;
    let (rows, cols) = maze.grid().dimensions();
    log::debug!("parsed {rows}x{cols} maze, entry {entry}, exit {exit}");
    Ok(maze)
}

fn place_marker(
    marker: char,
    pos: Position,
    grid: &Grid<CellState>,
    slot: &mut Option<Position>,
) -> Result<(), ParseError> {
    if !grid.on_boundary(pos) {
        return Err(ParseError::OffBoundary { marker, pos });
    }
    if let Some(first) = *slot {
        return Err(ParseError::DuplicateMarker {
            marker,
            first,
            second: pos,
        });
    }
    *slot = Some(pos);
    Ok(())
}

// ---- stdin loader ----

/// Prompt for a maze on standard input and parse it.
///
/// Reads lines until the first blank one.
pub fn load_stdin() -> Result<Maze, LoadError> {
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "Enter your maze. Use # for walls, . for empty spaces, X for the entry point and Y for the exit point."
    )?;
    writeln!(stdout, "Enter a blank line when you're done.")?;
    stdout.flush()?;

    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    Ok(parse_maze(&refs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_maze() {
        let maze = parse_maze(&["#X#", "#.#", "#Y#"]).unwrap();
        assert_eq!(maze.grid().dimensions(), (3, 3));
        assert_eq!(maze.entry(), Position::new(0, 1));
        assert_eq!(maze.exit(), Position::new(2, 1));
        assert_eq!(
            maze.grid().get(Position::new(1, 0)),
            Ok(&CellState::Wall)
        );
        assert_eq!(
            maze.grid().get(Position::new(1, 1)),
            Ok(&CellState::Empty)
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_maze(&[]), Err(ParseError::Empty));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            parse_maze(&["#X#", "#.##", "#Y#"]),
            Err(ParseError::RaggedRow {
                row: 1,
                expected: 3,
                found: 4
            })
        );
        assert_eq!(
            parse_maze(&["#X#", "#.", "#Y#"]),
            Err(ParseError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn rejects_markers_off_the_boundary() {
        assert_eq!(
            parse_maze(&["###", "#X#", "#Y#"]),
            Err(ParseError::OffBoundary {
                marker: 'X',
                pos: Position::new(1, 1)
            })
        );
    }

    #[test]
    fn rejects_duplicate_markers() {
        assert_eq!(
            parse_maze(&["#X#", "#.#", "#XY"]),
            Err(ParseError::DuplicateMarker {
                marker: 'X',
                first: Position::new(0, 1),
                second: Position::new(2, 1)
            })
        );
    }

    #[test]
    fn rejects_missing_markers() {
        assert_eq!(parse_maze(&["#.#", "#Y#"]), Err(ParseError::MissingEntry));
        assert_eq!(parse_maze(&["#X#", "#.#"]), Err(ParseError::MissingExit));
    }

    #[test]
    fn rejects_unrecognized_characters() {
        assert_eq!(
            parse_maze(&["#X#", "#?#", "#Y#"]),
            Err(ParseError::UnrecognizedChar {
                ch: '?',
                pos: Position::new(1, 1)
            })
        );
    }
}
