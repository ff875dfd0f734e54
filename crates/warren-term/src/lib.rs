//! Terminal front-end for warren.
//!
//! Parses the text maze format (`#` wall, `.` empty, `X` entry, `Y` exit),
//! loads mazes from standard input, and renders solver progress to the
//! terminal via crossterm.

pub mod parse;
pub mod render;

pub use parse::{LoadError, ParseError, load_stdin, parse_maze};
pub use render::{Renderer, render_static};
