//! Delver — solves text mazes in the terminal.
//!
//! Reads a maze from stdin, runs the chosen solver while animating its
//! progress, and prints the shortest path.

use std::env;

use warren_paths::{BfsSolver, DijkstraSolver};
use warren_term::{Renderer, load_stdin};

const USAGE: &str = "usage: delver [bfs|dijkstra]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let solver_name = env::args().nth(1).unwrap_or_else(|| "dijkstra".into());
    let maze = load_stdin()?;
    let renderer = Renderer::new();

    log::debug!("solving with {solver_name}");
    let path = match solver_name.as_str() {
        "bfs" => renderer.animate(&maze, &mut BfsSolver::new(&maze))?,
        "dijkstra" => renderer.animate(&maze, &mut DijkstraSolver::new(&maze))?,
        other => {
            eprintln!("unknown solver '{other}'\n{USAGE}");
            std::process::exit(2);
        }
    };

    let steps: Vec<String> = path.iter().map(|d| d.to_string()).collect();
    println!("shortest path, {} steps: {}", steps.len(), steps.join(" "));
    Ok(())
}
