//! Maze-to-graph compression.
//!
//! Collapses a dense occupancy grid into a sparse weighted graph: cells
//! with degree ≠ 2 (junctions, dead ends, the entry and the exit) become
//! vertices, and each maximal straight corridor between them folds into a
//! single edge carrying the ordered unit steps that traverse it.

use std::collections::{HashSet, VecDeque};

use warren_core::{Grid, Maze, Position};

use crate::graph::{EdgeId, Graph, VertexId};

/// Compress `maze` into its junction graph.
///
/// Runs a multi-source flood fill with edge splicing: a scaffold vertex is
/// allocated for every cell, corridors are folded by re-pointing a growing
/// edge's head across pass-through cells, and mirror edges (the same
/// corridor reached from the other end) are discarded. Scaffold vertices
/// that never earn an edge are swept at the end, except the entry and exit
/// which always survive.
pub fn compress(maze: &Maze) -> Graph {
    let mut graph = Graph::new();
    let scaffold: Grid<VertexId> =
        Grid::from_fn(maze.grid().dimensions(), |pos| graph.add_vertex(pos));

    let is_endpoint = |pos: Position| pos == maze.entry() || pos == maze.exit();

    // Cells whose junction/merge status is resolved.
    let mut visited: HashSet<Position> = HashSet::new();
    // Directed cell adjacencies already folded into some edge.
    let mut visited_pairs: HashSet<(Position, Position)> = HashSet::new();
    let mut queue: VecDeque<(Position, VertexId, EdgeId)> = VecDeque::new();

    for (root_pos, &root_vertex) in scaffold.iter() {
        if visited.contains(&root_pos) || !maze.is_empty_cell(root_pos) {
            continue;
        }

        // Seed the flood: the root always stays a vertex.
        visited.insert(root_pos);
        for (dir, &neighbor) in scaffold.neighbors(root_pos, |p, _| maze.is_empty_cell(p)) {
            let neighbor_pos = root_pos.step(dir);
            let edge = graph.add_edge(root_vertex, neighbor, dir);
            visited_pairs.insert((root_pos, neighbor_pos));
            queue.push_back((neighbor_pos, neighbor, edge));
        }

        while let Some((pos, vertex, edge)) = queue.pop_front() {
            let Some(last_dir) = graph.edge(edge).and_then(|e| e.steps().last().copied()) else {
                continue;
            };
            let parent_pos = pos.step(last_dir.opposite());

            if visited_pairs.contains(&(pos, parent_pos)) {
                // Mirror of a corridor already spliced from the other end.
                discard_edge(&mut graph, edge, &is_endpoint);
                continue;
            }
            visited_pairs.insert((parent_pos, pos));

            if visited.contains(&pos) {
                // Already resolved; the edge terminates here as-is.
                continue;
            }
            visited.insert(pos);

            let onward: Vec<(warren_core::Direction, VertexId)> = scaffold
                .neighbors(pos, |p, _| maze.is_empty_cell(p) && p != parent_pos)
                .into_iter()
                .map(|(d, &v)| (d, v))
                .collect();

            if onward.is_empty() {
                // Dead end: the edge terminates here.
                continue;
            }

            if onward.len() == 1 && !is_endpoint(pos) && !visited.contains(&pos.step(onward[0].0)) {
                // Pass-through corridor cell: merge it away and extend the
                // edge to the next cell.
                let (dir, next_vertex) = onward[0];
                graph.detach(vertex, edge);
                graph.remove_vertex(vertex);
                graph.set_head(edge, next_vertex);
                graph.push_step(edge, dir);
                queue.push_back((pos.step(dir), next_vertex, edge));
                continue;
            }

            // Junction, the maze entry/exit, or the closing cell of a
            // corridor cycle (the onward cell is already resolved, so two
            // flood fronts are meeting here): terminate the current edge
            // and start a fresh single-step edge per onward neighbor. The
            // mirror-pair check above dedupes the meeting adjacency.
            for (dir, next_vertex) in onward {
                let new_edge = graph.add_edge(vertex, next_vertex, dir);
                queue.push_back((pos.step(dir), next_vertex, new_edge));
            }
        }
    }

    // Sweep edges left pointing at a merged-away endpoint (cycle meeting
    // points can produce these before their mirror is discarded).
    let dangling: Vec<EdgeId> = graph
        .edges()
        .filter(|(_, e)| graph.vertex(e.tail()).is_none() || graph.vertex(e.head()).is_none())
        .map(|(id, _)| id)
        .collect();
    for id in dangling {
        if let Some(e) = graph.remove_edge(id) {
            graph.detach(e.tail(), id);
            graph.detach(e.head(), id);
        }
    }

    // Sweep scaffold vertices that never earned an edge (walls, merged
    // corridor cells). Entry and exit always stay resolvable.
    let edgeless: Vec<VertexId> = graph
        .vertices()
        .filter(|(_, v)| v.degree() == 0 && !is_endpoint(v.pos()))
        .map(|(id, _)| id)
        .collect();
    for id in edgeless {
        graph.remove_vertex(id);
    }

    log::debug!(
        "compressed {:?} maze to {} vertices / {} edges",
        maze.grid().dimensions(),
        graph.vertex_count(),
        graph.edge_count()
    );
    graph
}

/// Remove a mirror edge: detach it from both endpoints and drop endpoints
/// that become edgeless, entry/exit excepted.
fn discard_edge(graph: &mut Graph, edge: EdgeId, is_endpoint: &impl Fn(Position) -> bool) {
    let Some(removed) = graph.remove_edge(edge) else {
        return;
    };
    for end in [removed.tail(), removed.head()] {
        graph.detach(end, edge);
        let orphaned = graph
            .vertex(end)
            .is_some_and(|v| v.degree() == 0 && !is_endpoint(v.pos()));
        if orphaned {
            graph.remove_vertex(end);
        }
    }
}
