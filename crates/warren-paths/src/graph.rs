//! An arena-based undirected graph of maze junctions and corridors.
//!
//! Vertices and edges are addressed by integer handles scoped to one
//! [`Graph`] instance. Identity is by handle, not by position: during
//! compression several scaffold vertices can transiently stand for cells
//! that are later merged away.
//!
//! Removals never cascade: [`Graph::remove_vertex`] does not detach the
//! vertex's edges and [`Graph::remove_edge`] does not touch endpoint edge
//! sets. Callers detach explicitly first (see [`Graph::detach`]).

use std::collections::{BTreeSet, HashMap};

use warren_core::{Direction, Position};

/// Handle of a vertex within one [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(u32);

/// Handle of an edge within one [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(u32);

/// A graph vertex: a grid position plus the edges currently touching it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pos: Position,
    edges: BTreeSet<EdgeId>,
}

impl Vertex {
    /// The grid cell this vertex stands on.
    #[inline]
    pub fn pos(&self) -> Position {
        self.pos
    }

    /// Handles of the edges touching this vertex, in stable order.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    /// Number of edges touching this vertex.
    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// A corridor edge: the ordered unit steps from `tail` to `head`.
///
/// Undirected for traversal; the fixed tail/head pair only orients the
/// stored step sequence.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    steps: Vec<Direction>,
    tail: VertexId,
    head: VertexId,
}

impl Edge {
    /// The vertex the step sequence starts from.
    #[inline]
    pub fn tail(&self) -> VertexId {
        self.tail
    }

    /// The vertex the step sequence ends on.
    #[inline]
    pub fn head(&self) -> VertexId {
        self.head
    }

    /// The steps from tail to head. Never empty.
    #[inline]
    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    /// Edge weight: the number of unit steps it spans.
    #[inline]
    pub fn weight(&self) -> usize {
        self.steps.len()
    }

    /// The endpoint that is not `v`.
    #[inline]
    pub fn other_end(&self, v: VertexId) -> VertexId {
        if v == self.tail { self.head } else { self.tail }
    }

    /// The step sequence oriented to leave `from`: tail→head steps as
    /// stored, head→tail steps reversed and direction-inverted.
    pub fn steps_from(&self, from: VertexId) -> Vec<Direction> {
        if from == self.tail {
            self.steps.clone()
        } else {
            self.steps.iter().rev().map(|d| d.opposite()).collect()
        }
    }
}

/// Arena owning the vertex and edge sets of one compressed maze.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: HashMap<VertexId, Vertex>,
    edges: HashMap<EdgeId, Edge>,
    next_vertex: u32,
    next_edge: u32,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new vertex at `pos` and return its handle.
    pub fn add_vertex(&mut self, pos: Position) -> VertexId {
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;
        self.vertices.insert(
            id,
            Vertex {
                pos,
                edges: BTreeSet::new(),
            },
        );
        id
    }

    /// Create an edge with a single initial step and register it with both
    /// endpoints' edge sets.
    pub fn add_edge(&mut self, tail: VertexId, head: VertexId, first_step: Direction) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.insert(
            id,
            Edge {
                steps: vec![first_step],
                tail,
                head,
            },
        );
        if let Some(v) = self.vertices.get_mut(&tail) {
            v.edges.insert(id);
        }
        if let Some(v) = self.vertices.get_mut(&head) {
            v.edges.insert(id);
        }
        id
    }

    /// Remove a vertex from the graph. Its edges are NOT removed or
    /// detached; callers must do that first.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        self.vertices.remove(&id)
    }

    /// Remove an edge from the graph. Endpoint edge sets are NOT updated;
    /// callers must detach first.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.edges.remove(&id)
    }

    /// Unhook `edge` from `vertex`'s edge set, if the vertex still exists.
    pub fn detach(&mut self, vertex: VertexId, edge: EdgeId) {
        if let Some(v) = self.vertices.get_mut(&vertex) {
            v.edges.remove(&edge);
        }
    }

    /// Re-point an edge's head, moving its registration from the old head
    /// to the new one.
    pub fn set_head(&mut self, edge: EdgeId, head: VertexId) {
        if let Some(e) = self.edges.get_mut(&edge) {
            e.head = head;
            if let Some(v) = self.vertices.get_mut(&head) {
                v.edges.insert(edge);
            }
        }
    }

    /// Append a step to an edge's tail→head sequence.
    pub fn push_step(&mut self, edge: EdgeId, dir: Direction) {
        if let Some(e) = self.edges.get_mut(&edge) {
            e.steps.push(dir);
        }
    }

    /// Look up a vertex by handle.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Look up an edge by handle.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over all `(VertexId, &Vertex)` pairs (unspecified order).
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().map(|(&id, v)| (id, v))
    }

    /// Iterate over all `(EdgeId, &Edge)` pairs (unspecified order).
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().map(|(&id, e)| (id, e))
    }

    /// Find the vertex standing on `pos`, if any.
    pub fn vertex_at(&self, pos: Position) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|(_, v)| v.pos == pos)
            .map(|(&id, _)| id)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn edge_round_trips_through_json() {
        let mut g = Graph::new();
        let a = g.add_vertex(Position::new(0, 0));
        let b = g.add_vertex(Position::new(0, 2));
        let e = g.add_edge(a, b, Direction::Right);
        g.push_step(e, Direction::Right);

        let edge = g.edge(e).unwrap();
        let json = serde_json::to_string(edge).unwrap();
        let back: Edge = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tail(), edge.tail());
        assert_eq!(back.head(), edge.head());
        assert_eq!(back.steps(), edge.steps());
    }
}
