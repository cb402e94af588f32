//! Vertex, edge and face entities.
//!
//! Entities refer to each other through handles, so equality is identity:
//! two vertices at the same position are still different vertices, and an
//! edge is the unordered pair of its endpoint handles.

use nalgebra::Point3;

use super::cyclic::next_cyclic;
use super::index::VertexId;
use crate::error::{MeshError, Result};

/// A mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Create a new vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self { position }
    }
}

/// An undirected edge between two distinct vertices.
///
/// The endpoints are stored smallest handle first, so `Edge::new(a, b)` and
/// `Edge::new(b, a)` compare and hash equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    a: VertexId,
    b: VertexId,
}

impl Edge {
    /// Create an edge between two vertices.
    ///
    /// # Panics
    /// Panics in debug builds if `a == b`; use [`Edge::try_new`] for
    /// unchecked input.
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        debug_assert_ne!(a, b, "edge endpoints must differ");
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// Create an edge, rejecting self-loops.
    pub fn try_new(a: VertexId, b: VertexId) -> Result<Self> {
        if a == b {
            return Err(MeshError::DegenerateEdge { vertex: a.index() });
        }
        Ok(Self::new(a, b))
    }

    /// The endpoint with the smaller handle.
    #[inline]
    pub fn a(&self) -> VertexId {
        self.a
    }

    /// The endpoint with the larger handle.
    #[inline]
    pub fn b(&self) -> VertexId {
        self.b
    }

    /// Both endpoints.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 2] {
        [self.a, self.b]
    }

    /// Check whether `v` is an endpoint.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.a == v || self.b == v
    }

    /// The endpoint that is not `v`.
    ///
    /// Returns `None` if `v` is not an endpoint.
    #[inline]
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if v == self.a {
            Some(self.b)
        } else if v == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// The endpoint that is not `v`, where `v` is known to be an endpoint.
    #[inline]
    pub fn opposite(&self, v: VertexId) -> VertexId {
        debug_assert!(self.contains(v), "{:?} is not an endpoint of {:?}", v, self);
        if v == self.a {
            self.b
        } else {
            self.a
        }
    }
}

/// A polygonal face: a cycle of at least three distinct vertices, wound
/// anticlockwise when seen from outside the solid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    vertices: Vec<VertexId>,
}

impl Face {
    pub(crate) fn new(vertices: Vec<VertexId>) -> Self {
        debug_assert!(vertices.len() >= 3, "faces need at least three vertices");
        Self { vertices }
    }

    /// The vertices in winding order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of vertices (and boundary edges).
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; faces have at least three vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check whether `v` is one of this face's vertices.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Consecutive vertex pairs around the face, closing pair last.
    pub fn boundary(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[next_cyclic(i, n)]))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn test_edge_is_symmetric() {
        assert_eq!(Edge::new(v(1), v(2)), Edge::new(v(2), v(1)));

        let mut set = HashSet::new();
        set.insert(Edge::new(v(1), v(2)));
        set.insert(Edge::new(v(2), v(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_edge_rejects_self_loop() {
        assert_eq!(
            Edge::try_new(v(4), v(4)),
            Err(MeshError::DegenerateEdge { vertex: 4 })
        );
        assert!(Edge::try_new(v(4), v(5)).is_ok());
    }

    #[test]
    fn test_edge_other() {
        let e = Edge::new(v(5), v(3));
        assert_eq!(e.other(v(3)), Some(v(5)));
        assert_eq!(e.other(v(5)), Some(v(3)));
        assert_eq!(e.other(v(9)), None);
        assert!(e.contains(v(3)));
        assert_eq!(e.vertices(), [v(3), v(5)]);
    }

    #[test]
    fn test_face_boundary_closes() {
        let face = Face::new(vec![v(0), v(1), v(2), v(3)]);
        let pairs: Vec<_> = face.boundary().collect();
        assert_eq!(
            pairs,
            vec![(v(0), v(1)), (v(1), v(2)), (v(2), v(3)), (v(3), v(0))]
        );
    }
}
