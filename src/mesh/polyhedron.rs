//! The assembled polyhedral mesh.
//!
//! A [`Polyhedron`] owns its vertices, edges and faces in arenas and stores
//! the adjacency between them as dense tables indexed by handle. It is built
//! once by the topology builder and never modified afterwards; every query is
//! a lookup into precomputed data.
//!
//! # Ordering
//!
//! Around every vertex the edges run anticlockwise (viewed from outside) and
//! the faces are aligned with them: `faces_of_vertex(v)[i]` lies between
//! `edges_of_vertex(v)[i - 1]` and `edges_of_vertex(v)[i]`, cyclically.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use super::cyclic::CyclicIndex;
use super::index::{EdgeId, FaceId, VertexId};
use super::primitives::{Edge, Face, Vertex};
use super::topology::build_polyhedron;
use crate::error::Result;

/// A closed polyhedral mesh with precomputed adjacency.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) faces: Vec<Face>,

    /// Edges around each vertex, anticlockwise.
    pub(crate) vertex_edges: Vec<Vec<EdgeId>>,

    /// Faces around each vertex, aligned with `vertex_edges`.
    pub(crate) vertex_faces: Vec<Vec<FaceId>>,

    /// Boundary edges of each face, aligned with its vertex pairs.
    pub(crate) face_edges: Vec<Vec<EdgeId>>,

    /// The two faces on either side of each edge.
    pub(crate) edge_faces: Vec<[FaceId; 2]>,

    pub(crate) edge_lookup: HashMap<Edge, EdgeId>,
}

impl Polyhedron {
    /// Build a polyhedron from vertex positions and polygonal faces.
    ///
    /// See [`build_polyhedron`] for the requirements on the input.
    pub fn from_faces<F: AsRef<[usize]>>(positions: &[Point3<f64>], faces: &[F]) -> Result<Self> {
        build_polyhedron(positions, faces)
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertex(v).position
    }

    // ==================== Dense indices ====================

    /// Dense index of a vertex; `vertices[vertex_index(v)]` is `v`.
    #[inline]
    pub fn vertex_index(&self, v: VertexId) -> usize {
        v.index()
    }

    /// Dense index of an edge.
    #[inline]
    pub fn edge_index(&self, e: EdgeId) -> usize {
        e.index()
    }

    /// Dense index of a face.
    #[inline]
    pub fn face_index(&self, f: FaceId) -> usize {
        f.index()
    }

    /// Find the edge joining two vertices, if there is one.
    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        if a == b {
            return None;
        }
        self.edge_lookup.get(&Edge::new(a, b)).copied()
    }

    // ==================== Topology Queries ====================

    /// Edges around a vertex, anticlockwise.
    #[inline]
    pub fn edges_of_vertex(&self, v: VertexId) -> &[EdgeId] {
        &self.vertex_edges[v.index()]
    }

    /// Faces around a vertex; face `i` lies between edges `i - 1` and `i`.
    #[inline]
    pub fn faces_of_vertex(&self, v: VertexId) -> &[FaceId] {
        &self.vertex_faces[v.index()]
    }

    /// Edges of a face; edge `i` joins face vertices `i` and `i + 1`.
    #[inline]
    pub fn edges_of_face(&self, f: FaceId) -> &[EdgeId] {
        &self.face_edges[f.index()]
    }

    /// The two faces either side of an edge.
    #[inline]
    pub fn faces_of_edge(&self, e: EdgeId) -> [FaceId; 2] {
        self.edge_faces[e.index()]
    }

    /// The neighbour of `v` across edge `e`.
    #[inline]
    pub fn neighbour_across(&self, e: EdgeId, v: VertexId) -> VertexId {
        self.edge(e).opposite(v)
    }

    /// Vertices adjacent to `v`, in the same anticlockwise order as its edges.
    pub fn neighbours_of(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges_of_vertex(v)
            .iter()
            .map(move |&e| self.neighbour_across(e, v))
    }

    /// Number of edges (equivalently faces) around a vertex.
    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.vertex_edges[v.index()].len()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Iterate over all faces with their IDs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i), f))
    }

    // ==================== Geometry ====================

    /// Midpoint of an edge's endpoints.
    pub fn bisection_point(&self, e: EdgeId) -> Point3<f64> {
        let [a, b] = self.edge(e).vertices();
        Point3::from((self.position(a).coords + self.position(b).coords) * 0.5)
    }

    /// Straight-line (chord) length of an edge.
    pub fn edge_length(&self, e: EdgeId) -> f64 {
        let [a, b] = self.edge(e).vertices();
        (self.position(b) - self.position(a)).norm()
    }

    /// Great-circle length of an edge.
    ///
    /// The arc is taken on the sphere about the origin whose radius is the
    /// mean distance of the two endpoints from the origin.
    pub fn edge_arc_length(&self, e: EdgeId) -> f64 {
        let [a, b] = self.edge(e).vertices();
        let pa = self.position(a).coords;
        let pb = self.position(b).coords;
        let radius = 0.5 * (pa.norm() + pb.norm());
        let angle = pa.cross(&pb).norm().atan2(pa.dot(&pb));
        radius * angle
    }

    /// Vector from `v` to its neighbour across `e`.
    pub fn edge_vector(&self, e: EdgeId, v: VertexId) -> Vector3<f64> {
        self.position(self.neighbour_across(e, v)) - self.position(v)
    }

    /// Arithmetic mean of a face's vertex positions.
    ///
    /// Not projected onto the sphere.
    pub fn face_center(&self, f: FaceId) -> Point3<f64> {
        let face = self.face(f);
        let sum: Vector3<f64> = face
            .vertices()
            .iter()
            .map(|&v| self.position(v).coords)
            .sum();
        Point3::from(sum / face.len() as f64)
    }

    /// Planar area of a face, by fan triangulation from its first vertex.
    pub fn face_area(&self, f: FaceId) -> f64 {
        let vertices = self.face(f).vertices();
        let p0 = self.position(vertices[0]);
        vertices[1..]
            .windows(2)
            .map(|w| {
                let e1 = self.position(w[0]) - p0;
                let e2 = self.position(w[1]) - p0;
                0.5 * e1.cross(&e2).norm()
            })
            .sum()
    }

    /// Total planar surface area.
    pub fn surface_area(&self) -> f64 {
        self.face_ids().map(|f| self.face_area(f)).sum()
    }

    /// V - E + F; 2 for anything topologically a sphere.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    /// Convert back to positions and face index lists.
    pub fn to_face_vertex(&self) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
        let positions = self.vertices.iter().map(|v| v.position).collect();
        let faces = self
            .faces
            .iter()
            .map(|f| f.vertices().iter().map(|v| v.index()).collect())
            .collect();
        (positions, faces)
    }

    // ==================== Validation ====================

    /// Check that all adjacency tables agree with each other.
    pub fn is_valid(&self) -> bool {
        // Rings around vertices
        for v in self.vertex_ids() {
            let edges = self.edges_of_vertex(v);
            let faces = self.faces_of_vertex(v);
            if edges.len() != faces.len() || edges.is_empty() {
                return false;
            }
            if edges.iter().any(|&e| !self.edge(e).contains(v)) {
                return false;
            }
            for (i, &f) in faces.iter().enumerate() {
                let face = self.face(f);
                let across = self.neighbour_across(edges[i], v);
                let before = self.neighbour_across(*edges.at_cyclic(i as isize - 1), v);
                if !face.contains(v) || !face.contains(across) || !face.contains(before) {
                    return false;
                }
            }
        }

        // Face boundaries
        for (f, face) in self.faces() {
            let edges = self.edges_of_face(f);
            if edges.len() != face.len() {
                return false;
            }
            for ((a, b), &e) in face.boundary().zip(edges) {
                if *self.edge(e) != Edge::new(a, b) || !self.faces_of_edge(e).contains(&f) {
                    return false;
                }
            }
        }

        // Edge lookup
        self.edge_ids()
            .all(|e| self.edge_lookup.get(self.edge(e)) == Some(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Octahedron on the unit sphere, outward winding.
    fn octahedron() -> Polyhedron {
        let positions = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ];
        let faces = vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];
        Polyhedron::from_faces(&positions, &faces).unwrap()
    }

    #[test]
    fn test_octahedron_counts() {
        let mesh = octahedron();
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_edges(), 12);
        assert_eq!(mesh.num_faces(), 8);
        assert_eq!(mesh.euler_characteristic(), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_round_trip_indices() {
        let mesh = octahedron();
        for (v, vertex) in mesh.vertices() {
            assert_eq!(mesh.vertex(VertexId::new(mesh.vertex_index(v))), vertex);
        }
        for e in mesh.edge_ids() {
            assert_eq!(mesh.edge(EdgeId::new(mesh.edge_index(e))), mesh.edge(e));
            let [a, b] = mesh.edge(e).vertices();
            assert_eq!(mesh.edge_between(a, b), Some(e));
            assert_eq!(mesh.edge_between(b, a), Some(e));
        }
        for (f, face) in mesh.faces() {
            assert_eq!(mesh.face(FaceId::new(mesh.face_index(f))), face);
        }
    }

    #[test]
    fn test_edge_between_missing() {
        let mesh = octahedron();
        // +x and -x are opposite poles
        assert_eq!(mesh.edge_between(VertexId::new(0), VertexId::new(1)), None);
        assert_eq!(mesh.edge_between(VertexId::new(0), VertexId::new(0)), None);
    }

    #[test]
    fn test_neighbours_are_anticlockwise() {
        let mesh = octahedron();
        for v in mesh.vertex_ids() {
            let p = mesh.position(v).coords;
            let ring: Vec<Vector3<f64>> = mesh
                .neighbours_of(v)
                .map(|n| mesh.position(n) - mesh.position(v))
                .collect();
            assert_eq!(ring.len(), 4);
            for i in 0..ring.len() {
                let turn = ring[i].cross(&ring[(i + 1) % ring.len()]);
                assert!(turn.dot(&p) > 0.0, "ring around {:?} is not anticlockwise", v);
            }
        }
    }

    #[test]
    fn test_faces_align_with_edges() {
        let mesh = octahedron();
        for v in mesh.vertex_ids() {
            let edges = mesh.edges_of_vertex(v);
            for (i, &f) in mesh.faces_of_vertex(v).iter().enumerate() {
                let face = mesh.face(f);
                assert!(face.contains(mesh.neighbour_across(edges[i], v)));
                assert!(face.contains(mesh.neighbour_across(*edges.at_cyclic(i as isize - 1), v)));
            }
        }
    }

    #[test]
    fn test_geometry() {
        let mesh = octahedron();
        let e = mesh
            .edge_between(VertexId::new(0), VertexId::new(2))
            .unwrap();

        let mid = mesh.bisection_point(e);
        assert!((mid - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-12);
        assert!((mesh.edge_length(e) - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((mesh.edge_arc_length(e) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let center = mesh.face_center(FaceId::new(0));
        assert!((center - Point3::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)).norm() < 1e-12);

        // Eight equilateral faces with side sqrt(2)
        let expected = 8.0 * 3.0_f64.sqrt() / 4.0 * 2.0;
        assert!((mesh.surface_area() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_to_face_vertex_round_trip() {
        let mesh = octahedron();
        let (positions, faces) = mesh.to_face_vertex();
        let rebuilt = Polyhedron::from_faces(&positions, &faces).unwrap();

        assert_eq!(rebuilt.num_vertices(), mesh.num_vertices());
        assert_eq!(rebuilt.num_edges(), mesh.num_edges());
        for v in mesh.vertex_ids() {
            assert_eq!(rebuilt.position(v), mesh.position(v));
            assert_eq!(rebuilt.edges_of_vertex(v), mesh.edges_of_vertex(v));
        }
    }
}
