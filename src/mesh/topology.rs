//! Mesh topology construction.
//!
//! Builds a [`Polyhedron`] from a face-vertex list: the unique vertex and edge
//! sets, then the four adjacency tables, each ordered so that walking a
//! vertex's edges and faces goes anticlockwise around it. Input is validated
//! up front and every later stage checks the closed-manifold precondition it
//! relies on, so a malformed mesh fails with an error instead of producing a
//! half-built structure.
//!
//! The individual stages are public so they can be inspected and tested on
//! their own; [`build_polyhedron`] runs them in order.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use nalgebra::{Point3, Vector3};

use super::angular::AnticlockwiseOrder;
use super::cyclic::prev_cyclic;
use super::index::{EdgeId, FaceId, VertexId};
use super::polyhedron::Polyhedron;
use super::primitives::{Edge, Face, Vertex};
use crate::error::{MeshError, Result};

/// Positions closer to the origin than this cannot serve as a sort axis.
const MIN_AXIS_LENGTH: f64 = 1e-12;

/// Build a polyhedron from vertex positions and polygonal faces.
///
/// Each face lists vertex indices into `positions`, anticlockwise when seen
/// from outside. Faces may have any length of three or more. The faces must
/// form a closed, consistently oriented 2-manifold that is star-shaped about
/// the origin (every vertex sees its neighbours anticlockwise about its own
/// position vector).
///
/// Positions not referenced by any face are dropped; the remaining vertices
/// keep their relative order, so a fully referenced position list maps
/// index `i` to `VertexId::new(i)`.
///
/// # Example
/// ```
/// use icosasphere::mesh::build_polyhedron;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(1.0, 1.0, 1.0),
///     Point3::new(1.0, -1.0, -1.0),
///     Point3::new(-1.0, 1.0, -1.0),
///     Point3::new(-1.0, -1.0, 1.0),
/// ];
/// let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
///
/// let mesh = build_polyhedron(&positions, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 4);
/// assert_eq!(mesh.num_edges(), 6);
/// assert_eq!(mesh.num_faces(), 4);
/// ```
pub fn build_polyhedron<F: AsRef<[usize]>>(
    positions: &[Point3<f64>],
    faces: &[F],
) -> Result<Polyhedron> {
    validate_faces(positions.len(), faces)?;

    let (vertices, remap) = self::vertices(positions, faces);
    let faces = self::faces(faces, &remap)?;
    let edges = self::edges(&faces);

    let vertex_edges = vertex_to_edges(&vertices, &edges)?;
    let face_edges = face_to_edges(&faces, &vertex_edges)?;
    let edge_faces = edge_to_faces(&edges, faces.len(), &face_edges)?;
    let vertex_faces = vertex_to_faces(&edges, &faces, &vertex_edges)?;

    let edge_lookup = index_map(&edges)
        .into_iter()
        .map(|(edge, i)| (edge, EdgeId::new(i)))
        .collect();

    log::debug!(
        "built polyhedron: {} vertices, {} edges, {} faces",
        vertices.len(),
        edges.len(),
        faces.len()
    );

    Ok(Polyhedron {
        vertices,
        edges,
        faces,
        vertex_edges,
        vertex_faces,
        face_edges,
        edge_faces,
        edge_lookup,
    })
}

/// Check face sizes, vertex indices and winding consistency.
pub fn validate_faces<F: AsRef<[usize]>>(num_positions: usize, faces: &[F]) -> Result<()> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mut directed: HashSet<(usize, usize)> = HashSet::new();
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(MeshError::DegenerateFace { face: fi });
        }
        for &vi in face {
            if vi >= num_positions {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        let distinct: HashSet<usize> = face.iter().copied().collect();
        if distinct.len() != face.len() {
            return Err(MeshError::DegenerateFace { face: fi });
        }

        // Two faces traversing the same directed edge disagree on orientation
        for (&v0, &v1) in face.iter().zip(face.iter().cycle().skip(1)) {
            if !directed.insert((v0, v1)) {
                return Err(MeshError::InconsistentOrientation { v0, v1 });
            }
        }
    }

    Ok(())
}

/// Collect the vertices referenced by any face, keeping their input order.
///
/// Returns the vertices and, for every input position, the handle it was
/// given (`None` if no face references it). Face indices outside
/// `positions` are ignored here; [`faces`] reports them.
pub fn vertices<F: AsRef<[usize]>>(
    positions: &[Point3<f64>],
    faces: &[F],
) -> (Vec<Vertex>, Vec<Option<VertexId>>) {
    let mut referenced = vec![false; positions.len()];
    for &vi in faces.iter().flat_map(|face| face.as_ref()) {
        if let Some(slot) = referenced.get_mut(vi) {
            *slot = true;
        }
    }

    let mut remap: Vec<Option<VertexId>> = vec![None; positions.len()];
    let mut vertices = Vec::with_capacity(positions.len());
    for (vi, position) in positions.iter().enumerate() {
        if referenced[vi] {
            remap[vi] = Some(VertexId::new(vertices.len()));
            vertices.push(Vertex::new(*position));
        }
    }

    (vertices, remap)
}

/// Convert index-list faces to faces over vertex handles.
pub fn faces<F: AsRef<[usize]>>(faces: &[F], remap: &[Option<VertexId>]) -> Result<Vec<Face>> {
    faces
        .iter()
        .enumerate()
        .map(|(fi, face)| {
            face.as_ref()
                .iter()
                .map(|&vi| {
                    remap
                        .get(vi)
                        .copied()
                        .flatten()
                        .ok_or(MeshError::InvalidVertexIndex { face: fi, vertex: vi })
                })
                .collect::<Result<Vec<_>>>()
                .map(Face::new)
        })
        .collect()
}

/// The boundary edges of all faces, each shared edge listed once, in order of
/// first appearance.
pub fn edges(faces: &[Face]) -> Vec<Edge> {
    let mut seen: HashSet<Edge> = HashSet::new();
    let mut edges = Vec::new();

    for face in faces {
        for (a, b) in face.boundary() {
            let edge = Edge::new(a, b);
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }

    edges
}

/// The edges around each vertex, sorted anticlockwise about the vertex.
///
/// Edges are ordered by the direction of their midpoint as seen from the
/// vertex, using the vertex position as the axis.
pub fn vertex_to_edges(vertices: &[Vertex], edges: &[Edge]) -> Result<Vec<Vec<EdgeId>>> {
    let mut vertex_edges: Vec<Vec<EdgeId>> = vec![Vec::new(); vertices.len()];
    for (ei, edge) in edges.iter().enumerate() {
        for v in edge.vertices() {
            vertex_edges[v.index()].push(EdgeId::new(ei));
        }
    }

    for (vi, ring) in vertex_edges.iter_mut().enumerate() {
        let p = vertices[vi].position.coords;
        if !p.iter().all(|c| c.is_finite()) || p.norm() <= MIN_AXIS_LENGTH {
            return Err(MeshError::DegeneratePosition { vertex: vi });
        }

        let order = AnticlockwiseOrder::new(p, -p);
        order.sort_by_direction(ring, |&e| midpoint(vertices, &edges[e.index()]) - p);
    }

    Ok(vertex_edges)
}

/// The faces around each vertex, aligned with its edge ring.
///
/// Slot `i` holds the face between edge `i - 1` and edge `i`: the one face
/// containing the vertex and both neighbours across those edges.
pub fn vertex_to_faces(
    edges: &[Edge],
    faces: &[Face],
    vertex_edges: &[Vec<EdgeId>],
) -> Result<Vec<Vec<FaceId>>> {
    let mut incident: Vec<Vec<FaceId>> = vec![Vec::new(); vertex_edges.len()];
    for (fi, face) in faces.iter().enumerate() {
        for &v in face.vertices() {
            incident[v.index()].push(FaceId::new(fi));
        }
    }

    vertex_edges
        .iter()
        .enumerate()
        .map(|(vi, ring)| {
            let v = VertexId::new(vi);
            (0..ring.len())
                .map(|i| {
                    let across = edges[ring[i].index()].opposite(v);
                    let before = edges[ring[prev_cyclic(i, ring.len())].index()].opposite(v);

                    let matching: Vec<FaceId> = incident[vi]
                        .iter()
                        .copied()
                        .filter(|f| {
                            let face = &faces[f.index()];
                            face.contains(across) && face.contains(before)
                        })
                        .collect();

                    match matching.as_slice() {
                        [face] => Ok(*face),
                        _ => Err(MeshError::UnalignedFaces {
                            vertex: vi,
                            matches: matching.len(),
                        }),
                    }
                })
                .collect()
        })
        .collect()
}

/// The edges of each face, aligned with its boundary vertex pairs.
///
/// Edge `i` joins face vertices `i` and `i + 1`; the last edge closes the
/// cycle. Each edge is found by intersecting its endpoints' edge rings.
///
/// With rings from [`vertex_to_edges`] over de-duplicated [`edges`] the
/// intersection is always exactly one edge. Rings from anywhere else that
/// miss or repeat an edge fail with [`MeshError::AmbiguousEdge`].
pub fn face_to_edges(faces: &[Face], vertex_edges: &[Vec<EdgeId>]) -> Result<Vec<Vec<EdgeId>>> {
    faces
        .iter()
        .map(|face| {
            face.boundary()
                .map(|(a, b)| {
                    let ring_b = &vertex_edges[b.index()];
                    let shared: Vec<EdgeId> = vertex_edges[a.index()]
                        .iter()
                        .copied()
                        .filter(|e| ring_b.contains(e))
                        .collect();

                    match shared.as_slice() {
                        [edge] => Ok(*edge),
                        _ => Err(MeshError::AmbiguousEdge {
                            v0: a.index(),
                            v1: b.index(),
                            matches: shared.len(),
                        }),
                    }
                })
                .collect()
        })
        .collect()
}

/// The two faces on either side of each edge.
///
/// Fails if any edge does not have exactly two faces.
pub fn edge_to_faces(
    edges: &[Edge],
    num_faces: usize,
    face_edges: &[Vec<EdgeId>],
) -> Result<Vec<[FaceId; 2]>> {
    debug_assert_eq!(num_faces, face_edges.len());

    let mut edge_faces: Vec<Vec<FaceId>> = vec![Vec::with_capacity(2); edges.len()];
    for (fi, ring) in face_edges.iter().enumerate() {
        for e in ring {
            edge_faces[e.index()].push(FaceId::new(fi));
        }
    }

    edge_faces
        .into_iter()
        .zip(edges)
        .map(|(faces, edge)| match faces.as_slice() {
            [f0, f1] => Ok([*f0, *f1]),
            _ => Err(MeshError::NonManifoldEdge {
                v0: edge.a().index(),
                v1: edge.b().index(),
                faces: faces.len(),
            }),
        })
        .collect()
}

/// Map each item to its position in `items`.
///
/// Later duplicates overwrite earlier ones, so items should be unique.
pub fn index_map<T: Hash + Eq + Clone>(items: &[T]) -> HashMap<T, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.clone(), i))
        .collect()
}

fn midpoint(vertices: &[Vertex], edge: &Edge) -> Vector3<f64> {
    let [a, b] = edge.vertices();
    (vertices[a.index()].position.coords + vertices[b.index()].position.coords) * 0.5
}
