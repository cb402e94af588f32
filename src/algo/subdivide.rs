//! Midpoint subdivision onto the unit sphere.
//!
//! Each round splits every triangle into four: one new vertex at the midpoint
//! of every edge, a corner triangle at each original vertex, and a central
//! triangle joining the three midpoints. The new face list goes back through
//! the topology builder, and every vertex is then pushed out to unit distance
//! from the origin.
//!
//! Subdivision never modifies its input; each round returns a new
//! [`Polyhedron`] with its own vertices, edges and faces.
//!
//! # Example
//!
//! ```
//! use icosasphere::algo::icosasphere::icosahedron;
//! use icosasphere::algo::subdivide::{subdivide_rounds, SubdivideOptions};
//!
//! let base = icosahedron().unwrap();
//! let sphere = subdivide_rounds(&base, &SubdivideOptions::new(2)).unwrap();
//!
//! assert_eq!(sphere.num_vertices(), 162);
//! assert_eq!(sphere.num_faces(), 320);
//! ```

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_polyhedron, EdgeId, Polyhedron};

/// Positions shorter than this cannot be projected onto the sphere.
const MIN_PROJECTION_LENGTH: f64 = 1e-12;

/// Options for repeated subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Number of subdivision rounds.
    pub rounds: usize,

    /// Whether to project vertices onto the unit sphere after each round.
    /// If false, new vertices stay at the flat edge midpoints.
    pub project: bool,
}

impl SubdivideOptions {
    /// Create options with the specified number of rounds.
    pub fn new(rounds: usize) -> Self {
        Self {
            rounds,
            project: true,
        }
    }

    /// Set whether to project onto the unit sphere after each round.
    pub fn with_projection(mut self, project: bool) -> Self {
        self.project = project;
        self
    }
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Vertex, edge and face counts of a closed triangle mesh.
///
/// [`SubdivisionCounts::next`] predicts the counts after one round without
/// building anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubdivisionCounts {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges.
    pub edges: usize,
    /// Number of faces.
    pub faces: usize,
}

impl SubdivisionCounts {
    /// Counts of the regular icosahedron.
    pub const ICOSAHEDRON: Self = Self {
        vertices: 12,
        edges: 30,
        faces: 20,
    };

    /// Counts of an existing mesh.
    pub fn of(mesh: &Polyhedron) -> Self {
        Self {
            vertices: mesh.num_vertices(),
            edges: mesh.num_edges(),
            faces: mesh.num_faces(),
        }
    }

    /// Counts after one more round, or `None` on overflow.
    ///
    /// Every edge gains a vertex, splits in two and every face adds three
    /// interior edges and becomes four faces.
    pub fn next(self) -> Option<Self> {
        Some(Self {
            vertices: self.vertices.checked_add(self.edges)?,
            edges: self
                .edges
                .checked_mul(2)?
                .checked_add(self.faces.checked_mul(3)?)?,
            faces: self.faces.checked_mul(4)?,
        })
    }
}

/// Perform one round of subdivision and project onto the unit sphere.
pub fn subdivide(mesh: &Polyhedron) -> Result<Polyhedron> {
    subdivide_once(mesh, true)
}

/// Perform several rounds of subdivision.
///
/// With zero rounds the input is returned unchanged (as a clone).
pub fn subdivide_rounds(mesh: &Polyhedron, options: &SubdivideOptions) -> Result<Polyhedron> {
    let mut current = mesh.clone();
    for round in 0..options.rounds {
        current = subdivide_once(&current, options.project)?;
        log::debug!(
            "subdivision round {}/{}: {} vertices, {} edges, {} faces",
            round + 1,
            options.rounds,
            current.num_vertices(),
            current.num_edges(),
            current.num_faces()
        );
    }
    Ok(current)
}

fn subdivide_once(mesh: &Polyhedron, project: bool) -> Result<Polyhedron> {
    let (positions, faces) = split_faces(mesh)?;
    let split = build_polyhedron(&positions, &faces)?;
    if project {
        project_onto_sphere(&split)
    } else {
        Ok(split)
    }
}

/// Split every triangle into four, without rebuilding topology.
///
/// Returns the new positions (original vertices first, then one midpoint per
/// edge in edge order) and the new triangles, wound like their parents.
pub fn split_faces(mesh: &Polyhedron) -> Result<(Vec<Point3<f64>>, Vec<[usize; 3]>)> {
    let num_original = mesh.num_vertices();

    let mut positions: Vec<Point3<f64>> = Vec::with_capacity(num_original + mesh.num_edges());
    positions.extend(mesh.vertex_ids().map(|v| *mesh.position(v)));
    positions.extend(mesh.edge_ids().map(|e| mesh.bisection_point(e)));

    let midpoint = |e: EdgeId| num_original + e.index();

    let mut faces: Vec<[usize; 3]> = Vec::with_capacity(mesh.num_faces() * 4);
    for (f, face) in mesh.faces() {
        let (v0, v1, v2) = match face.vertices() {
            [v0, v1, v2] => (v0.index(), v1.index(), v2.index()),
            other => {
                return Err(MeshError::NotTriangular {
                    face: f.index(),
                    len: other.len(),
                })
            }
        };

        // Edge i joins face vertices i and i + 1
        let edges = mesh.edges_of_face(f);
        let m01 = midpoint(edges[0]);
        let m12 = midpoint(edges[1]);
        let m20 = midpoint(edges[2]);

        faces.push([v0, m01, m20]);
        faces.push([v1, m12, m01]);
        faces.push([v2, m20, m12]);
        faces.push([m01, m12, m20]);
    }

    Ok((positions, faces))
}

/// Move every vertex to unit distance from the origin, keeping its direction.
///
/// Builds a new polyhedron over the same faces.
pub fn project_onto_sphere(mesh: &Polyhedron) -> Result<Polyhedron> {
    let positions = mesh
        .vertices()
        .map(|(v, vertex)| {
            vertex
                .position
                .coords
                .try_normalize(MIN_PROJECTION_LENGTH)
                .map(Point3::from)
                .ok_or(MeshError::DegeneratePosition { vertex: v.index() })
        })
        .collect::<Result<Vec<_>>>()?;

    let (_, faces) = mesh.to_face_vertex();
    build_polyhedron(&positions, &faces)
}
