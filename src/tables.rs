//! Dense per-vertex lookup tables.
//!
//! A finished [`Polyhedron`] answers adjacency queries through its own
//! tables, but a solver stepping over every vertex wants flat arrays it can
//! index without touching the mesh. This module flattens the mesh into
//! [`VertexTable`]s: one row per vertex, addressed by the vertex's dense
//! index, with one entry per incident edge (or face) in the vertex's
//! anticlockwise order.
//!
//! The builders assume a mesh produced by the topology builder or the
//! subdivision engine. They do not revalidate it.
//!
//! # Example
//!
//! ```
//! use icosasphere::algo::icosasphere::build_icosasphere;
//! use icosasphere::tables::{TableOptions, VertexTables};
//!
//! let sphere = build_icosasphere(642).unwrap();
//! let tables = VertexTables::build(&sphere, &TableOptions::default());
//!
//! assert_eq!(tables.neighbours.len(), 642);
//! assert_eq!(tables.neighbours[0].len(), 5);
//! assert_eq!(tables.neighbours[12].len(), 6);
//!
//! let total: f64 = tables.areas.iter().sum();
//! assert!((total - 4.0 * std::f64::consts::PI).abs() < 0.1);
//! ```
//!
//! # Cell areas
//!
//! Each vertex is assigned the part of every incident face that lies closer
//! to it: the quadrilateral bounded by the midpoints of its two edges in
//! that face and the face center. The same formula is used for every
//! degree, so the twelve degree-five vertices of an icosasphere get cells
//! built the same way as the degree-six ones.

use std::ops::Index;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::mesh::{prev_cyclic, Polyhedron, VertexId};

/// Vectors shorter than this are not normalised.
const MIN_NORMAL_LENGTH: f64 = 1e-12;

/// Options controlling table construction.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// Whether to compute rows in parallel (default: false).
    pub parallel: bool,
}

impl TableOptions {
    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// A jagged table with one row per vertex.
///
/// Rows are stored back to back in a single buffer; `offsets[i]..offsets[i + 1]`
/// is the range of row `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexTable<T> {
    /// Row start positions. Length is `rows + 1`, with the last entry equal to
    /// `values.len()`.
    offsets: Vec<usize>,
    values: Vec<T>,
}

impl<T> VertexTable<T> {
    /// Build a table from its rows, in order.
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut offsets = vec![0];
        let mut values = Vec::new();
        for row in rows {
            values.extend(row);
            offsets.push(values.len());
        }
        Self { offsets, values }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Check if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.values[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.offsets
            .windows(2)
            .map(move |w| &self.values[w[0]..w[1]])
    }

    /// Length of every row.
    pub fn row_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets.windows(2).map(|w| w[1] - w[0])
    }

    /// All entries, row after row.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Index<usize> for VertexTable<T> {
    type Output = [T];

    fn index(&self, i: usize) -> &[T] {
        self.row(i)
    }
}

/// Every table the solver needs, built in one go.
#[derive(Debug, Clone)]
pub struct VertexTables {
    /// Neighbour indices, anticlockwise.
    pub neighbours: VertexTable<usize>,
    /// Unit normals of the planes through the origin and each incident edge.
    pub edge_normals: VertexTable<Vector3<f64>>,
    /// Distance from each neighbour to the midpoint of the shared edge.
    pub half_edge_lengths: VertexTable<f64>,
    /// Arc length of each incident edge.
    pub distances: VertexTable<f64>,
    /// Incident face indices, aligned with the edges.
    pub faces: VertexTable<usize>,
    /// Unit outward normal at each vertex.
    pub normals: Vec<Vector3<f64>>,
    /// Share of each incident face assigned to the vertex's cell.
    pub area_in_each_face: VertexTable<f64>,
    /// Total cell area of each vertex.
    pub areas: Vec<f64>,
}

impl VertexTables {
    /// Build all tables for a mesh.
    pub fn build(mesh: &Polyhedron, options: &TableOptions) -> Self {
        let area_in_each_face = area_in_each_face(mesh, options);
        let areas = area_in_each_face.iter().map(|row| row.iter().sum()).collect();

        let tables = Self {
            neighbours: neighbours(mesh, options),
            edge_normals: edge_normals(mesh, options),
            half_edge_lengths: half_edge_lengths(mesh, options),
            distances: distances(mesh, options),
            faces: faces(mesh, options),
            normals: normals(mesh, options),
            area_in_each_face,
            areas,
        };

        log::debug!(
            "built vertex tables for {} vertices ({} neighbour entries, parallel: {})",
            tables.neighbours.len(),
            tables.neighbours.values().len(),
            options.parallel
        );

        tables
    }

    /// Number of vertices the tables describe.
    pub fn num_vertices(&self) -> usize {
        self.neighbours.len()
    }
}

/// Map every vertex through `f`, in parallel if requested.
fn per_vertex<T, F>(mesh: &Polyhedron, options: &TableOptions, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(VertexId) -> T + Sync + Send,
{
    let num_vertices = mesh.num_vertices();
    if options.parallel {
        (0..num_vertices)
            .into_par_iter()
            .map(|i| f(VertexId::new(i)))
            .collect()
    } else {
        (0..num_vertices).map(|i| f(VertexId::new(i))).collect()
    }
}

/// Neighbour indices of every vertex, anticlockwise.
pub fn neighbours(mesh: &Polyhedron, options: &TableOptions) -> VertexTable<usize> {
    let rows = per_vertex(mesh, options, |v| {
        mesh.neighbours_of(v)
            .map(|n| mesh.vertex_index(n))
            .collect::<Vec<_>>()
    });
    VertexTable::from_rows(rows)
}

/// Unit normal of each incident edge's great-circle plane.
///
/// For vertex `v` and neighbour `n` this is `normalize(p_v × (p_n - p_v))`:
/// orthogonal to both the vertex position and the edge, pointing to the
/// left of the edge as seen from outside.
pub fn edge_normals(mesh: &Polyhedron, options: &TableOptions) -> VertexTable<Vector3<f64>> {
    let rows = per_vertex(mesh, options, |v| {
        let p = mesh.position(v).coords;
        mesh.edges_of_vertex(v)
            .iter()
            .map(|&e| {
                p.cross(&mesh.edge_vector(e, v))
                    .try_normalize(MIN_NORMAL_LENGTH)
                    .unwrap_or_else(Vector3::zeros)
            })
            .collect::<Vec<_>>()
    });
    VertexTable::from_rows(rows)
}

/// Distance from each neighbour to the bisection point of the shared edge.
///
/// This is a planar distance measured from the neighbour, not from the
/// vertex itself, and is half the chord length. Use [`distances`] for arc
/// lengths.
pub fn half_edge_lengths(mesh: &Polyhedron, options: &TableOptions) -> VertexTable<f64> {
    let rows = per_vertex(mesh, options, |v| {
        mesh.edges_of_vertex(v)
            .iter()
            .map(|&e| {
                let neighbour = mesh.position(mesh.neighbour_across(e, v));
                (neighbour - mesh.bisection_point(e)).norm()
            })
            .collect::<Vec<_>>()
    });
    VertexTable::from_rows(rows)
}

/// Great-circle length of each incident edge.
pub fn distances(mesh: &Polyhedron, options: &TableOptions) -> VertexTable<f64> {
    let rows = per_vertex(mesh, options, |v| {
        mesh.edges_of_vertex(v)
            .iter()
            .map(|&e| mesh.edge_arc_length(e))
            .collect::<Vec<_>>()
    });
    VertexTable::from_rows(rows)
}

/// Face indices around every vertex; face `k` lies between edges `k - 1`
/// and `k`.
pub fn faces(mesh: &Polyhedron, options: &TableOptions) -> VertexTable<usize> {
    let rows = per_vertex(mesh, options, |v| {
        mesh.faces_of_vertex(v)
            .iter()
            .map(|&f| mesh.face_index(f))
            .collect::<Vec<_>>()
    });
    VertexTable::from_rows(rows)
}

/// Unit outward normal at every vertex.
///
/// On a sphere about the origin this is the normalised position.
pub fn normals(mesh: &Polyhedron, options: &TableOptions) -> Vec<Vector3<f64>> {
    per_vertex(mesh, options, |v| {
        mesh.position(v)
            .coords
            .try_normalize(MIN_NORMAL_LENGTH)
            .unwrap_or_else(Vector3::zeros)
    })
}

/// Part of each incident face belonging to the vertex's cell.
///
/// For face `k` the cell covers the triangles
/// (midpoint of edge `k - 1`, v, face center) and
/// (face center, v, midpoint of edge `k`). Each triangle's area is half its
/// cross product projected onto the unit face-center direction, so it is
/// signed: positive when the triangle winds anticlockwise seen from outside.
pub fn area_in_each_face(mesh: &Polyhedron, options: &TableOptions) -> VertexTable<f64> {
    let rows = per_vertex(mesh, options, |v| {
        let p = mesh.position(v);
        let edges = mesh.edges_of_vertex(v);
        mesh.faces_of_vertex(v)
            .iter()
            .enumerate()
            .map(|(k, &f)| {
                let center = mesh.face_center(f);
                let direction = center
                    .coords
                    .try_normalize(MIN_NORMAL_LENGTH)
                    .unwrap_or_else(Vector3::zeros);

                let before = mesh.bisection_point(edges[prev_cyclic(k, edges.len())]) - p;
                let after = mesh.bisection_point(edges[k]) - p;
                let to_center = center - p;

                0.5 * before.cross(&to_center).dot(&direction)
                    + 0.5 * to_center.cross(&after).dot(&direction)
            })
            .collect::<Vec<_>>()
    });
    VertexTable::from_rows(rows)
}

/// Total cell area of every vertex.
pub fn areas(mesh: &Polyhedron, options: &TableOptions) -> Vec<f64> {
    area_in_each_face(mesh, options)
        .iter()
        .map(|row| row.iter().sum())
        .collect()
}
