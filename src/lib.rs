//! # Icosasphere
//!
//! Spherical polyhedral meshes with precomputed adjacency, for finite-volume
//! solvers that step over the cells of a sphere.
//!
//! The crate builds a closed polygonal mesh from an unordered list of faces,
//! orders every vertex's edges and faces anticlockwise, refines icosahedra
//! into icosaspheres of any resolution, and flattens the result into dense
//! per-vertex tables.
//!
//! ## Features
//!
//! - **Polyhedron**: arena storage with typed, dense handles and O(1) adjacency lookups
//! - **Topology builder**: validates and orders arbitrary closed face lists
//! - **Subdivision**: 1-to-4 midpoint splitting with projection onto the unit sphere
//! - **Vertex tables**: neighbours, edge normals, lengths, faces and cell areas as flat arrays
//!
//! ## Quick Start
//!
//! ```
//! use icosasphere::prelude::*;
//!
//! // Smallest icosasphere with at least 100 vertices
//! let sphere = build_icosasphere(100).unwrap();
//! assert_eq!(sphere.num_vertices(), 162);
//!
//! // Walk the neighbours of a vertex, anticlockwise
//! let v = VertexId::new(0);
//! for neighbour in sphere.neighbours_of(v) {
//!     println!("Neighbour: {:?}", neighbour);
//! }
//!
//! // Flatten for a solver
//! let tables = VertexTables::build(&sphere, &TableOptions::default());
//! assert_eq!(tables.neighbours[0].len(), 5);
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use icosasphere::prelude::*;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//! ];
//!
//! // Anticlockwise seen from outside
//! let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
//!
//! let mesh = Polyhedron::from_faces(&positions, &faces).unwrap();
//! assert_eq!(mesh.num_edges(), 6);
//!
//! let sphere = subdivide(&mesh).unwrap();
//! assert_eq!(sphere.num_vertices(), 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;
pub mod tables;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use icosasphere::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::icosasphere::{build_icosasphere, icosahedron, IcosasphereFactory};
    pub use crate::algo::subdivide::{subdivide, subdivide_rounds, SubdivideOptions};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_polyhedron, Edge, EdgeId, Face, FaceId, Polyhedron, Vertex, VertexId,
    };
    pub use crate::tables::{TableOptions, VertexTable, VertexTables};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_sphere_to_tables() {
        let sphere = build_icosasphere(13).unwrap();

        assert_eq!(sphere.num_vertices(), 42);
        assert_eq!(sphere.num_edges(), 120);
        assert_eq!(sphere.num_faces(), 80);
        assert_eq!(sphere.euler_characteristic(), 2);
        assert!(sphere.is_valid());

        let tables = VertexTables::build(&sphere, &TableOptions::default());
        let degrees: Vec<usize> = tables.neighbours.row_lengths().collect();
        assert_eq!(degrees.iter().filter(|&&d| d == 5).count(), 12);
        assert_eq!(degrees.iter().filter(|&&d| d == 6).count(), 30);
    }
}
