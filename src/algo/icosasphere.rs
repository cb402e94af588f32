//! Icosahedron-based sphere meshes.
//!
//! An icosasphere starts from the regular icosahedron inscribed in the unit
//! sphere and is refined by midpoint subdivision until it has enough
//! vertices. The number of rounds is worked out in advance from the
//! closed-form growth of the vertex, edge and face counts, so no intermediate
//! mesh is built just to measure it.
//!
//! Vertex handles are stable across rounds: the twelve icosahedron vertices
//! are always `VertexId` 0 to 11 and keep degree five; every other vertex has
//! degree six.
//!
//! # Example
//!
//! ```
//! use icosasphere::algo::icosasphere::build_icosasphere;
//!
//! let sphere = build_icosasphere(100).unwrap();
//! assert_eq!(sphere.num_vertices(), 162);
//! ```

use nalgebra::Point3;

use super::subdivide::{subdivide_rounds, SubdivideOptions, SubdivisionCounts};
use crate::error::{MeshError, Result};
use crate::mesh::{build_polyhedron, Polyhedron};

/// Faces of the regular icosahedron, anticlockwise seen from outside.
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    // around vertex 0
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    // adjacent band
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    // around vertex 3
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    // adjacent band
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Vertex positions of the regular icosahedron on the unit sphere.
///
/// These are the cyclic permutations of `(0, ±1, ±φ)`, normalised.
pub fn icosahedron_positions() -> Vec<Point3<f64>> {
    let phi = (1.0 + 5.0_f64.sqrt()) * 0.5;
    let raw = [
        [-1.0, phi, 0.0],
        [1.0, phi, 0.0],
        [-1.0, -phi, 0.0],
        [1.0, -phi, 0.0],
        [0.0, -1.0, phi],
        [0.0, 1.0, phi],
        [0.0, -1.0, -phi],
        [0.0, 1.0, -phi],
        [phi, 0.0, -1.0],
        [phi, 0.0, 1.0],
        [-phi, 0.0, -1.0],
        [-phi, 0.0, 1.0],
    ];
    let scale = 1.0 / (1.0 + phi * phi).sqrt();
    raw.iter()
        .map(|&[x, y, z]| Point3::new(x * scale, y * scale, z * scale))
        .collect()
}

/// The regular icosahedron inscribed in the unit sphere: 12 vertices, 30
/// edges, 20 faces.
pub fn icosahedron() -> Result<Polyhedron> {
    build_polyhedron(&icosahedron_positions(), &ICOSAHEDRON_FACES)
}

/// Number of subdivision rounds needed for at least `min_vertices` vertices.
///
/// Starts from the icosahedron's (12, 30, 20) and applies
/// `V += E; E = 2E + 3F; F = 4F` until `V >= min_vertices`.
///
/// # Errors
/// Returns [`MeshError::InvalidParameter`] if `min_vertices` is zero or so
/// large that the counts would overflow.
pub fn subdivisions_for_vertex_count(min_vertices: usize) -> Result<usize> {
    if min_vertices == 0 {
        return Err(MeshError::invalid_param(
            "min_vertices",
            min_vertices,
            "must be positive",
        ));
    }

    let mut counts = SubdivisionCounts::ICOSAHEDRON;
    let mut rounds = 0;
    while counts.vertices < min_vertices {
        counts = counts.next().ok_or_else(|| {
            MeshError::invalid_param("min_vertices", min_vertices, "vertex count overflows")
        })?;
        rounds += 1;
    }

    Ok(rounds)
}

/// Build the icosasphere with the fewest vertices that is at least
/// `min_vertices`.
///
/// Every vertex of the result lies on the unit sphere.
pub fn build_icosasphere(min_vertices: usize) -> Result<Polyhedron> {
    let rounds = subdivisions_for_vertex_count(min_vertices)?;
    let sphere = icosasphere_with_subdivisions(rounds)?;
    log::info!(
        "built icosasphere with {} vertices ({} rounds, requested at least {})",
        sphere.num_vertices(),
        rounds,
        min_vertices
    );
    Ok(sphere)
}

/// Build the icosasphere after exactly `rounds` subdivisions.
pub fn icosasphere_with_subdivisions(rounds: usize) -> Result<Polyhedron> {
    let base = icosahedron()?;
    subdivide_rounds(&base, &SubdivideOptions::new(rounds))
}

/// Entry point grouping the icosasphere constructors.
///
/// ```
/// use icosasphere::algo::icosasphere::IcosasphereFactory;
///
/// assert_eq!(IcosasphereFactory::build(12).unwrap().num_vertices(), 12);
/// assert_eq!(IcosasphereFactory::build(13).unwrap().num_vertices(), 42);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IcosasphereFactory;

impl IcosasphereFactory {
    /// The base icosahedron. See [`icosahedron`].
    pub fn icosahedron() -> Result<Polyhedron> {
        icosahedron()
    }

    /// Rounds needed for `min_vertices`. See [`subdivisions_for_vertex_count`].
    pub fn subdivisions_for(min_vertices: usize) -> Result<usize> {
        subdivisions_for_vertex_count(min_vertices)
    }

    /// The smallest icosasphere with at least `min_vertices` vertices.
    pub fn build(min_vertices: usize) -> Result<Polyhedron> {
        build_icosasphere(min_vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexId;

    #[test]
    fn test_icosahedron() {
        let mesh = icosahedron().unwrap();
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_edges(), 30);
        assert_eq!(mesh.num_faces(), 20);
        assert!(mesh.is_valid());

        for v in mesh.vertex_ids() {
            assert_eq!(mesh.degree(v), 5);
            assert!((mesh.position(v).coords.norm() - 1.0).abs() < 1e-12);
        }

        // All edges of a regular icosahedron have the same length
        let first = mesh.edge_length(mesh.edge_ids().next().unwrap());
        for e in mesh.edge_ids() {
            assert!((mesh.edge_length(e) - first).abs() < 1e-12);
        }
    }

    #[test]
    fn test_icosahedron_faces_point_outward() {
        let mesh = icosahedron().unwrap();
        for (f, face) in mesh.faces() {
            let [a, b, c] = [0, 1, 2].map(|i| *mesh.position(face.vertices()[i]));
            let normal = (b - a).cross(&(c - a));
            assert!(normal.dot(&mesh.face_center(f).coords) > 0.0);
        }
    }

    #[test]
    fn test_round_counts() {
        assert_eq!(subdivisions_for_vertex_count(1).unwrap(), 0);
        assert_eq!(subdivisions_for_vertex_count(12).unwrap(), 0);
        assert_eq!(subdivisions_for_vertex_count(13).unwrap(), 1);
        assert_eq!(subdivisions_for_vertex_count(42).unwrap(), 1);
        assert_eq!(subdivisions_for_vertex_count(43).unwrap(), 2);
        assert_eq!(subdivisions_for_vertex_count(642).unwrap(), 3);
        assert_eq!(subdivisions_for_vertex_count(10_000).unwrap(), 5);
    }

    #[test]
    fn test_round_count_rejects_bad_targets() {
        assert!(matches!(
            subdivisions_for_vertex_count(0),
            Err(MeshError::InvalidParameter { .. })
        ));
        assert!(matches!(
            subdivisions_for_vertex_count(usize::MAX),
            Err(MeshError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_build_twelve_is_icosahedron() {
        let mesh = build_icosasphere(12).unwrap();
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_edges(), 30);
        assert_eq!(mesh.num_faces(), 20);
    }

    #[test]
    fn test_build_thirteen_subdivides_once() {
        let mesh = build_icosasphere(13).unwrap();
        assert_eq!(mesh.num_vertices(), 42);
        assert_eq!(mesh.num_edges(), 120);
        assert_eq!(mesh.num_faces(), 80);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_factory_matches_free_functions() {
        assert_eq!(IcosasphereFactory::subdivisions_for(43).unwrap(), 2);
        let from_factory = IcosasphereFactory::build(43).unwrap();
        let direct = icosasphere_with_subdivisions(2).unwrap();
        assert_eq!(from_factory.to_face_vertex(), direct.to_face_vertex());
        assert_eq!(IcosasphereFactory::icosahedron().unwrap().num_faces(), 20);
    }

    #[test]
    fn test_degrees_after_subdivision() {
        let mesh = icosasphere_with_subdivisions(2).unwrap();
        for v in mesh.vertex_ids() {
            let expected = if v.index() < 12 { 5 } else { 6 };
            assert_eq!(mesh.degree(v), expected, "degree of {:?}", v);
        }
        // Original vertices keep their handles and positions
        let base = icosahedron().unwrap();
        for i in 0..12 {
            let v = VertexId::new(i);
            assert!((mesh.position(v) - base.position(v)).norm() < 1e-12);
        }
    }

    #[test]
    fn test_all_vertices_on_unit_sphere() {
        let mesh = build_icosasphere(500).unwrap();
        for v in mesh.vertex_ids() {
            assert!((mesh.position(v).coords.norm() - 1.0).abs() < 1e-9);
        }
    }
}
