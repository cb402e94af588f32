//! Error types for icosasphere.
//!
//! Every failure in this crate is a malformed-input or precondition error
//! raised while a mesh is being built. Nothing is retried and no partially
//! built structure is ever returned.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building or transforming a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three vertices or repeats a vertex.
    #[error("face {face} is degenerate (fewer than 3 vertices or duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// An edge was requested between a vertex and itself.
    #[error("edge would connect vertex {vertex} to itself")]
    DegenerateEdge {
        /// The repeated vertex.
        vertex: usize,
    },

    /// The same directed edge appears in two faces, so the faces disagree on winding.
    #[error("directed edge ({v0}, {v1}) is used by more than one face")]
    InconsistentOrientation {
        /// Origin of the directed edge.
        v0: usize,
        /// Destination of the directed edge.
        v1: usize,
    },

    /// An edge does not have exactly two incident faces.
    #[error("edge ({v0}, {v1}) has {faces} incident faces, expected 2")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
        /// Number of incident faces found.
        faces: usize,
    },

    /// The faces around a vertex cannot be aligned with its edge order.
    #[error("faces around vertex {vertex} cannot be aligned with its edges ({matches} candidates)")]
    UnalignedFaces {
        /// The vertex index.
        vertex: usize,
        /// Number of faces matching a slot that needed exactly one.
        matches: usize,
    },

    /// Two consecutive face vertices do not share exactly one edge.
    ///
    /// Only raised by [`face_to_edges`](crate::mesh::topology::face_to_edges)
    /// when called with edge rings that were not built from the same edge list.
    #[error("vertices {v0} and {v1} share {matches} edges, expected 1")]
    AmbiguousEdge {
        /// First vertex.
        v0: usize,
        /// Second vertex.
        v1: usize,
        /// Number of shared edges found.
        matches: usize,
    },

    /// An operation that only handles triangles met a larger face.
    #[error("face {face} has {len} vertices, expected a triangle")]
    NotTriangular {
        /// The face index.
        face: usize,
        /// Number of vertices in the face.
        len: usize,
    },

    /// A vertex sits at the origin and cannot be projected onto the sphere.
    #[error("vertex {vertex} has a zero-length position")]
    DegeneratePosition {
        /// The vertex index.
        vertex: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MeshError::NonManifoldEdge { v0: 3, v1: 7, faces: 1 };
        assert_eq!(err.to_string(), "edge (3, 7) has 1 incident faces, expected 2");

        let err = MeshError::invalid_param("min_vertices", 0, "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter: min_vertices = 0 (must be positive)"
        );
    }
}
