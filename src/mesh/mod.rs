//! Core mesh data structures.
//!
//! This module provides the polyhedral mesh representation and the topology
//! builder that produces it.
//!
//! # Overview
//!
//! The primary type is [`Polyhedron`]: vertices, edges and faces stored in
//! arenas, plus adjacency tables that record, for every vertex, its edges and
//! faces in anticlockwise order. The tables are built once, so every query is
//! a constant-time lookup.
//!
//! # Handles
//!
//! Mesh entities are identified by typed handles:
//! - [`VertexId`] - Identifies a vertex
//! - [`EdgeId`] - Identifies an undirected edge
//! - [`FaceId`] - Identifies a face
//!
//! A handle's raw value is the entity's dense index, suitable for addressing
//! flat arrays.
//!
//! # Construction
//!
//! ```
//! use icosasphere::mesh::Polyhedron;
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, -1.0),
//!     Point3::new(-1.0, 1.0, -1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//! ];
//! let faces = vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
//!
//! let mesh = Polyhedron::from_faces(&positions, &faces).unwrap();
//! assert!(mesh.is_valid());
//! ```

mod angular;
mod cyclic;
mod index;
mod polyhedron;
mod primitives;
pub mod topology;

pub use angular::AnticlockwiseOrder;
pub use cyclic::{next_cyclic, prev_cyclic, CyclicIndex};
pub use index::{EdgeId, FaceId, VertexId};
pub use polyhedron::Polyhedron;
pub use primitives::{Edge, Face, Vertex};
pub use topology::build_polyhedron;
