//! Mesh construction algorithms.
//!
//! - **Subdivision**: 1-to-4 midpoint splitting with projection onto the unit sphere
//! - **Icosasphere**: the base icosahedron and sphere construction by vertex count

pub mod icosasphere;
pub mod subdivide;
