//! Procedural polygonal meshes.
//!
//! Each source is a small parameter struct with sensible defaults and a
//! `build` method producing a fresh [`PolyMesh`](crate::mesh::PolyMesh) with
//! double-precision points and no attributes.
//!
//! ```
//! use patchwork::mesh::PolyMesh;
//! use patchwork::source::{CubeSource, SphereSource};
//!
//! let sphere: PolyMesh = SphereSource::default().with_resolution(16, 12).build();
//! assert_eq!(sphere.num_points(), 2 + 16 * 10);
//!
//! let cube: PolyMesh = CubeSource::default().with_length(2.0).build();
//! assert_eq!(cube.num_cells(), 6);
//! ```

mod cube;
mod cylinder;
mod sphere;
mod torus;

pub use cube::CubeSource;
pub use cylinder::CylinderSource;
pub use sphere::SphereSource;
pub use torus::TorusSource;
