//! # Patchwork
//!
//! Connectivity analysis for polygonal meshes.
//!
//! Patchwork provides a compact cell-array mesh with point and cell
//! attributes, and two engines built on its point-to-cell links:
//!
//! - **Region segmentation**: labels every cell with the id of a smooth patch,
//!   grown across neighbors whose normals differ by less than a maximum angle.
//! - **Sharp-edge splitting**: duplicates points along edges sharper than a
//!   feature angle, so each smooth patch gets its own copies and can be
//!   shaded flat across the crease.
//!
//! ## Features
//!
//! - **Typed indices**: distinct point and cell ids over 16, 32 or 64-bit storage
//! - **Mixed cells**: vertices, lines, triangles, quads, polygons and strips
//! - **Attributes**: named point and cell arrays carried through every operation
//! - **Parallel splitting**: per-point work spread with rayon, deterministic output
//!
//! ## Quick Start
//!
//! ```
//! use patchwork::prelude::*;
//!
//! let cube: PolyMesh = CubeSource::default().build();
//!
//! // One region per face: neighboring faces meet at 90 degrees.
//! let segmented = generate_region_ids(&cube, &RegionOptions::default()).unwrap();
//! assert_eq!(segmented.num_regions, 6);
//!
//! // Give every face its own corners.
//! let options = SplitOptions::default().with_feature_angle(45.0);
//! let split = split_sharp_edges(&cube, &options).unwrap();
//! assert_eq!(split.mesh.num_points(), 24);
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use patchwork::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1],  // bottom
//!     [0, 1, 3],  // front
//!     [1, 2, 3],  // right
//!     [2, 0, 3],  // left
//! ];
//!
//! let mut mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_points(), 4);
//! assert_eq!(mesh.num_cells(), 4);
//!
//! // Point-to-cell queries need links.
//! mesh.build_links();
//! let topology = mesh.topology().unwrap();
//! assert_eq!(topology.point_cells(PointId::new(3)).len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;
pub mod source;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use patchwork::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        generate_region_ids, split_sharp_edges, CancelToken, PointsPrecision, Progress,
        RegionOptions, SplitOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_triangles, CellId, CellKind, MeshIndex, PointId,
        PolyMesh, Precision,
    };
    pub use crate::source::{CubeSource, CylinderSource, SphereSource, TorusSource};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
