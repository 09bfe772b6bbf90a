//! Core mesh data structures.
//!
//! This module provides the polygonal mesh representation the engines in
//! [`crate::algo`] operate on.
//!
//! # Overview
//!
//! The primary type is [`PolyMesh`]: a list of points and a list of cells,
//! where every cell (vertex, line, triangle, quad, polygon, triangle strip) is
//! an ordered sequence of point ids. Attribute arrays can be attached to
//! points and cells.
//!
//! Neighborhood queries go through a [`Topology`] view, available once
//! point-to-cell [`CellLinks`] are built:
//! - [`Topology::point_cells`] - cells using a point
//! - [`Topology::cell_points`] - points of a cell, in cyclic order
//! - [`Topology::cell_edge_neighbors`] - other cells using both ends of an edge
//!
//! # Index Types
//!
//! Points and cells are identified by [`PointId`] and [`CellId`], generic over
//! the underlying integer type ([`MeshIndex`]).
//!
//! # Construction
//!
//! ```
//! use patchwork::mesh::{build_from_triangles, PointId, PolyMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mut mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
//! mesh.build_links();
//! let topology = mesh.topology().unwrap();
//! assert_eq!(topology.point_cells(PointId::new(0)).len(), 1);
//! ```

mod attributes;
mod builder;
mod cell;
mod index;
mod links;
mod points;
mod polydata;

pub use attributes::{ArrayData, AttributeSet, DataArray};
pub use builder::{
    build_from_polygons, build_from_quads, build_from_strips, build_from_triangles,
    to_face_vertex,
};
pub use cell::{CellArray, CellKind};
pub use index::{CellId, MeshIndex, PointId};
pub use links::{CellLinks, Topology};
pub use points::{Points, Precision};
pub use polydata::PolyMesh;
