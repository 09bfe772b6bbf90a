//! Mesh construction utilities.
//!
//! Functions for building a [`PolyMesh`] from face-vertex lists, the form
//! most procedural generators and file formats produce.

use nalgebra::Point3;

use super::cell::CellKind;
use super::index::{MeshIndex, PointId};
use super::polydata::PolyMesh;
use crate::error::{MeshError, Result};

/// Build a mesh from vertices and polygons of any size.
///
/// Each polygon becomes a triangle, quad or general polygon cell according to
/// its length.
///
/// # Example
/// ```
/// use patchwork::mesh::{build_from_polygons, PolyMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(2.0, 0.5, 0.0),
/// ];
/// let polygons = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
///
/// let mesh: PolyMesh = build_from_polygons(&vertices, &polygons).unwrap();
/// assert_eq!(mesh.num_points(), 5);
/// assert_eq!(mesh.num_cells(), 2);
/// ```
pub fn build_from_polygons<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    polygons: &[F],
) -> Result<PolyMesh<I>> {
    build_cells(vertices, polygons, |n| CellKind::polygon_for(n))
}

/// Build a mesh from vertices and triangle faces.
///
/// # Example
/// ```
/// use patchwork::mesh::{build_from_triangles, PolyMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_points(), 3);
/// assert_eq!(mesh.num_cells(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<PolyMesh<I>> {
    build_cells(vertices, faces, |_| CellKind::Triangle)
}

/// Build a mesh from vertices and quad faces.
pub fn build_from_quads<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 4]],
) -> Result<PolyMesh<I>> {
    build_cells(vertices, faces, |_| CellKind::Quad)
}

/// Build a mesh from vertices and triangle strips.
///
/// Strips are stored as-is; engines decompose them on their copy of the mesh.
pub fn build_from_strips<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    strips: &[F],
) -> Result<PolyMesh<I>> {
    build_cells(vertices, strips, |_| CellKind::TriangleStrip)
}

fn build_cells<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
    kind_of: impl Fn(usize) -> CellKind,
) -> Result<PolyMesh<I>> {
    let mut mesh = PolyMesh::new();
    for &pos in vertices {
        mesh.add_point(pos);
    }

    let mut ids: Vec<PointId<I>> = Vec::new();
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if let Some(&bad) = face.iter().find(|&&v| v >= vertices.len()) {
            return Err(MeshError::InvalidPointIndex {
                cell: fi,
                point: bad,
            });
        }
        ids.clear();
        ids.extend(face.iter().map(|&v| PointId::new(v)));
        mesh.add_cell(kind_of(face.len()), &ids);
    }

    Ok(mesh)
}

/// Extract vertex positions and point-id lists from a mesh.
///
/// The inverse of [`build_from_polygons`] for polygon meshes; every cell is
/// returned regardless of kind.
pub fn to_face_vertex<I: MeshIndex>(mesh: &PolyMesh<I>) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices = mesh.points().iter().collect();
    let faces = mesh
        .cells()
        .iter()
        .map(|(_, pts)| pts.iter().map(|p| p.index()).collect())
        .collect();
    (vertices, faces)
}
