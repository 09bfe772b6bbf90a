//! Per-cell normals.
//!
//! The engines compare cells through the dot product of their unit normals.
//! Normals come from the mesh's designated cell normals array when it has one,
//! otherwise from a [`NormalProvider`]. The default provider, [`NewellNormals`],
//! uses Newell's method, which is robust for non-planar and concave polygons.
//!
//! No orientation fixing is done: normals follow each cell's winding.

use nalgebra::Vector3;

use crate::mesh::{CellId, DataArray, MeshIndex, PolyMesh};

/// Name given to computed cell normals attached to a mesh.
pub const NORMALS_ARRAY: &str = "Normals";

/// Source of per-cell normals.
pub trait NormalProvider {
    /// One unit normal per cell, in cell order. Cells without a defined normal
    /// get the zero vector.
    fn cell_normals<I: MeshIndex>(&self, mesh: &PolyMesh<I>) -> Vec<Vector3<f64>>;
}

/// Newell's method over each cell's point ring.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewellNormals;

impl NormalProvider for NewellNormals {
    fn cell_normals<I: MeshIndex>(&self, mesh: &PolyMesh<I>) -> Vec<Vector3<f64>> {
        mesh.cell_ids().map(|c| cell_normal(mesh, c)).collect()
    }
}

/// Unit normal of one cell by Newell's method.
///
/// Cells with fewer than three points or zero area give the zero vector.
pub fn cell_normal<I: MeshIndex>(mesh: &PolyMesh<I>, cell: CellId<I>) -> Vector3<f64> {
    let pts = mesh.cell_points(cell);
    if pts.len() < 3 {
        return Vector3::zeros();
    }

    let mut n = Vector3::<f64>::zeros();
    for (i, &a) in pts.iter().enumerate() {
        let p = mesh.position(a);
        let q = mesh.position(pts[(i + 1) % pts.len()]);
        n.x += (p.y - q.y) * (p.z + q.z);
        n.y += (p.z - q.z) * (p.x + q.x);
        n.z += (p.x - q.x) * (p.y + q.y);
    }

    let len = n.norm();
    if len > 0.0 {
        n / len
    } else {
        Vector3::zeros()
    }
}

/// Normals from the mesh's designated cell normals array, if usable.
///
/// The array must have three components and one tuple per cell. Vectors are
/// normalized on read; zero vectors stay zero.
pub fn existing_cell_normals<I: MeshIndex>(mesh: &PolyMesh<I>) -> Option<Vec<Vector3<f64>>> {
    let array = mesh.cell_data().normals()?;
    if array.num_components() != 3 || array.num_tuples() != mesh.num_cells() {
        log::trace!(
            "ignoring cell normals '{}': {} components, {} tuples for {} cells",
            array.name(),
            array.num_components(),
            array.num_tuples(),
            mesh.num_cells()
        );
        return None;
    }
    Some(
        (0..array.num_tuples())
            .map(|t| array.vector(t).try_normalize(0.0).unwrap_or_else(Vector3::zeros))
            .collect(),
    )
}

/// Cell normals of `mesh`, read from its attributes or computed by `provider`.
///
/// The mesh is not modified.
pub fn cell_normals_or_compute<I: MeshIndex, P: NormalProvider>(
    mesh: &PolyMesh<I>,
    provider: &P,
) -> Vec<Vector3<f64>> {
    existing_cell_normals(mesh).unwrap_or_else(|| provider.cell_normals(mesh))
}

/// Cell normals of `mesh`, computing and attaching them when absent.
///
/// Computed normals are stored as a `Float64` array named [`NORMALS_ARRAY`]
/// and designated as the mesh's cell normals.
pub fn ensure_cell_normals<I: MeshIndex, P: NormalProvider>(
    mesh: &mut PolyMesh<I>,
    provider: &P,
) -> Vec<Vector3<f64>> {
    if let Some(normals) = existing_cell_normals(mesh) {
        return normals;
    }
    let normals = provider.cell_normals(mesh);
    log::trace!("computed {} cell normals", normals.len());
    mesh.cell_data_mut()
        .set_normals(DataArray::from_vectors(NORMALS_ARRAY, &normals));
    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_polygons, CellKind, PointId};
    use nalgebra::Point3;

    fn square_and_wall() -> PolyMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(2.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        let polygons = vec![vec![0, 1, 2, 3], vec![0, 5, 4, 1]];
        build_from_polygons(&vertices, &polygons).unwrap()
    }

    #[test]
    fn test_newell_unit_normals() {
        let mesh = square_and_wall();
        let normals = NewellNormals.cell_normals(&mesh);

        assert!((normals[0] - Vector3::z()).norm() < 1e-12);
        assert!((normals[1] - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_degenerate_cells_have_zero_normal() {
        let mut mesh = square_and_wall();
        let line = mesh.add_cell(CellKind::Line, &[PointId::new(0), PointId::new(1)]);
        let flat = mesh.add_cell(
            CellKind::Triangle,
            &[PointId::new(0), PointId::new(1), PointId::new(0)],
        );
        assert_eq!(cell_normal(&mesh, line), Vector3::zeros());
        assert_eq!(cell_normal(&mesh, flat), Vector3::zeros());
    }

    #[test]
    fn test_ensure_attaches_once() {
        let mut mesh = square_and_wall();
        let first = ensure_cell_normals(&mut mesh, &NewellNormals);
        assert!(mesh.cell_data().contains(NORMALS_ARRAY));

        // A second call reads the stored array back unchanged.
        let second = ensure_cell_normals(&mut mesh, &NewellNormals);
        assert_eq!(first, second);
        assert_eq!(mesh.cell_data().len(), 1);
    }

    #[test]
    fn test_existing_normals_are_normalized() {
        let mut mesh = square_and_wall();
        mesh.cell_data_mut().set_normals(DataArray::from_vectors(
            "given",
            &[Vector3::new(0.0, 0.0, 3.0), Vector3::zeros()],
        ));

        let normals = cell_normals_or_compute(&mesh, &NewellNormals);
        assert_eq!(normals, vec![Vector3::z(), Vector3::zeros()]);
    }

    #[test]
    fn test_wrong_sized_normals_are_recomputed() {
        let mut mesh = square_and_wall();
        mesh.cell_data_mut()
            .set_normals(DataArray::from_vectors("given", &[Vector3::x()]));

        let normals = cell_normals_or_compute(&mesh, &NewellNormals);
        assert_eq!(normals.len(), 2);
        assert!((normals[0] - Vector3::z()).norm() < 1e-12);
    }
}
