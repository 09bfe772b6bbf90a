use nalgebra::{Point3, Vector3};

use crate::mesh::{CellKind, MeshIndex, PointId, PolyMesh};

/// Outward faces of the unit cube, indexing the corners in `CORNERS` order.
const FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Corner offsets in units of half the edge length.
const CORNERS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Axis-aligned cube with 8 shared corners and 6 quad faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeSource {
    /// Edge length.
    pub length: f64,
    /// Cube center.
    pub center: Point3<f64>,
}

impl Default for CubeSource {
    fn default() -> Self {
        Self {
            length: 1.0,
            center: Point3::origin(),
        }
    }
}

impl CubeSource {
    /// Set the edge length.
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Set the center.
    pub fn with_center(mut self, center: Point3<f64>) -> Self {
        self.center = center;
        self
    }

    /// Generate the mesh.
    pub fn build<I: MeshIndex>(&self) -> PolyMesh<I> {
        let half = 0.5 * self.length;
        let mut mesh = PolyMesh::new();
        for [x, y, z] in CORNERS {
            mesh.add_point(self.center + Vector3::new(x, y, z) * half);
        }
        for face in FACES {
            mesh.add_cell(CellKind::Quad, &face.map(PointId::new));
        }
        mesh
    }
}
