use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};

use crate::mesh::{CellKind, MeshIndex, PointId, PolyMesh};

/// Faceted cylinder along the y axis.
///
/// The side is one quad per facet. When capped, each end is a single polygon
/// on its own copy of the rim points, so caps never share points with the side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderSource {
    /// Radius of the rim.
    pub radius: f64,
    /// Extent along y, centered on `center`.
    pub height: f64,
    /// Cylinder center.
    pub center: Point3<f64>,
    /// Number of side facets (at least 3).
    pub resolution: usize,
    /// Whether to close both ends.
    pub capping: bool,
}

impl Default for CylinderSource {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.0,
            center: Point3::origin(),
            resolution: 6,
            capping: true,
        }
    }
}

impl CylinderSource {
    /// Set the radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Set the number of side facets.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set whether the ends are capped.
    pub fn with_capping(mut self, capping: bool) -> Self {
        self.capping = capping;
        self
    }

    /// Generate the mesh.
    pub fn build<I: MeshIndex>(&self) -> PolyMesh<I> {
        let res = self.resolution.max(3);
        let half = 0.5 * self.height;
        let step = 2.0 * PI / res as f64;

        let mut mesh = PolyMesh::new();
        let rings = if self.capping { 2 } else { 1 };
        for _ in 0..rings {
            for i in 0..res {
                let angle = i as f64 * step;
                let x = self.radius * angle.cos();
                let z = -self.radius * angle.sin();
                mesh.add_point(self.center + Vector3::new(x, half, z));
                mesh.add_point(self.center + Vector3::new(x, -half, z));
            }
        }

        let id = |k: usize| PointId::<I>::new(k);
        let side = 2 * res;
        for i in 0..res {
            let a = 2 * i;
            mesh.add_cell(
                CellKind::Quad,
                &[id(a), id(a + 1), id((a + 3) % side), id((a + 2) % side)],
            );
        }

        if self.capping {
            let top: Vec<PointId<I>> = (0..res).map(|i| id(side + 2 * i)).collect();
            let bottom: Vec<PointId<I>> = (0..res).rev().map(|i| id(side + 2 * i + 1)).collect();
            mesh.add_cell(CellKind::polygon_for(res), &top);
            mesh.add_cell(CellKind::polygon_for(res), &bottom);
        }
        mesh
    }
}
