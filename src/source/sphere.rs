use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};

use crate::mesh::{CellKind, MeshIndex, PointId, PolyMesh};

/// Latitude-longitude triangulated sphere.
///
/// Points are the north pole, the south pole, then one column of
/// `phi_resolution - 2` ring points per meridian. Cells are the north fan,
/// the south fan, then two triangles per band quad, all wound outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSource {
    /// Sphere radius.
    pub radius: f64,
    /// Sphere center.
    pub center: Point3<f64>,
    /// Number of meridians (at least 3).
    pub theta_resolution: usize,
    /// Number of latitude lines including both poles (at least 3).
    pub phi_resolution: usize,
}

impl Default for SphereSource {
    fn default() -> Self {
        Self {
            radius: 0.5,
            center: Point3::origin(),
            theta_resolution: 8,
            phi_resolution: 8,
        }
    }
}

impl SphereSource {
    /// Set the radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the center.
    pub fn with_center(mut self, center: Point3<f64>) -> Self {
        self.center = center;
        self
    }

    /// Set the number of meridians and latitude lines.
    pub fn with_resolution(mut self, theta: usize, phi: usize) -> Self {
        self.theta_resolution = theta;
        self.phi_resolution = phi;
        self
    }

    /// Generate the mesh.
    pub fn build<I: MeshIndex>(&self) -> PolyMesh<I> {
        let theta_res = self.theta_resolution.max(3);
        let phi_res = self.phi_resolution.max(3);
        let r = self.radius;
        let c = self.center;

        let mut mesh = PolyMesh::new();
        mesh.add_point(c + Vector3::new(0.0, 0.0, r));
        mesh.add_point(c + Vector3::new(0.0, 0.0, -r));

        let d_theta = 2.0 * PI / theta_res as f64;
        let d_phi = PI / (phi_res - 1) as f64;
        for i in 0..theta_res {
            let theta = i as f64 * d_theta;
            for j in 1..phi_res - 1 {
                let phi = j as f64 * d_phi;
                let ring = r * phi.sin();
                mesh.add_point(
                    c + Vector3::new(ring * theta.cos(), ring * theta.sin(), r * phi.cos()),
                );
            }
        }

        // Ring points per meridian, and the index of the first one.
        let per = phi_res - 2;
        let total = per * theta_res;
        let id = |k: usize| PointId::<I>::new(k);
        let column = |i: usize| (per * i) % total;

        for i in 0..theta_res {
            mesh.add_cell(
                CellKind::Triangle,
                &[id(column(i) + 2), id(column(i + 1) + 2), id(0)],
            );
        }
        let last = per + 1;
        for i in 0..theta_res {
            mesh.add_cell(
                CellKind::Triangle,
                &[id(column(i) + last), id(1), id(column(i + 1) + last)],
            );
        }
        for i in 0..theta_res {
            for j in 0..per - 1 {
                let a = column(i) + j + 2;
                let b = a + 1;
                let d = column(i + 1) + j + 3;
                mesh.add_cell(CellKind::Triangle, &[id(a), id(b), id(d)]);
                mesh.add_cell(CellKind::Triangle, &[id(a), id(d), id(d - 1)]);
            }
        }

        log::trace!(
            "built sphere: {} points, {} triangles",
            mesh.num_points(),
            mesh.num_cells()
        );
        mesh
    }
}
