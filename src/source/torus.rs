use std::f64::consts::PI;

use nalgebra::Point3;

use crate::mesh::{CellKind, MeshIndex, PointId, PolyMesh};

/// Ring torus around the z axis, emitted as triangle strips.
///
/// Point `(i, j)` sits at ring angle `2πi / ring_resolution` and tube angle
/// `2πj / tube_resolution`. Each ring segment is one closed strip of
/// `2 * (tube_resolution + 1)` points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusSource {
    /// Distance from the axis to the tube center.
    pub ring_radius: f64,
    /// Radius of the tube.
    pub tube_radius: f64,
    /// Segments around the ring (at least 3).
    pub ring_resolution: usize,
    /// Segments around the tube (at least 3).
    pub tube_resolution: usize,
}

impl Default for TorusSource {
    fn default() -> Self {
        Self {
            ring_radius: 0.5,
            tube_radius: 1.0 / 6.0,
            ring_resolution: 16,
            tube_resolution: 8,
        }
    }
}

impl TorusSource {
    /// Set the ring and tube radii.
    pub fn with_radii(mut self, ring: f64, tube: f64) -> Self {
        self.ring_radius = ring;
        self.tube_radius = tube;
        self
    }

    /// Set the segment counts around the ring and the tube.
    pub fn with_resolution(mut self, ring: usize, tube: usize) -> Self {
        self.ring_resolution = ring;
        self.tube_resolution = tube;
        self
    }

    /// Generate the mesh.
    pub fn build<I: MeshIndex>(&self) -> PolyMesh<I> {
        let ring_res = self.ring_resolution.max(3);
        let tube_res = self.tube_resolution.max(3);

        let mut mesh = PolyMesh::new();
        for i in 0..ring_res {
            let u = 2.0 * PI * i as f64 / ring_res as f64;
            for j in 0..tube_res {
                let v = 2.0 * PI * j as f64 / tube_res as f64;
                let w = self.ring_radius + self.tube_radius * v.cos();
                mesh.add_point(Point3::new(w * u.cos(), w * u.sin(), self.tube_radius * v.sin()));
            }
        }

        let mut strip: Vec<PointId<I>> = Vec::with_capacity(2 * (tube_res + 1));
        for i in 0..ring_res {
            let next = (i + 1) % ring_res;
            strip.clear();
            for j in 0..=tube_res {
                let j = j % tube_res;
                strip.push(PointId::new(i * tube_res + j));
                strip.push(PointId::new(next * tube_res + j));
            }
            mesh.add_cell(CellKind::TriangleStrip, &strip);
        }
        mesh
    }
}
