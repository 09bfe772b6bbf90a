//! Cell adjacency queries.
//!
//! Two notions of neighborhood are used by the engines:
//!
//! - [`cell_neighbors`]: cells sharing at least one point with a cell. Used by
//!   region growing.
//! - [`edge_neighbor`]: the cells across one specific edge, classified as
//!   boundary, manifold or non-manifold. Used by the fan walk when splitting.

use crate::mesh::{CellId, MeshIndex, PointId, Topology};

/// Collect the cells sharing at least one point with `cell`.
///
/// `out` is cleared, then filled with each neighbor once, in the order first
/// met while scanning the cell's points and their incidence lists. `cell`
/// itself is excluded. A cell without points has no neighbors.
///
/// # Example
///
/// ```
/// use patchwork::algo::adjacency::cell_neighbors;
/// use patchwork::mesh::{build_from_triangles, CellId, PolyMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(2.0, 2.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2], [1, 3, 2], [3, 4, 2]];
/// let mut mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
/// mesh.build_links();
///
/// let mut neighbors = Vec::new();
/// cell_neighbors(&mesh.topology().unwrap(), CellId::new(0), &mut neighbors);
/// assert_eq!(neighbors, vec![CellId::new(1), CellId::new(2)]);
/// ```
pub fn cell_neighbors<I: MeshIndex>(
    topology: &Topology<'_, I>,
    cell: CellId<I>,
    out: &mut Vec<CellId<I>>,
) {
    out.clear();
    for &p in topology.cell_points(cell) {
        for &c in topology.point_cells(p) {
            if c != cell && !out.contains(&c) {
                out.push(c);
            }
        }
    }
}

/// What lies across an edge, seen from one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeNeighbor<I: MeshIndex = u32> {
    /// No other cell uses the edge.
    Boundary,
    /// Exactly one other cell uses the edge.
    Manifold(CellId<I>),
    /// This many other cells use the edge.
    NonManifold(usize),
}

/// Classify the cells across edge `(a, b)` of `cell`.
///
/// Only cells for which `accept` returns true are counted, letting callers
/// ignore lines or vertices that happen to use both points.
pub fn edge_neighbor<I: MeshIndex>(
    topology: &Topology<'_, I>,
    cell: CellId<I>,
    a: PointId<I>,
    b: PointId<I>,
    accept: impl Fn(CellId<I>) -> bool,
) -> EdgeNeighbor<I> {
    let mut found: Option<CellId<I>> = None;
    let mut count = 0usize;
    for c in topology.edge_cells(cell, a, b).filter(|&c| accept(c)) {
        count += 1;
        found = Some(c);
    }

    match (count, found) {
        (1, Some(c)) => EdgeNeighbor::Manifold(c),
        (0, _) => EdgeNeighbor::Boundary,
        (n, _) => EdgeNeighbor::NonManifold(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_polygons, build_from_triangles, CellKind, PolyMesh};
    use nalgebra::Point3;

    /// Three triangles sharing the edge (0, 1), plus one touching only point 2.
    fn book() -> PolyMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
            Point3::new(0.5, 2.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [1, 0, 3], [0, 1, 4], [2, 5, 6]];
        let mut mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
        mesh.build_links();
        mesh
    }

    #[test]
    fn test_point_neighbors() {
        let mesh = book();
        let topo = mesh.topology().unwrap();
        let mut out = Vec::new();

        cell_neighbors(&topo, CellId::new(0), &mut out);
        assert_eq!(out, vec![CellId::new(1), CellId::new(2), CellId::new(3)]);

        cell_neighbors(&topo, CellId::new(3), &mut out);
        assert_eq!(out, vec![CellId::new(0)]);
    }

    #[test]
    fn test_empty_cell_has_no_neighbors() {
        let mut mesh = book();
        let empty = mesh.add_cell(CellKind::Polygon, &[]);
        mesh.build_links();
        let mut out = vec![CellId::new(0)];
        cell_neighbors(&mesh.topology().unwrap(), empty, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_edge_classification() {
        let mesh = book();
        let topo = mesh.topology().unwrap();
        let (p0, p1, p2) = (PointId::new(0), PointId::new(1), PointId::new(2));

        assert_eq!(
            edge_neighbor(&topo, CellId::new(0), p0, p1, |_| true),
            EdgeNeighbor::NonManifold(2)
        );
        assert_eq!(
            edge_neighbor(&topo, CellId::new(0), p0, p1, |c| c != CellId::new(2)),
            EdgeNeighbor::Manifold(CellId::new(1))
        );
        assert_eq!(
            edge_neighbor(&topo, CellId::new(0), p1, p2, |_| true),
            EdgeNeighbor::Boundary
        );
    }

    #[test]
    fn test_edge_classification_matches_topology() {
        let mut mesh = book();
        let (p0, p1) = (PointId::new(0), PointId::new(1));
        // A cell repeating point 0 still counts once across the edge.
        mesh.add_cell(CellKind::Polygon, &[p0, p1, PointId::new(5), p0]);
        mesh.build_links();
        let topo = mesh.topology().unwrap();

        let mut across = Vec::new();
        topo.cell_edge_neighbors(CellId::new(0), p0, p1, &mut across);
        assert_eq!(across, vec![CellId::new(1), CellId::new(2), CellId::new(4)]);
        assert_eq!(
            edge_neighbor(&topo, CellId::new(0), p0, p1, |_| true),
            EdgeNeighbor::NonManifold(across.len())
        );
    }

    #[test]
    fn test_quads_share_edges_with_triangles() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.5, 0.0),
        ];
        let polygons = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
        let mut mesh: PolyMesh = build_from_polygons(&vertices, &polygons).unwrap();
        mesh.build_links();
        let topo = mesh.topology().unwrap();

        assert_eq!(
            edge_neighbor(&topo, CellId::new(0), PointId::new(1), PointId::new(2), |_| true),
            EdgeNeighbor::Manifold(CellId::new(1))
        );
    }
}
