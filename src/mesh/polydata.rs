//! Polygonal mesh data structure.
//!
//! A [`PolyMesh`] is a list of points and a list of cells, each cell an
//! ordered sequence of point ids. Vertices, lines, polygons and triangle strips
//! live in the same cell list. Per-point and per-cell attribute arrays ride
//! along and are kept in step with every structural edit.
//!
//! Neighborhood queries need point-to-cell links, built with
//! [`PolyMesh::build_links`] and exposed through [`PolyMesh::topology`]. Any
//! edit to connectivity drops the links.

use nalgebra::Point3;

use super::attributes::AttributeSet;
use super::cell::{CellArray, CellKind};
use super::index::{CellId, MeshIndex, PointId};
use super::links::{CellLinks, Topology};
use super::points::{Points, Precision};
use crate::error::{MeshError, Result};

/// A polygonal mesh with attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyMesh<I: MeshIndex = u32> {
    pub(crate) points: Points,
    pub(crate) cells: CellArray<I>,
    pub(crate) point_data: AttributeSet,
    pub(crate) cell_data: AttributeSet,
    pub(crate) links: Option<CellLinks<I>>,
}

impl<I: MeshIndex> PolyMesh<I> {
    /// Create an empty mesh with double precision points.
    pub fn new() -> Self {
        Self::with_precision(Precision::Double)
    }

    /// Create an empty mesh storing points at `precision`.
    pub fn with_precision(precision: Precision) -> Self {
        Self {
            points: Points::new(precision),
            cells: CellArray::new(),
            point_data: AttributeSet::new(),
            cell_data: AttributeSet::new(),
            links: None,
        }
    }

    /// Assemble a mesh from parts. Call [`validate`](Self::validate) before trusting it.
    pub fn from_parts(points: Points, cells: CellArray<I>) -> Self {
        Self {
            points,
            cells,
            point_data: AttributeSet::new(),
            cell_data: AttributeSet::new(),
            links: None,
        }
    }

    // ==================== Accessors ====================

    /// Number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of cells of every kind.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of polygon and triangle strip cells.
    pub fn num_polygons(&self) -> usize {
        self.cells
            .iter()
            .filter(|(kind, _)| kind.is_polygonal() || kind.is_strip())
            .count()
    }

    /// Point coordinates.
    pub fn points(&self) -> &Points {
        &self.points
    }

    /// Cell connectivity.
    pub fn cells(&self) -> &CellArray<I> {
        &self.cells
    }

    /// Position of a point.
    #[inline]
    pub fn position(&self, p: PointId<I>) -> Point3<f64> {
        self.points.get(p.index())
    }

    /// Points of a cell, in cyclic order.
    #[inline]
    pub fn cell_points(&self, c: CellId<I>) -> &[PointId<I>] {
        self.cells.cell(c)
    }

    /// Kind of a cell.
    #[inline]
    pub fn cell_kind(&self, c: CellId<I>) -> CellKind {
        self.cells.kind(c)
    }

    /// Iterate over all point ids.
    pub fn point_ids(&self) -> impl Iterator<Item = PointId<I>> {
        (0..self.num_points()).map(PointId::new)
    }

    /// Iterate over all cell ids.
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId<I>> {
        (0..self.num_cells()).map(CellId::new)
    }

    /// Per-point attributes.
    pub fn point_data(&self) -> &AttributeSet {
        &self.point_data
    }

    /// Per-point attributes, mutable.
    pub fn point_data_mut(&mut self) -> &mut AttributeSet {
        &mut self.point_data
    }

    /// Per-cell attributes.
    pub fn cell_data(&self) -> &AttributeSet {
        &self.cell_data
    }

    /// Per-cell attributes, mutable.
    pub fn cell_data_mut(&mut self) -> &mut AttributeSet {
        &mut self.cell_data
    }

    // ==================== Construction ====================

    /// Append a point and return its id.
    pub fn add_point(&mut self, position: Point3<f64>) -> PointId<I> {
        let id = PointId::new(self.points.len());
        self.points.push(position);
        self.links = None;
        id
    }

    /// Append a cell and return its id.
    pub fn add_cell(&mut self, kind: CellKind, points: &[PointId<I>]) -> CellId<I> {
        self.links = None;
        self.cells.push(kind, points)
    }

    /// Replace every reference to `old` in cell `c` with `new`.
    pub fn replace_cell_point(&mut self, c: CellId<I>, old: PointId<I>, new: PointId<I>) {
        self.links = None;
        self.cells.replace_point(c, old, new);
    }

    /// Check that connectivity and attribute sizes are consistent.
    pub fn validate(&self) -> Result<()> {
        let n = self.num_points();
        for (c, (_, pts)) in self.cells.iter().enumerate() {
            if let Some(bad) = pts.iter().find(|p| p.index() >= n) {
                return Err(MeshError::InvalidPointIndex {
                    cell: c,
                    point: bad.index(),
                });
            }
        }
        for (what, set) in [("point", &self.point_data), ("cell", &self.cell_data)] {
            if let Some(array) = set.first_ragged() {
                return Err(MeshError::InvalidInput(format!(
                    "{} array '{}' has {} values, not a multiple of {} components",
                    what,
                    array.name(),
                    array.data().len(),
                    array.num_components()
                )));
            }
        }
        if let Some((name, tuples)) = self.point_data.first_mismatch(n) {
            return Err(MeshError::InvalidInput(format!(
                "point array '{}' has {} tuples for {} points",
                name, tuples, n
            )));
        }
        if let Some((name, tuples)) = self.cell_data.first_mismatch(self.num_cells()) {
            return Err(MeshError::InvalidInput(format!(
                "cell array '{}' has {} tuples for {} cells",
                name,
                tuples,
                self.num_cells()
            )));
        }
        Ok(())
    }

    // ==================== Links ====================

    /// Build point-to-cell links, replacing any existing ones.
    pub fn build_links(&mut self) {
        self.links = Some(CellLinks::build(self.num_points(), &self.cells));
    }

    /// Build links if they are missing.
    pub fn ensure_links(&mut self) {
        if self.links.is_none() {
            self.build_links();
        }
    }

    /// Whether links are currently built.
    pub fn has_links(&self) -> bool {
        self.links.is_some()
    }

    /// Topology queries over this mesh.
    ///
    /// Fails with [`MeshError::InvalidState`] if links have not been built.
    pub fn topology(&self) -> Result<Topology<'_, I>> {
        let links = self
            .links
            .as_ref()
            .ok_or_else(|| MeshError::InvalidState("cell links have not been built".into()))?;
        Ok(Topology::new(self, links))
    }

    // ==================== Whole-mesh edits ====================

    /// Change the precision of stored point coordinates.
    pub fn set_precision(&mut self, precision: Precision) {
        let points = std::mem::take(&mut self.points);
        self.points = points.to_precision(precision);
    }

    /// Decompose every triangle strip into triangles.
    ///
    /// Each strip is replaced in place by its triangles, so later cell ids
    /// shift. Odd triangles are emitted with their first two points swapped so
    /// all triangles of a strip share one orientation. Cell attributes of a
    /// strip are copied to each of its triangles. Strips with fewer than three
    /// points become polygons with the same points, so no cell is lost.
    /// Returns the number of strips decomposed.
    pub fn triangulate_strips(&mut self) -> usize {
        let strips = self.cells.iter().filter(|(k, _)| k.is_strip()).count();
        if strips == 0 {
            return 0;
        }

        let mut cells = CellArray::with_capacity(self.cells.len(), self.cells.connectivity_len());
        let mut source: Vec<usize> = Vec::with_capacity(self.cells.len());
        for (c, (kind, pts)) in self.cells.iter().enumerate() {
            if !kind.is_strip() {
                cells.push(kind, pts);
                source.push(c);
                continue;
            }
            if pts.len() < 3 {
                cells.push(CellKind::Polygon, pts);
                source.push(c);
                continue;
            }
            for k in 0..pts.len() - 2 {
                let tri = if k % 2 == 0 {
                    [pts[k], pts[k + 1], pts[k + 2]]
                } else {
                    [pts[k + 1], pts[k], pts[k + 2]]
                };
                cells.push(CellKind::Triangle, &tri);
                source.push(c);
            }
        }

        self.cell_data = self.cell_data.gather(&source);
        self.cells = cells;
        self.links = None;
        strips
    }

    /// Concatenate meshes into one.
    ///
    /// Point ids of each input are offset by the points before it. Attribute
    /// arrays survive only when every input carries a compatible array of the
    /// same name. Points are single precision only if every input is.
    pub fn append(meshes: &[&PolyMesh<I>]) -> PolyMesh<I> {
        let precision = if meshes
            .iter()
            .all(|m| m.points.precision() == Precision::Single)
            && !meshes.is_empty()
        {
            Precision::Single
        } else {
            Precision::Double
        };

        let num_points = meshes.iter().map(|m| m.num_points()).sum();
        let num_cells = meshes.iter().map(|m| m.num_cells()).sum();
        let connectivity = meshes.iter().map(|m| m.cells.connectivity_len()).sum();

        let mut points = Points::with_capacity(precision, num_points);
        let mut cells = CellArray::with_capacity(num_cells, connectivity);
        let mut shifted = Vec::new();
        for mesh in meshes {
            let offset = points.len();
            for p in mesh.points.iter() {
                points.push(p);
            }
            for (kind, pts) in mesh.cells.iter() {
                shifted.clear();
                shifted.extend(pts.iter().map(|p| PointId::new(p.index() + offset)));
                cells.push(kind, &shifted);
            }
        }

        let point_sets: Vec<&AttributeSet> = meshes.iter().map(|m| &m.point_data).collect();
        let cell_sets: Vec<&AttributeSet> = meshes.iter().map(|m| &m.cell_data).collect();

        PolyMesh {
            points,
            cells,
            point_data: AttributeSet::concatenate(&point_sets),
            cell_data: AttributeSet::concatenate(&cell_sets),
            links: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::attributes::{ArrayData, DataArray};

    fn quad_with_tail() -> PolyMesh {
        let mut mesh = PolyMesh::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (2.0, 0.5)] {
            mesh.add_point(Point3::new(x, y, 0.0));
        }
        let p: Vec<PointId> = (0..5).map(PointId::new).collect();
        mesh.add_cell(CellKind::Quad, &[p[0], p[1], p[2], p[3]]);
        mesh.add_cell(CellKind::Line, &[p[1], p[4]]);
        mesh
    }

    #[test]
    fn test_counts() {
        let mesh = quad_with_tail();
        assert_eq!(mesh.num_points(), 5);
        assert_eq!(mesh.num_cells(), 2);
        assert_eq!(mesh.num_polygons(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_index() {
        let mut mesh = quad_with_tail();
        mesh.add_cell(CellKind::Triangle, &[PointId::new(0), PointId::new(1), PointId::new(9)]);
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::InvalidPointIndex { cell: 2, point: 9 })
        ));
    }

    #[test]
    fn test_validate_rejects_short_array() {
        let mut mesh = quad_with_tail();
        mesh.cell_data_mut()
            .insert(DataArray::new("tag", 1, ArrayData::Int32(vec![1])));
        assert!(matches!(mesh.validate(), Err(MeshError::InvalidInput(_))));
    }

    #[test]
    fn test_topology_requires_links() {
        let mut mesh = quad_with_tail();
        assert!(matches!(mesh.topology(), Err(MeshError::InvalidState(_))));

        mesh.build_links();
        assert!(mesh.topology().is_ok());

        mesh.add_point(Point3::origin());
        assert!(!mesh.has_links());
    }

    #[test]
    fn test_triangulate_strips() {
        let mut mesh: PolyMesh = PolyMesh::new();
        for i in 0..5 {
            mesh.add_point(Point3::new(i as f64, (i % 2) as f64, 0.0));
        }
        let p: Vec<PointId> = (0..5).map(PointId::new).collect();
        mesh.add_cell(CellKind::Line, &[p[0], p[4]]);
        mesh.add_cell(CellKind::TriangleStrip, &p);
        mesh.cell_data_mut()
            .insert(DataArray::new("tag", 1, ArrayData::Int32(vec![7, 8])));

        assert_eq!(mesh.triangulate_strips(), 1);
        assert_eq!(mesh.num_cells(), 4);
        assert_eq!(mesh.cell_points(CellId::new(1)), &[p[0], p[1], p[2]]);
        assert_eq!(mesh.cell_points(CellId::new(2)), &[p[2], p[1], p[3]]);
        assert_eq!(mesh.cell_points(CellId::new(3)), &[p[2], p[3], p[4]]);
        assert_eq!(
            mesh.cell_data().get("tag").map(|a| a.data().clone()),
            Some(ArrayData::Int32(vec![7, 8, 8, 8]))
        );
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_partial_tuple() {
        let mut mesh = quad_with_tail();
        mesh.point_data_mut().insert(DataArray::new(
            "velocity",
            3,
            ArrayData::Float64(vec![0.0; 16]),
        ));
        // 16 values read as 5 whole tuples, matching the point count.
        assert_eq!(mesh.point_data().get("velocity").map(|a| a.num_tuples()), Some(5));
        assert!(matches!(mesh.validate(), Err(MeshError::InvalidInput(_))));
    }

    #[test]
    fn test_short_strips_become_polygons() {
        let mut mesh = quad_with_tail();
        let p: Vec<PointId> = (0..5).map(PointId::new).collect();
        mesh.add_cell(CellKind::TriangleStrip, &[p[1], p[4]]);
        mesh.add_cell(CellKind::TriangleStrip, &[p[2], p[4], p[3]]);
        mesh.cell_data_mut()
            .insert(DataArray::new("tag", 1, ArrayData::Int32(vec![1, 2, 3, 4])));

        assert_eq!(mesh.triangulate_strips(), 2);
        assert_eq!(mesh.num_cells(), 4);
        assert_eq!(mesh.cell_kind(CellId::new(2)), CellKind::Polygon);
        assert_eq!(mesh.cell_points(CellId::new(2)), &[p[1], p[4]]);
        assert_eq!(mesh.cell_kind(CellId::new(3)), CellKind::Triangle);
        assert_eq!(
            mesh.cell_data().get("tag").map(|a| a.data().clone()),
            Some(ArrayData::Int32(vec![1, 2, 3, 4]))
        );
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_append_offsets_points() {
        let a = quad_with_tail();
        let b = quad_with_tail();
        let merged = PolyMesh::append(&[&a, &b]);

        assert_eq!(merged.num_points(), 10);
        assert_eq!(merged.num_cells(), 4);
        assert_eq!(merged.cell_points(CellId::new(3)), &[PointId::new(6), PointId::new(9)]);
        assert_eq!(merged.points().precision(), Precision::Double);
    }
}
