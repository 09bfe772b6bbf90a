//! Upward links from points to the cells that use them.
//!
//! Links turn a cell list into a structure that can answer "which cells use
//! this point", which every neighborhood query here is built on.

use super::cell::{CellArray, CellKind};
use super::index::{CellId, MeshIndex, PointId};
use super::polydata::PolyMesh;

/// Point-to-cell incidence in compressed form.
///
/// The cells of each point are stored in ascending id order, so traversals
/// that follow the links are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLinks<I: MeshIndex = u32> {
    offsets: Vec<usize>,
    cells: Vec<CellId<I>>,
}

impl<I: MeshIndex> CellLinks<I> {
    /// Build links for `num_points` points from a cell array.
    pub fn build(num_points: usize, cells: &CellArray<I>) -> Self {
        let mut counts = vec![0usize; num_points + 1];
        for (_, pts) in cells.iter() {
            for p in pts {
                counts[p.index() + 1] += 1;
            }
        }
        for i in 0..num_points {
            counts[i + 1] += counts[i];
        }

        let offsets = counts.clone();
        let mut cursor = counts;
        let mut links = vec![CellId::invalid(); cells.connectivity_len()];
        for (c, (_, pts)) in cells.iter().enumerate() {
            for p in pts {
                let slot = &mut cursor[p.index()];
                links[*slot] = CellId::new(c);
                *slot += 1;
            }
        }

        Self {
            offsets,
            cells: links,
        }
    }

    /// Number of points covered.
    pub fn num_points(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Cells using point `p`.
    ///
    /// A cell that repeats `p` appears once per repetition.
    #[inline]
    pub fn cells(&self, p: PointId<I>) -> &[CellId<I>] {
        let i = p.index();
        &self.cells[self.offsets[i]..self.offsets[i + 1]]
    }
}

/// Read-only topology queries over a mesh with built links.
///
/// Obtained from [`PolyMesh::topology`].
#[derive(Debug, Clone, Copy)]
pub struct Topology<'a, I: MeshIndex = u32> {
    mesh: &'a PolyMesh<I>,
    links: &'a CellLinks<I>,
}

impl<'a, I: MeshIndex> Topology<'a, I> {
    pub(crate) fn new(mesh: &'a PolyMesh<I>, links: &'a CellLinks<I>) -> Self {
        Self { mesh, links }
    }

    /// The underlying mesh.
    pub fn mesh(&self) -> &'a PolyMesh<I> {
        self.mesh
    }

    /// Number of points.
    pub fn num_points(&self) -> usize {
        self.mesh.num_points()
    }

    /// Number of cells.
    pub fn num_cells(&self) -> usize {
        self.mesh.num_cells()
    }

    /// Cells incident to a point.
    #[inline]
    pub fn point_cells(&self, p: PointId<I>) -> &'a [CellId<I>] {
        self.links.cells(p)
    }

    /// Points of a cell in cyclic order.
    #[inline]
    pub fn cell_points(&self, c: CellId<I>) -> &'a [PointId<I>] {
        self.mesh.cell_points(c)
    }

    /// Kind of a cell.
    #[inline]
    pub fn cell_kind(&self, c: CellId<I>) -> CellKind {
        self.mesh.cell_kind(c)
    }

    /// Every cell other than `cell` that uses both `a` and `b`, once each, in
    /// the link order of `a`.
    pub fn edge_cells(
        &self,
        cell: CellId<I>,
        a: PointId<I>,
        b: PointId<I>,
    ) -> impl Iterator<Item = CellId<I>> + 'a {
        let links = self.links;
        let around_b = links.cells(b);
        let mut last = None;
        links.cells(a).iter().copied().filter(move |&c| {
            // Links are sorted, so a cell repeating `a` shows up in a run.
            let repeat = last == Some(c);
            last = Some(c);
            !repeat && c != cell && around_b.contains(&c)
        })
    }

    /// Collect every cell other than `cell` that uses both `a` and `b`.
    ///
    /// `out` is cleared first. Results follow the link order of `a`.
    pub fn cell_edge_neighbors(
        &self,
        cell: CellId<I>,
        a: PointId<I>,
        b: PointId<I>,
        out: &mut Vec<CellId<I>>,
    ) {
        out.clear();
        out.extend(self.edge_cells(cell, a, b));
    }
}
