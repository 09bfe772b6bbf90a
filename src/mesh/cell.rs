//! Cell storage.
//!
//! All cell types share one representation: an ordered sequence of point ids.
//! The [`CellKind`] tag is kept alongside so strips can be decomposed and
//! vertex/line cells can be told apart from polygons. Algorithms never branch
//! on the kind beyond [`CellKind::is_polygonal`].

use super::index::{CellId, MeshIndex, PointId};

/// The kind of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// A single point.
    Vertex,
    /// A set of points.
    PolyVertex,
    /// A two-point segment.
    Line,
    /// A connected chain of segments.
    PolyLine,
    /// A three-point polygon.
    Triangle,
    /// A four-point polygon.
    Quad,
    /// A general planar polygon.
    Polygon,
    /// A triangle strip; `n` points describe `n - 2` triangles.
    TriangleStrip,
}

impl CellKind {
    /// Whether the cell is a polygon (triangle, quad or general polygon).
    #[inline]
    pub fn is_polygonal(self) -> bool {
        matches!(self, CellKind::Triangle | CellKind::Quad | CellKind::Polygon)
    }

    /// Whether the cell is a triangle strip.
    #[inline]
    pub fn is_strip(self) -> bool {
        self == CellKind::TriangleStrip
    }

    /// The polygon kind for a ring of `n` points.
    pub fn polygon_for(n: usize) -> CellKind {
        match n {
            3 => CellKind::Triangle,
            4 => CellKind::Quad,
            _ => CellKind::Polygon,
        }
    }
}

/// Compressed cell connectivity.
///
/// Cell `c` uses `connectivity[offsets[c]..offsets[c + 1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CellArray<I: MeshIndex = u32> {
    offsets: Vec<usize>,
    connectivity: Vec<PointId<I>>,
    kinds: Vec<CellKind>,
}

impl<I: MeshIndex> Default for CellArray<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> CellArray<I> {
    /// Create an empty cell array.
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create an empty cell array with room for `cells` cells using
    /// `connectivity` point references in total.
    pub fn with_capacity(cells: usize, connectivity: usize) -> Self {
        let mut offsets = Vec::with_capacity(cells + 1);
        offsets.push(0);
        Self {
            offsets,
            connectivity: Vec::with_capacity(connectivity),
            kinds: Vec::with_capacity(cells),
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether there are no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Total number of point references.
    #[inline]
    pub fn connectivity_len(&self) -> usize {
        self.connectivity.len()
    }

    /// Append a cell and return its id.
    pub fn push(&mut self, kind: CellKind, points: &[PointId<I>]) -> CellId<I> {
        let id = CellId::new(self.kinds.len());
        self.connectivity.extend_from_slice(points);
        self.offsets.push(self.connectivity.len());
        self.kinds.push(kind);
        id
    }

    /// Points of a cell, in the cell's cyclic order.
    #[inline]
    pub fn cell(&self, id: CellId<I>) -> &[PointId<I>] {
        let c = id.index();
        &self.connectivity[self.offsets[c]..self.offsets[c + 1]]
    }

    /// Kind of a cell.
    #[inline]
    pub fn kind(&self, id: CellId<I>) -> CellKind {
        self.kinds[id.index()]
    }

    /// Replace every reference to `old` in cell `id` with `new`.
    ///
    /// Returns the number of references replaced.
    pub fn replace_point(&mut self, id: CellId<I>, old: PointId<I>, new: PointId<I>) -> usize {
        let c = id.index();
        let mut replaced = 0;
        for p in &mut self.connectivity[self.offsets[c]..self.offsets[c + 1]] {
            if *p == old {
                *p = new;
                replaced += 1;
            }
        }
        replaced
    }

    /// Iterate over `(kind, points)` for every cell.
    pub fn iter(&self) -> impl Iterator<Item = (CellKind, &[PointId<I>])> + '_ {
        self.kinds
            .iter()
            .zip(self.offsets.windows(2))
            .map(move |(&kind, w)| (kind, &self.connectivity[w[0]..w[1]]))
    }
}
