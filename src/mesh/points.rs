//! Point coordinate storage.
//!
//! Coordinates are kept at the precision they were created with. Readers
//! always see `f64`; conversion happens only on explicit request.

use nalgebra::Point3;

use super::index::{MeshIndex, PointId};

/// Floating point precision of stored coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// 32-bit coordinates.
    Single,
    /// 64-bit coordinates.
    Double,
}

/// Point coordinates at single or double precision.
#[derive(Debug, Clone, PartialEq)]
pub enum Points {
    /// Single precision storage.
    Single(Vec<Point3<f32>>),
    /// Double precision storage.
    Double(Vec<Point3<f64>>),
}

impl Default for Points {
    fn default() -> Self {
        Points::Double(Vec::new())
    }
}

impl Points {
    /// Create empty storage of the given precision.
    pub fn new(precision: Precision) -> Self {
        Self::with_capacity(precision, 0)
    }

    /// Create empty storage with room for `capacity` points.
    pub fn with_capacity(precision: Precision, capacity: usize) -> Self {
        match precision {
            Precision::Single => Points::Single(Vec::with_capacity(capacity)),
            Precision::Double => Points::Double(Vec::with_capacity(capacity)),
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Points::Single(v) => v.len(),
            Points::Double(v) => v.len(),
        }
    }

    /// Whether there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage precision.
    pub fn precision(&self) -> Precision {
        match self {
            Points::Single(_) => Precision::Single,
            Points::Double(_) => Precision::Double,
        }
    }

    /// Coordinates of point `i`, widened to `f64`.
    #[inline]
    pub fn get(&self, i: usize) -> Point3<f64> {
        match self {
            Points::Single(v) => v[i].cast::<f64>(),
            Points::Double(v) => v[i],
        }
    }

    /// Append a point, narrowing if the storage is single precision.
    pub fn push(&mut self, p: Point3<f64>) {
        match self {
            Points::Single(v) => v.push(p.cast::<f32>()),
            Points::Double(v) => v.push(p),
        }
    }

    /// Iterate over all coordinates as `f64`.
    pub fn iter(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Convert to the requested precision, consuming `self`.
    pub fn to_precision(self, precision: Precision) -> Self {
        match (self, precision) {
            (Points::Single(v), Precision::Double) => {
                Points::Double(v.iter().map(|p| p.cast::<f64>()).collect())
            }
            (Points::Double(v), Precision::Single) => {
                Points::Single(v.iter().map(|p| p.cast::<f32>()).collect())
            }
            (same, _) => same,
        }
    }

    /// Append one copy of each point listed in `originals`, in order.
    ///
    /// Copies are bit-identical to their originals in the storage precision.
    pub fn extend_duplicates<I: MeshIndex>(&mut self, originals: &[PointId<I>]) {
        match self {
            Points::Single(v) => {
                v.reserve(originals.len());
                for p in originals {
                    let copy = v[p.index()];
                    v.push(copy);
                }
            }
            Points::Double(v) => {
                v.reserve(originals.len());
                for p in originals {
                    let copy = v[p.index()];
                    v.push(copy);
                }
            }
        }
    }
}
