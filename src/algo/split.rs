//! Sharp-edge splitting.
//!
//! Disconnects a polygonal surface wherever adjacent cells meet at more than a
//! feature angle, by giving the cells on each side of such an edge their own
//! copies of the edge's points. Cell geometry is unchanged; only connectivity
//! and the point count change, and duplicated points sit exactly on their
//! originals.
//!
//! # Algorithm
//!
//! The work is split per point. For a point `P` used by more than one polygon,
//! its fan of incident cells is partitioned into angularly consistent groups:
//!
//! 1. Pick an unvisited fan cell as a seed and give it the next local region
//!    number.
//! 2. From the seed, walk across each of its two edges that touch `P`. A step
//!    across an edge is taken only when exactly one other polygon uses the
//!    edge, that polygon is unvisited, and the dot product of the two cell
//!    normals exceeds `cos(feature_angle)`. The walk continues from the new
//!    cell across its other edge touching `P`.
//! 3. Repeat until every fan cell has a region.
//!
//! When more than one region results, each region after the first gets a new
//! copy of `P`, and the cells of that region are rewired to use it.
//!
//! The per-point marking runs in parallel with [`rayon`]; each worker owns a
//! fan walker with its own scratch buffer. New point ids are then assigned
//! by one sequential pass in point order, so the output does not depend on the
//! number of threads.
//!
//! # Example
//!
//! ```
//! use patchwork::algo::split::{split_sharp_edges, SplitOptions};
//! use patchwork::source::CubeSource;
//!
//! let cube = CubeSource::default().build::<u32>();
//! let options = SplitOptions::default().with_feature_angle(45.0);
//! let result = split_sharp_edges(&cube, &options).unwrap();
//!
//! // Each corner now has one copy per face.
//! assert_eq!(result.mesh.num_points(), 24);
//! assert_eq!(result.mesh.num_cells(), 6);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::mesh::{CellId, MeshIndex, PointId, PolyMesh, Precision, Topology};

use super::adjacency::{edge_neighbor, EdgeNeighbor};
use super::normals::{cell_normals_or_compute, NewellNormals};
use super::{CancelToken, Progress};

/// Tag for a fan cell not yet assigned to a local region.
const UNVISITED: i32 = -1;

/// Precision of the output point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointsPrecision {
    /// Keep the precision of the input points.
    #[default]
    Default,
    /// Store output points as `f32`.
    Single,
    /// Store output points as `f64`.
    Double,
}

/// Options for [`split_sharp_edges`].
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Angle in degrees between neighboring cell normals above which their
    /// shared edge is considered sharp. Clamped to `[0, 180]`.
    pub feature_angle: f64,

    /// Precision of the output points.
    pub precision: PointsPrecision,

    /// Whether to mark point fans in parallel (default: true).
    pub parallel: bool,

    /// Number of points handled between cancellation checks.
    pub chunk_size: usize,

    /// Optional cancellation token, polled once per chunk.
    pub cancel: Option<CancelToken>,

    /// Optional progress reporter.
    pub progress: Option<Arc<Progress>>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            feature_angle: 30.0,
            precision: PointsPrecision::Default,
            parallel: true,
            chunk_size: 1024,
            cancel: None,
            progress: None,
        }
    }
}

impl SplitOptions {
    /// Set the feature angle in degrees, clamped to `[0, 180]`.
    pub fn with_feature_angle(mut self, degrees: f64) -> Self {
        self.feature_angle = degrees.clamp(0.0, 180.0);
        self
    }

    /// Set the output point precision.
    pub fn with_precision(mut self, precision: PointsPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the number of points per work chunk.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Attach a progress reporter.
    pub fn with_progress(mut self, progress: Arc<Progress>) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Counters describing a split run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Points that received at least one duplicate.
    pub points_split: usize,
    /// Duplicate points created.
    pub points_added: usize,
    /// Polygon cells with fewer than three points, left out of every fan.
    pub degenerate_cells: usize,
    /// Fan walks stopped by an edge shared with two or more other polygons.
    pub non_manifold_stops: usize,
}

/// Output of [`split_sharp_edges`].
#[derive(Debug, Clone)]
pub struct SplitResult<I: MeshIndex = u32> {
    /// The split mesh.
    pub mesh: PolyMesh<I>,
    /// Original point of each duplicate: point `n + k` of the output, where
    /// `n` is the input point count, copies `point_map[k]`.
    pub point_map: Vec<PointId<I>>,
    /// Run counters.
    pub stats: SplitStats,
}

impl<I: MeshIndex> SplitResult<I> {
    fn unchanged(mesh: PolyMesh<I>) -> Self {
        Self {
            mesh,
            point_map: Vec::new(),
            stats: SplitStats::default(),
        }
    }

    /// The input point a given output point was copied from.
    pub fn original_point(&self, p: PointId<I>) -> PointId<I> {
        let first_new = self.mesh.num_points() - self.point_map.len();
        match p.index().checked_sub(first_new) {
            Some(k) => self.point_map[k],
            None => p,
        }
    }
}

/// Split a mesh along its sharp edges.
///
/// Returns the input unchanged when it has no points, and an unmodified copy
/// when it has no polygons or strips. Otherwise strips are decomposed into
/// triangles first, then points are duplicated as described in the
/// [module documentation](self). Point attributes of each duplicate are copied
/// from its original; cell attributes are untouched.
///
/// Existing cell normals of the input are used when present; otherwise they
/// are computed but not attached to the output.
///
/// # Errors
///
/// - [`MeshError::InvalidInput`] / [`MeshError::InvalidPointIndex`] for a
///   structurally invalid mesh.
/// - [`MeshError::InvalidParameter`] for a NaN feature angle.
/// - [`MeshError::Cancelled`] if the cancel token fires during marking.
pub fn split_sharp_edges<I: MeshIndex>(
    input: &PolyMesh<I>,
    options: &SplitOptions,
) -> Result<SplitResult<I>> {
    if options.feature_angle.is_nan() {
        return Err(MeshError::invalid_param(
            "feature_angle",
            options.feature_angle,
            "must be a number",
        ));
    }
    if input.num_points() == 0 {
        log::trace!("split_sharp_edges: no points, nothing to do");
        return Ok(SplitResult::unchanged(input.clone()));
    }
    if input.num_polygons() == 0 {
        log::trace!("split_sharp_edges: no polygons, passing input through");
        return Ok(SplitResult::unchanged(input.clone()));
    }
    if let Err(e) = input.validate() {
        log::warn!("split_sharp_edges: rejecting input: {}", e);
        return Err(e);
    }

    let mut mesh = input.clone();
    mesh.triangulate_strips();
    mesh.build_links();
    let normals = cell_normals_or_compute(&mesh, &NewellNormals);

    let (fans, mut stats) = {
        let topology = mesh.topology()?;
        let context = FanContext::new(topology, &normals, options.feature_angle);
        let stats = SplitStats {
            degenerate_cells: context.degenerate_cells(),
            ..SplitStats::default()
        };
        (mark_fans(&context, options)?, stats)
    };

    if let Some(progress) = &options.progress {
        progress.report_sub(0, 1, 1, 2, "Duplicating split points");
    }

    let point_map = merge_fans(&mut mesh, &fans, &mut stats);

    mesh.points.extend_duplicates(&point_map);
    let originals: Vec<usize> = point_map.iter().map(|p| p.index()).collect();
    mesh.point_data.extend_gathered(&originals);
    mesh.links = None;
    match options.precision {
        PointsPrecision::Default => {}
        PointsPrecision::Single => mesh.set_precision(Precision::Single),
        PointsPrecision::Double => mesh.set_precision(Precision::Double),
    }

    if let Some(progress) = &options.progress {
        progress.report_sub(1, 1, 1, 2, "Duplicating split points");
    }
    log::debug!(
        "split_sharp_edges: {} of {} points split, {} added (feature angle {} deg)",
        stats.points_split,
        input.num_points(),
        stats.points_added,
        options.feature_angle.clamp(0.0, 180.0)
    );

    Ok(SplitResult {
        mesh,
        point_map,
        stats,
    })
}

/// Phase 1: mark every point's fan, one result slot per point in id order.
fn mark_fans<I: MeshIndex>(
    context: &FanContext<'_, I>,
    options: &SplitOptions,
) -> Result<Vec<FanResult<I>>> {
    let num_points = context.topology.num_points();
    let chunk_size = options.chunk_size.max(1);
    let num_chunks = num_points.div_ceil(chunk_size);
    let done = AtomicUsize::new(0);

    let run_chunk = |walker: &mut FanWalker<'_, I>, chunk: usize| -> Result<Vec<FanResult<I>>> {
        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(MeshError::Cancelled);
        }
        let start = chunk * chunk_size;
        let end = (start + chunk_size).min(num_points);
        let results = (start..end).map(|p| walker.mark(PointId::new(p))).collect();

        if let Some(progress) = &options.progress {
            let finished = done.fetch_add(end - start, Ordering::Relaxed) + (end - start);
            progress.report_sub(finished, num_points, 0, 2, "Marking point fans");
        }
        Ok(results)
    };

    let chunks: Vec<Vec<FanResult<I>>> = if options.parallel {
        // One walker per job; each job takes a contiguous run of chunks.
        let per_job = num_chunks.div_ceil(rayon::current_num_threads().max(1)).max(1);
        let jobs = num_chunks.div_ceil(per_job);
        (0..jobs)
            .into_par_iter()
            .map(|job| {
                let mut walker = FanWalker::new(context);
                let first = job * per_job;
                (first..(first + per_job).min(num_chunks))
                    .map(|chunk| run_chunk(&mut walker, chunk))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect()
    } else {
        let mut walker = FanWalker::new(context);
        (0..num_chunks)
            .map(|chunk| run_chunk(&mut walker, chunk))
            .collect::<Result<_>>()?
    };

    if let Some(cancel) = &options.cancel {
        if cancel.is_cancelled() {
            return Err(MeshError::Cancelled);
        }
    }

    Ok(chunks.into_iter().flatten().collect())
}

/// Phase 2: assign new point ids in point order and rewire the tagged cells.
///
/// Returns the original point of each new point.
fn merge_fans<I: MeshIndex>(
    mesh: &mut PolyMesh<I>,
    fans: &[FanResult<I>],
    stats: &mut SplitStats,
) -> Vec<PointId<I>> {
    let first_new = mesh.num_points();
    let mut point_map: Vec<PointId<I>> = Vec::new();

    for (index, fan) in fans.iter().enumerate() {
        stats.non_manifold_stops += fan.non_manifold_stops;
        if fan.regions <= 1 {
            continue;
        }

        let p = PointId::new(index);
        let base = first_new + point_map.len();
        point_map.extend(std::iter::repeat(p).take(fan.regions as usize - 1));
        for &(cell, region) in &fan.tagged {
            mesh.replace_cell_point(cell, p, PointId::new(base + region as usize - 1));
        }
        stats.points_split += 1;
    }

    stats.points_added = point_map.len();
    point_map
}

/// Outcome of marking one point's fan.
#[derive(Debug, Clone, Default)]
struct FanResult<I: MeshIndex> {
    /// Number of local regions; 0 or 1 means the point stays whole.
    regions: u32,
    /// Fan cells in regions after the first, with their region, in fan order.
    tagged: Vec<(CellId<I>, u32)>,
    /// Walks stopped at a non-manifold edge.
    non_manifold_stops: usize,
}

/// Read-only state shared by all workers.
struct FanContext<'a, I: MeshIndex> {
    topology: Topology<'a, I>,
    normals: &'a [Vector3<f64>],
    cos_threshold: f64,
    /// Whether a cell may take part in a fan: a polygon with at least 3 points.
    in_fan: Vec<bool>,
}

impl<'a, I: MeshIndex> FanContext<'a, I> {
    fn new(topology: Topology<'a, I>, normals: &'a [Vector3<f64>], feature_angle: f64) -> Self {
        let in_fan = topology
            .mesh()
            .cell_ids()
            .map(|c| topology.cell_kind(c).is_polygonal() && topology.cell_points(c).len() >= 3)
            .collect();
        Self {
            topology,
            normals,
            cos_threshold: feature_angle.clamp(0.0, 180.0).to_radians().cos(),
            in_fan,
        }
    }

    fn degenerate_cells(&self) -> usize {
        self.topology
            .mesh()
            .cell_ids()
            .filter(|&c| self.topology.cell_kind(c).is_polygonal() && !self.in_fan[c.index()])
            .count()
    }
}

/// Per-worker fan marker.
///
/// Holds a tag buffer sized to the cell count, allocated once and reset over
/// the fan cells only at the start of each point.
struct FanWalker<'a, I: MeshIndex = u32> {
    context: &'a FanContext<'a, I>,
    tags: Vec<i32>,
    fan: Vec<CellId<I>>,
}

impl<'a, I: MeshIndex> FanWalker<'a, I> {
    fn new(context: &'a FanContext<'a, I>) -> Self {
        Self {
            context,
            tags: vec![UNVISITED; context.topology.num_cells()],
            fan: Vec::new(),
        }
    }

    /// Partition the fan of `p` into local regions.
    fn mark(&mut self, p: PointId<I>) -> FanResult<I> {
        let ctx = self.context;
        let topology = &ctx.topology;
        let in_fan = |c: CellId<I>| ctx.in_fan[c.index()];

        self.fan.clear();
        self.fan
            .extend(topology.point_cells(p).iter().copied().filter(|&c| in_fan(c)));
        self.fan.dedup();
        if self.fan.len() <= 1 {
            return FanResult::default();
        }

        for c in &self.fan {
            self.tags[c.index()] = UNVISITED;
        }

        let mut result = FanResult::default();
        let mut region: i32 = 0;
        for i in 0..self.fan.len() {
            let seed = self.fan[i];
            if self.tags[seed.index()] != UNVISITED {
                continue;
            }
            self.tags[seed.index()] = region;

            let (next, prev) = ring_neighbors(topology.cell_points(seed), p);
            for start in [next, prev] {
                let mut current = seed;
                let mut across = start;
                loop {
                    let neighbor = match edge_neighbor(topology, current, p, across, in_fan) {
                        EdgeNeighbor::Manifold(c) => c,
                        EdgeNeighbor::NonManifold(_) => {
                            result.non_manifold_stops += 1;
                            break;
                        }
                        EdgeNeighbor::Boundary => break,
                    };
                    if self.tags[neighbor.index()] != UNVISITED {
                        break;
                    }
                    let similarity =
                        ctx.normals[current.index()].dot(&ctx.normals[neighbor.index()]);
                    if similarity <= ctx.cos_threshold {
                        break;
                    }

                    self.tags[neighbor.index()] = region;
                    let (a, b) = ring_neighbors(topology.cell_points(neighbor), p);
                    across = if a == across { b } else { a };
                    current = neighbor;
                }
            }
            region += 1;
        }

        result.regions = region as u32;
        if region > 1 {
            result.tagged = self
                .fan
                .iter()
                .filter(|c| self.tags[c.index()] > 0)
                .map(|&c| (c, self.tags[c.index()] as u32))
                .collect();
        }
        result
    }
}

/// The points after and before the first occurrence of `p` in a cell ring.
fn ring_neighbors<I: MeshIndex>(ring: &[PointId<I>], p: PointId<I>) -> (PointId<I>, PointId<I>) {
    let n = ring.len();
    let s = ring.iter().position(|&q| q == p).unwrap_or(0);
    (ring[(s + 1) % n], ring[(s + n - 1) % n])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::normals::NormalProvider;
    use crate::mesh::{build_from_triangles, ArrayData, CellKind, DataArray, PolyMesh};
    use crate::source::{CubeSource, CylinderSource, SphereSource, TorusSource};
    use nalgebra::Point3;
    use std::collections::HashSet;

    fn split(mesh: &PolyMesh, angle: f64) -> SplitResult {
        let options = SplitOptions::default().with_feature_angle(angle);
        split_sharp_edges(mesh, &options).unwrap()
    }

    fn point_count(mesh: &PolyMesh, angle: f64) -> usize {
        split(mesh, angle).mesh.num_points()
    }

    #[test]
    fn test_cube_corners_split_per_face() {
        let cube: PolyMesh = CubeSource::default().build();
        let result = split(&cube, 45.0);

        assert_eq!(result.mesh.num_points(), 24);
        assert_eq!(result.mesh.num_cells(), 6);
        assert_eq!(result.stats.points_split, 8);
        assert_eq!(result.stats.points_added, 16);

        let mut seen = HashSet::new();
        for c in result.mesh.cell_ids() {
            let pts = result.mesh.cell_points(c);
            assert_eq!(pts.len(), 4);
            for &p in pts {
                assert!(seen.insert(p), "point {:?} shared between faces", p);
            }
        }
        assert!(result.mesh.validate().is_ok());
    }

    #[test]
    fn test_cube_not_split_above_right_angle() {
        let cube: PolyMesh = CubeSource::default().build();
        let result = split(&cube, 100.0);
        assert_eq!(result.mesh.num_points(), 8);
        assert!(result.point_map.is_empty());
        assert_eq!(result.mesh.cells(), cube.cells());
    }

    #[test]
    fn test_duplicates_sit_on_originals() {
        let cube: PolyMesh = CubeSource::default().build();
        let result = split(&cube, 45.0);

        for p in result.mesh.point_ids() {
            let original = result.original_point(p);
            assert!(original.index() < 8);
            assert_eq!(result.mesh.position(p), cube.position(original));
        }
    }

    #[test]
    fn test_known_point_counts() {
        let cylinder: PolyMesh = CylinderSource::default().build();
        assert_eq!(point_count(&cylinder, 30.0), 36);
        assert_eq!(point_count(&cylinder, 70.0), 24);

        let sphere: PolyMesh = SphereSource::default().build();
        assert_eq!(point_count(&sphere, 20.0), 178);
        assert_eq!(point_count(&sphere, 30.0), 66);
        assert_eq!(point_count(&sphere, 60.0), 50);

        let torus: PolyMesh = TorusSource::default().build();
        assert_eq!(point_count(&torus, 30.0), 256);
        assert_eq!(point_count(&torus, 50.0), 128);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sphere: PolyMesh = SphereSource::default().with_resolution(24, 18).build();
        let parallel = SplitOptions::default().with_chunk_size(7);
        let sequential = parallel.clone().sequential();

        let a = split_sharp_edges(&sphere, &parallel).unwrap();
        let b = split_sharp_edges(&sphere, &sequential).unwrap();
        assert_eq!(a.mesh, b.mesh);
        assert_eq!(a.point_map, b.point_map);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_uneven_jobs_match_sequential() {
        let torus: PolyMesh = TorusSource::default().build();
        let options = SplitOptions::default().with_feature_angle(30.0).with_chunk_size(1);
        let sequential = split_sharp_edges(&torus, &options.clone().sequential()).unwrap();

        // Three workers over 128 single-point chunks leave a short last job.
        let pool = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();
        let parallel = pool.install(|| split_sharp_edges(&torus, &options)).unwrap();

        assert_eq!(parallel.mesh, sequential.mesh);
        assert_eq!(parallel.point_map, sequential.point_map);
        assert_eq!(parallel.mesh.num_points(), 256);
    }

    #[test]
    fn test_cell_normals_preserved() {
        let sphere: PolyMesh = SphereSource::default().build();
        let result = split(&sphere, 20.0);

        let before = NewellNormals.cell_normals(&sphere);
        let after = NewellNormals.cell_normals(&result.mesh);
        assert_eq!(before, after);
    }

    #[test]
    fn test_trivial_inputs_pass_through() {
        let empty: PolyMesh = PolyMesh::new();
        let result = split(&empty, 30.0);
        assert_eq!(result.mesh, empty);

        let mut cloud: PolyMesh = PolyMesh::new();
        let a = cloud.add_point(Point3::origin());
        let b = cloud.add_point(Point3::new(1.0, 0.0, 0.0));
        cloud.add_cell(CellKind::Vertex, &[a]);
        cloud.add_cell(CellKind::Line, &[a, b]);
        let result = split(&cloud, 30.0);
        assert_eq!(result.mesh, cloud);
        assert_eq!(result.mesh.num_points(), 2);
    }

    #[test]
    fn test_non_manifold_edge_stops_walk() {
        // Three coplanar triangles hinged on edge (0, 1).
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 2.0, 0.0),
            Point3::new(0.5, 3.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [0, 1, 3], [0, 1, 4]];
        let mesh: PolyMesh = build_from_triangles(&vertices, &faces).unwrap();
        let result = split(&mesh, 30.0);

        assert_eq!(result.mesh.num_points(), 9);
        assert_eq!(result.stats.points_split, 2);
        assert_eq!(result.stats.non_manifold_stops, 6);
    }

    #[test]
    fn test_degenerate_and_line_cells_keep_points() {
        let mut cube: PolyMesh = CubeSource::default().build();
        let sliver = cube.add_cell(CellKind::Polygon, &[PointId::new(0), PointId::new(1)]);
        let line = cube.add_cell(CellKind::Line, &[PointId::new(0), PointId::new(6)]);
        let result = split(&cube, 45.0);

        assert_eq!(result.stats.degenerate_cells, 1);
        assert_eq!(result.mesh.num_points(), 24);
        let ids = |a: usize, b: usize| -> [PointId; 2] { [PointId::new(a), PointId::new(b)] };
        assert_eq!(result.mesh.cell_points(sliver), ids(0, 1));
        assert_eq!(result.mesh.cell_points(line), ids(0, 6));
    }

    #[test]
    fn test_short_strip_counts_as_degenerate() {
        let mut cube: PolyMesh = CubeSource::default().build();
        let strip = cube.add_cell(CellKind::TriangleStrip, &[PointId::new(2), PointId::new(3)]);
        let result = split(&cube, 45.0);

        assert_eq!(result.mesh.num_cells(), cube.num_cells());
        assert_eq!(result.stats.degenerate_cells, 1);
        assert_eq!(result.mesh.num_points(), 24);
        assert_eq!(result.mesh.cell_kind(strip), CellKind::Polygon);
        assert_eq!(result.mesh.cell_points(strip), &[PointId::new(2), PointId::new(3)]);
    }

    #[test]
    fn test_point_data_follows_duplicates() {
        let mut cube: PolyMesh = CubeSource::default().build();
        cube.point_data_mut().insert(DataArray::new(
            "id",
            1,
            ArrayData::Int32((0..8).collect()),
        ));
        let result = split(&cube, 45.0);

        let ids = result.mesh.point_data().get("id").unwrap();
        assert_eq!(ids.num_tuples(), 24);
        for p in result.mesh.point_ids() {
            assert_eq!(ids.component(p.index(), 0) as usize, result.original_point(p).index());
        }
    }

    #[test]
    fn test_output_precision() {
        let cube: PolyMesh = CubeSource::default().build();
        assert_eq!(
            split(&cube, 45.0).mesh.points().precision(),
            Precision::Double
        );

        let single = SplitOptions::default().with_precision(PointsPrecision::Single);
        let result = split_sharp_edges(&cube, &single).unwrap();
        assert_eq!(result.mesh.points().precision(), Precision::Single);

        let mut narrow = cube.clone();
        narrow.set_precision(Precision::Single);
        let result = split(&narrow, 45.0);
        assert_eq!(result.mesh.points().precision(), Precision::Single);
    }

    #[test]
    fn test_cancelled_before_start() {
        let sphere: PolyMesh = SphereSource::default().build();
        let cancel = CancelToken::new();
        cancel.cancel();
        let options = SplitOptions::default().with_cancel(cancel);
        assert!(matches!(
            split_sharp_edges(&sphere, &options),
            Err(MeshError::Cancelled)
        ));
    }

    #[test]
    fn test_progress_reaches_end() {
        let last = Arc::new(AtomicUsize::new(0));
        let sink = last.clone();
        let progress = Progress::new(move |current, total, _| {
            if current == total {
                sink.fetch_add(1, Ordering::Relaxed);
            }
        });
        let options = SplitOptions::default().with_progress(Arc::new(progress));
        let sphere: PolyMesh = SphereSource::default().build();
        split_sharp_edges(&sphere, &options).unwrap();
        assert_eq!(last.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_ring_neighbors() {
        let ring: Vec<PointId> = [4, 7, 9, 2].iter().map(|&i| PointId::new(i)).collect();
        assert_eq!(
            ring_neighbors(&ring, PointId::new(4)),
            (PointId::new(7), PointId::new(2))
        );
        assert_eq!(
            ring_neighbors(&ring, PointId::new(2)),
            (PointId::new(4), PointId::new(9))
        );
    }
}
