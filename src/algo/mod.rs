//! Connectivity algorithms.
//!
//! - **Adjacency**: point-sharing and edge-sharing cell neighbors
//! - **Normals**: per-cell normals by Newell's method
//! - **Regions**: flood-fill segmentation into smooth patches
//! - **Split**: duplicating points along sharp edges
//!
//! Long-running operations accept an optional [`Progress`] reporter and
//! [`CancelToken`].

pub mod adjacency;
pub mod normals;
pub mod progress;
pub mod regions;
pub mod split;

pub use progress::{CancelToken, Progress};
pub use regions::{
    generate_region_ids, label_regions, RegionLabels, RegionOptions, RegionSegmentation,
};
pub use split::{split_sharp_edges, PointsPrecision, SplitOptions, SplitResult, SplitStats};
