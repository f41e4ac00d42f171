//! Parallel Lloyd's k-means.
//!
//! Each round runs two phases on a rayon pool. The assignment phase fans out
//! one unit per data point, the update phase one unit per cluster. Units send
//! `(index, value)` pairs over a bounded channel to a collector on the
//! controller thread, and the producer is joined before the phase returns,
//! so every write of round `N` is visible before round `N + 1` starts.

mod assign;
mod controller;
mod init;
mod update;

use serde::Serialize;

use lloyd_core::Vector;

use crate::metrics::RunMetrics;

pub use assign::{assign_points, nearest_centroid};
pub use controller::{IterationController, Phase};
pub use init::{initialize_centroids, make_rng};
pub use update::{mean_of, update_centroids, UpdateOutcome};

/// Result of a full clustering run.
#[derive(Debug, Clone, Serialize)]
pub struct KmeansResult {
    /// Final centroid vectors, indexed by cluster.
    pub centroids: Vec<Vector>,
    /// Cluster index of each point, in input order.
    pub assignments: Vec<usize>,
    /// Number of clusters.
    pub k: usize,
    /// Number of Lloyd's iterations performed.
    pub iterations: usize,
    /// Sum of squared distances from each point to its assigned centroid.
    pub inertia: f64,
    /// Member count per cluster under the final assignment table.
    pub cluster_sizes: Vec<usize>,
    pub metrics: RunMetrics,
}

/// Sum of squared distances of every point to its assigned centroid.
pub fn inertia(data: &[Vector], centroids: &[Vector], assignments: &[usize]) -> f64 {
    data.iter()
        .zip(assignments.iter())
        .map(|(point, &c)| lloyd_core::squared_distance(point, &centroids[c]))
        .sum()
}

/// Member count per cluster.
pub fn cluster_sizes(assignments: &[usize], k: usize) -> Vec<usize> {
    let mut sizes = vec![0usize; k];
    for &c in assignments {
        sizes[c] += 1;
    }
    sizes
}
