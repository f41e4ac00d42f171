use std::sync::mpsc;
use std::thread;

use rayon::prelude::*;
use rayon::ThreadPool;

use lloyd_core::{squared_distance, LloydError, Result, Vector};

/// Index of the nearest centroid. Ties go to the lowest index.
pub fn nearest_centroid(point: &[f64], centroids: &[Vector]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }
    best_idx
}

/// Assignment phase: write the nearest centroid of every point into
/// `assignments`.
///
/// One unit of work per point runs on `pool`; each sends `(point, cluster)`
/// to a collector on the calling thread, which owns the table for the
/// duration of the phase. `centroids` is only read. Returns the number of
/// points whose cluster changed.
pub fn assign_points(
    pool: &ThreadPool,
    data: &[Vector],
    centroids: &[Vector],
    assignments: &mut [usize],
    channel_capacity: usize,
) -> Result<usize> {
    let n = data.len();
    debug_assert_eq!(assignments.len(), n);

    let (tx, rx) = mpsc::sync_channel::<(usize, usize)>(channel_capacity);

    let (received, changed) = thread::scope(|s| {
        let producer = s.spawn(move || {
            pool.install(|| {
                data.par_iter()
                    .enumerate()
                    .for_each_with(tx, |tx, (i, point)| {
                        // The collector only hangs up after every sender is gone.
                        let _ = tx.send((i, nearest_centroid(point, centroids)));
                    });
            });
        });

        let mut received = 0usize;
        let mut changed = 0usize;
        for (i, cluster) in rx {
            if assignments[i] != cluster {
                assignments[i] = cluster;
                changed += 1;
            }
            received += 1;
        }

        producer
            .join()
            .map(|_| (received, changed))
            .map_err(|_| LloydError::WorkerPanicked("assignment".to_string()))
    })?;

    if received != n {
        return Err(LloydError::IncompletePhase {
            phase: "assignment",
            expected: n,
            received,
        });
    }

    Ok(changed)
}
