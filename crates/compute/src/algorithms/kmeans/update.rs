use std::sync::mpsc;
use std::thread;

use rayon::prelude::*;
use rayon::ThreadPool;

use lloyd_core::{LloydError, Result, Vector};

/// What the update phase observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Clusters that received no points, ascending. Their centroids were
    /// left untouched.
    pub empty: Vec<usize>,
    /// Member count per cluster.
    pub sizes: Vec<usize>,
}

/// Coordinate-wise mean of the selected points, or `None` when `members`
/// is empty.
pub fn mean_of(data: &[Vector], members: &[usize]) -> Option<Vector> {
    let first = *members.first()?;
    let mut sum = vec![0.0; data[first].len()];
    for &i in members {
        for (s, &x) in sum.iter_mut().zip(data[i].iter()) {
            *s += x;
        }
    }
    let count = members.len() as f64;
    for s in sum.iter_mut() {
        *s /= count;
    }
    Some(sum)
}

/// Centroid update phase: replace every non-empty cluster's centroid with
/// the mean of its members.
///
/// Membership lists are derived from `assignments` on the calling thread.
/// One unit of work per cluster then runs on `pool` and sends
/// `(cluster, mean)` to a collector on the calling thread, which owns the
/// centroid table for the duration of the phase. Empty clusters keep their
/// previous centroid and are reported back so the caller can apply its
/// policy.
pub fn update_centroids(
    pool: &ThreadPool,
    data: &[Vector],
    assignments: &[usize],
    centroids: &mut [Vector],
    channel_capacity: usize,
) -> Result<UpdateOutcome> {
    let k = centroids.len();

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, &c) in assignments.iter().enumerate() {
        members[c].push(i);
    }
    let sizes: Vec<usize> = members.iter().map(Vec::len).collect();

    let (tx, rx) = mpsc::sync_channel::<(usize, Option<Vector>)>(channel_capacity);
    let members = &members;

    let (received, mut empty) = thread::scope(|s| {
        let producer = s.spawn(move || {
            pool.install(|| {
                members
                    .par_iter()
                    .enumerate()
                    .for_each_with(tx, |tx, (j, idx)| {
                        let _ = tx.send((j, mean_of(data, idx)));
                    });
            });
        });

        let mut received = 0usize;
        let mut empty = Vec::new();
        for (j, mean) in rx {
            match mean {
                Some(mean) => centroids[j] = mean,
                None => empty.push(j),
            }
            received += 1;
        }

        producer
            .join()
            .map(|_| (received, empty))
            .map_err(|_| LloydError::WorkerPanicked("update".to_string()))
    })?;

    if received != k {
        return Err(LloydError::IncompletePhase {
            phase: "update",
            expected: k,
            received,
        });
    }

    empty.sort_unstable();
    Ok(UpdateOutcome { empty, sizes })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(threads: usize) -> ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn mean_of_members() {
        let data = vec![vec![0.0, 0.0], vec![2.0, 4.0], vec![100.0, 100.0], vec![4.0, 8.0]];
        assert_eq!(mean_of(&data, &[0, 1, 3]), Some(vec![2.0, 4.0]));
        assert_eq!(mean_of(&data, &[2]), Some(vec![100.0, 100.0]));
        assert_eq!(mean_of(&data, &[]), None);
    }

    #[test]
    fn centroids_become_cluster_means() {
        let data = vec![vec![0.0], vec![2.0], vec![10.0], vec![20.0], vec![30.0]];
        let assignments = vec![0, 0, 1, 1, 1];
        let mut centroids = vec![vec![-1.0], vec![-1.0]];

        let outcome = update_centroids(&pool(2), &data, &assignments, &mut centroids, 4).unwrap();

        assert_eq!(centroids, vec![vec![1.0], vec![20.0]]);
        assert!(outcome.empty.is_empty());
        assert_eq!(outcome.sizes, vec![2, 3]);
    }

    #[test]
    fn empty_clusters_keep_previous_centroid() {
        let data = vec![vec![1.0, 1.0], vec![3.0, 3.0]];
        let assignments = vec![1, 1];
        let mut centroids = vec![vec![7.0, 7.0], vec![0.0, 0.0], vec![9.0, 9.0]];

        let outcome = update_centroids(&pool(2), &data, &assignments, &mut centroids, 1).unwrap();

        assert_eq!(outcome.empty, vec![0, 2]);
        assert_eq!(outcome.sizes, vec![0, 2, 0]);
        assert_eq!(centroids, vec![vec![7.0, 7.0], vec![2.0, 2.0], vec![9.0, 9.0]]);
        assert!(centroids.iter().flatten().all(|x| x.is_finite()));
    }

    #[test]
    fn many_clusters_all_reported() {
        let data: Vec<Vector> = (0..200).map(|i| vec![i as f64]).collect();
        let assignments: Vec<usize> = (0..200).map(|i| i % 50).collect();
        let mut centroids = vec![vec![0.0]; 50];

        let outcome = update_centroids(&pool(4), &data, &assignments, &mut centroids, 2).unwrap();

        assert!(outcome.empty.is_empty());
        for (j, c) in centroids.iter().enumerate() {
            // Members of cluster j are j, j+50, j+100, j+150.
            assert_eq!(c[0], j as f64 + 75.0);
        }
    }
}
