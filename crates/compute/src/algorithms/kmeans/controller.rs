use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;
use rayon::ThreadPool;
use tracing::{debug, info};

use lloyd_core::{validate_input, EmptyClusterPolicy, KmeansParams, LloydError, Result, Vector};

use super::assign::assign_points;
use super::init::{initialize_centroids, make_rng};
use super::update::update_centroids;
use super::{cluster_sizes, inertia, KmeansResult};
use crate::metrics::RunMetrics;

/// Where the controller is in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Assigning,
    Updating,
    Done,
}

/// Sequences initialization, then `max_iterations` rounds of assignment and
/// centroid update. Each phase returns only after all of its units have
/// reported, so a round never observes a partially written table.
pub struct IterationController<'a> {
    pool: &'a ThreadPool,
    channel_capacity: usize,
    params: &'a KmeansParams,
    phase: Phase,
}

impl<'a> IterationController<'a> {
    pub fn new(pool: &'a ThreadPool, channel_capacity: usize, params: &'a KmeansParams) -> Self {
        Self {
            pool,
            channel_capacity: channel_capacity.max(1),
            params,
            phase: Phase::Initializing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Validate the input, seed `params.k` centroids and iterate.
    pub fn run(&mut self, data: &[Vector]) -> Result<KmeansResult> {
        self.phase = Phase::Initializing;
        validate_input(data, self.params.k)?;

        let mut rng = make_rng(self.params.seed);
        let centroids = initialize_centroids(data, self.params.k, self.params.distinct_init, &mut rng);
        self.iterate(data, centroids, &mut rng)
    }

    /// Iterate from caller-supplied initial centroids. `k` is taken from
    /// `centroids.len()`; `params.k` is ignored.
    pub fn run_from(&mut self, data: &[Vector], centroids: Vec<Vector>) -> Result<KmeansResult> {
        self.phase = Phase::Initializing;
        let dim = validate_input(data, centroids.len())?;
        if let Some((index, c)) = centroids.iter().enumerate().find(|(_, c)| c.len() != dim) {
            return Err(LloydError::InvalidDimension {
                index,
                expected: dim,
                found: c.len(),
            });
        }

        let mut rng = make_rng(self.params.seed);
        self.iterate(data, centroids, &mut rng)
    }

    fn transition(&mut self, next: Phase) {
        debug!("k-means phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn iterate(
        &mut self,
        data: &[Vector],
        mut centroids: Vec<Vector>,
        rng: &mut StdRng,
    ) -> Result<KmeansResult> {
        let start = Instant::now();
        let n = data.len();
        let k = centroids.len();
        let max_iterations = self.params.max_iterations;

        info!(
            "Running k-means: n={}, d={}, k={}, iterations={}, policy={}",
            n,
            data[0].len(),
            k,
            max_iterations,
            self.params.empty_cluster_policy
        );

        let mut assignments = vec![0usize; n];
        let mut metrics = RunMetrics::default();

        for iteration in 0..max_iterations {
            self.transition(Phase::Assigning);
            let phase_start = Instant::now();
            let changed = assign_points(
                self.pool,
                data,
                &centroids,
                &mut assignments,
                self.channel_capacity,
            )?;
            metrics.record_assign(phase_start.elapsed(), changed);

            self.transition(Phase::Updating);
            let phase_start = Instant::now();
            let outcome = update_centroids(
                self.pool,
                data,
                &assignments,
                &mut centroids,
                self.channel_capacity,
            )?;

            for &cluster in &outcome.empty {
                debug!("Cluster {} is empty at iteration {}", cluster, iteration);
                match self.params.empty_cluster_policy {
                    EmptyClusterPolicy::KeepPrevious => {}
                    EmptyClusterPolicy::Reseed => {
                        let idx = rng.gen_range(0..n);
                        centroids[cluster].clone_from(&data[idx]);
                    }
                    EmptyClusterPolicy::Fail => {
                        return Err(LloydError::EmptyCluster { cluster, iteration });
                    }
                }
            }
            metrics.record_update(phase_start.elapsed(), outcome.empty.len());

            debug!(
                "Iteration {}/{}: {} reassigned, {} empty",
                iteration + 1,
                max_iterations,
                changed,
                outcome.empty.len()
            );
        }

        if max_iterations == 0 {
            // No rounds requested: centroids stay as seeded, but the
            // returned table still maps every point to its nearest one.
            self.transition(Phase::Assigning);
            let phase_start = Instant::now();
            let changed = assign_points(
                self.pool,
                data,
                &centroids,
                &mut assignments,
                self.channel_capacity,
            )?;
            metrics.record_assign(phase_start.elapsed(), changed);
        }

        self.transition(Phase::Done);

        let inertia = inertia(data, &centroids, &assignments);
        let cluster_sizes = cluster_sizes(&assignments, k);

        info!(
            "K-means done in {:.3}s: inertia={:.4}, empty events={}, avg round {:?}",
            start.elapsed().as_secs_f64(),
            inertia,
            metrics.empty_clusters,
            metrics.avg_iteration_time()
        );

        Ok(KmeansResult {
            centroids,
            assignments,
            k,
            iterations: metrics.iterations,
            inertia,
            cluster_sizes,
            metrics,
        })
    }
}
