use lloyd_core::config::EngineConfig;
use lloyd_core::{KmeansParams, LloydError, Result, Vector};
use tracing::info;

use crate::algorithms::kmeans::{IterationController, KmeansResult};

/// Owns the worker pool that both clustering phases fan out onto.
pub struct ComputeEngine {
    pool: rayon::ThreadPool,
    channel_capacity: usize,
}

impl ComputeEngine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let threads = config.resolved_worker_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("lloyd-worker-{}", i))
            .build()
            .map_err(|e| LloydError::ThreadPool(e.to_string()))?;

        info!(
            "Compute engine ready with {} workers, channel capacity {}",
            threads, config.channel_capacity
        );

        Ok(Self {
            pool,
            channel_capacity: config.channel_capacity.max(1),
        })
    }

    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Cluster `data` with randomly seeded centroids.
    pub fn cluster(&self, data: &[Vector], params: &KmeansParams) -> Result<KmeansResult> {
        IterationController::new(&self.pool, self.channel_capacity, params).run(data)
    }

    /// Cluster `data` starting from the given centroids.
    pub fn cluster_from(
        &self,
        data: &[Vector],
        initial_centroids: Vec<Vector>,
        params: &KmeansParams,
    ) -> Result<KmeansResult> {
        IterationController::new(&self.pool, self.channel_capacity, params)
            .run_from(data, initial_centroids)
    }
}

/// Partition `data` into `k` clusters with exactly `max_iterations` Lloyd
/// rounds on a default engine. A `seed` makes the run reproducible.
pub fn cluster(
    data: &[Vector],
    k: usize,
    max_iterations: usize,
    seed: Option<u64>,
) -> Result<KmeansResult> {
    let mut params = KmeansParams::new(k, max_iterations);
    params.seed = seed;
    ComputeEngine::new(&EngineConfig::default())?.cluster(data, &params)
}
