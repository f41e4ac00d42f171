use thiserror::Error;

#[derive(Error, Debug)]
pub enum LloydError {
    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Invalid dimension at vector {index}: expected {expected}, found {found}")]
    InvalidDimension {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid k = {k}: must be in [1, {n}]")]
    InvalidK { k: usize, n: usize },

    #[error("Cluster {cluster} has no members at iteration {iteration}")]
    EmptyCluster { cluster: usize, iteration: usize },

    #[error("{phase} phase incomplete: expected {expected} results, received {received}")]
    IncompletePhase {
        phase: &'static str,
        expected: usize,
        received: usize,
    },

    #[error("Worker panicked during {0} phase")]
    WorkerPanicked(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LloydError>;
