pub mod algorithms;
pub mod engine;
pub mod metrics;

pub use algorithms::kmeans::{IterationController, KmeansResult, Phase};
pub use engine::{cluster, ComputeEngine};
pub use metrics::RunMetrics;
