use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LloydError;

/// What the centroid update does with a cluster that received no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyClusterPolicy {
    /// Retain the centroid from the previous iteration.
    #[default]
    KeepPrevious,
    /// Replace the centroid with a random data point.
    Reseed,
    /// Abort the run with [`LloydError::EmptyCluster`].
    Fail,
}

impl fmt::Display for EmptyClusterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyClusterPolicy::KeepPrevious => write!(f, "keep-previous"),
            EmptyClusterPolicy::Reseed => write!(f, "reseed"),
            EmptyClusterPolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for EmptyClusterPolicy {
    type Err = LloydError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" | "keep-previous" | "keep_previous" => Ok(Self::KeepPrevious),
            "reseed" => Ok(Self::Reseed),
            "fail" => Ok(Self::Fail),
            other => Err(LloydError::InvalidConfig(format!(
                "unknown empty-cluster policy '{other}' (expected keep, reseed or fail)"
            ))),
        }
    }
}

/// Parameters for a single clustering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmeansParams {
    /// Number of clusters.
    pub k: usize,
    /// Exact number of assign/update rounds. There is no early exit.
    pub max_iterations: usize,
    /// Seed for centroid initialization. `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub empty_cluster_policy: EmptyClusterPolicy,
    /// Sample initial centroids without replacement.
    pub distinct_init: bool,
}

impl KmeansParams {
    pub fn new(k: usize, max_iterations: usize) -> Self {
        Self {
            k,
            max_iterations,
            seed: None,
            empty_cluster_policy: EmptyClusterPolicy::default(),
            distinct_init: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster_policy = policy;
        self
    }

    pub fn with_distinct_init(mut self, distinct: bool) -> Self {
        self.distinct_init = distinct;
        self
    }
}
