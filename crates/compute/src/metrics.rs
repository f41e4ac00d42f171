use std::time::Duration;

use serde::Serialize;

/// Per-run counters for the two clustering phases.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunMetrics {
    /// Completed assign/update rounds.
    pub iterations: usize,
    /// Wall-clock time spent in the assignment phase, summed over rounds.
    pub assign_time: Duration,
    /// Wall-clock time spent in the centroid update phase, summed over rounds.
    pub update_time: Duration,
    /// Total empty-cluster events seen during updates.
    pub empty_clusters: usize,
    /// Points whose cluster changed, summed over rounds.
    pub reassignments: usize,
}

impl RunMetrics {
    pub fn record_assign(&mut self, duration: Duration, reassigned: usize) {
        self.assign_time += duration;
        self.reassignments += reassigned;
    }

    pub fn record_update(&mut self, duration: Duration, empty: usize) {
        self.update_time += duration;
        self.empty_clusters += empty;
        self.iterations += 1;
    }

    /// Mean wall-clock time of one full round.
    pub fn avg_iteration_time(&self) -> Duration {
        if self.iterations == 0 {
            return Duration::ZERO;
        }
        (self.assign_time + self.update_time) / self.iterations as u32
    }
}
