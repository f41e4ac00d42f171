use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{EmptyClusterPolicy, KmeansParams};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Key lookup used to resolve config values. `from_env` reads the process
/// environment; tests pass a map.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Read a profiled key: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_opt(lookup: Lookup, profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = lookup(&prefixed).filter(|s| !s.is_empty()) {
            return Some(v);
        }
    }
    lookup(key).filter(|s| !s.is_empty())
}

fn profiled_or(lookup: Lookup, profile: &str, key: &str, default: &str) -> String {
    profiled_opt(lookup, profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_parse<T: std::str::FromStr>(lookup: Lookup, profile: &str, key: &str, default: T) -> T {
    match profiled_opt(lookup, profile, key) {
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, "unparsable config value, using default");
            default
        }),
        None => default,
    }
}

fn profiled_bool(lookup: Lookup, profile: &str, key: &str, default: bool) -> bool {
    match profiled_opt(lookup, profile, key) {
        Some(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub clustering: ClusteringConfig,
    pub engine: EngineConfig,
    pub io: IoConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `LLOYD_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_lookup("LLOYD_PROFILE").unwrap_or_default();
        Self::for_profile_with(&profile, &env_lookup)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        Self::for_profile_with(profile, &env_lookup)
    }

    /// Build config from an arbitrary key lookup.
    pub fn for_profile_with(profile: &str, lookup: Lookup) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            clustering: ClusteringConfig::from_lookup(lookup, p),
            engine: EngineConfig::from_lookup(lookup, p),
            io: IoConfig::from_lookup(lookup, p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  clustering:  k={}, max_iterations={}, seed={}, empty_cluster={}, distinct_init={}",
            self.clustering.k,
            self.clustering.max_iterations,
            self.clustering.seed.map(|s| s.to_string()).as_deref().unwrap_or("(entropy)"),
            self.clustering.empty_cluster,
            self.clustering.distinct_init
        );
        tracing::info!(
            "  engine:      worker_threads={}, channel_capacity={}",
            self.engine.resolved_worker_threads(),
            self.engine.channel_capacity
        );
        tracing::info!(
            "  io:          input={}, output={}, precision={}",
            self.io.input.display(),
            self.io.output.display(),
            self.io.precision
        );
    }

    /// JSON view of the resolved configuration, used in run reports.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "clustering": {
                "k": self.clustering.k,
                "max_iterations": self.clustering.max_iterations,
                "seed": self.clustering.seed,
                "empty_cluster": self.clustering.empty_cluster,
                "distinct_init": self.clustering.distinct_init,
            },
            "engine": {
                "worker_threads": self.engine.resolved_worker_threads(),
                "channel_capacity": self.engine.channel_capacity,
            },
            "io": {
                "input": self.io.input,
                "output": self.io.output,
                "precision": self.io.precision,
            },
        })
    }
}

// ── Clustering ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    pub k: usize,
    pub max_iterations: usize,
    pub seed: Option<u64>,
    /// Raw policy string; validated by [`ClusteringConfig::to_params`].
    pub empty_cluster: String,
    pub distinct_init: bool,
}

impl ClusteringConfig {
    fn from_lookup(lookup: Lookup, p: &str) -> Self {
        Self {
            k: profiled_parse(lookup, p, "LLOYD_K", 3),
            max_iterations: profiled_parse(lookup, p, "LLOYD_MAX_ITERATIONS", 100),
            seed: profiled_opt(lookup, p, "LLOYD_SEED").and_then(|v| v.trim().parse().ok()),
            empty_cluster: profiled_or(lookup, p, "LLOYD_EMPTY_CLUSTER", "keep"),
            distinct_init: profiled_bool(lookup, p, "LLOYD_DISTINCT_INIT", false),
        }
    }

    pub fn to_params(&self) -> Result<KmeansParams> {
        let policy: EmptyClusterPolicy = self.empty_cluster.parse()?;
        Ok(KmeansParams {
            k: self.k,
            max_iterations: self.max_iterations,
            seed: self.seed,
            empty_cluster_policy: policy,
            distinct_init: self.distinct_init,
        })
    }
}

// ── Engine ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of worker threads. 0 = available parallelism.
    pub worker_threads: usize,
    /// Bound of the per-phase result channel.
    pub channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            channel_capacity: 1024,
        }
    }
}

impl EngineConfig {
    fn from_lookup(lookup: Lookup, p: &str) -> Self {
        let defaults = Self::default();
        Self {
            worker_threads: profiled_parse(lookup, p, "LLOYD_WORKER_THREADS", defaults.worker_threads),
            channel_capacity: profiled_parse(lookup, p, "LLOYD_CHANNEL_CAPACITY", defaults.channel_capacity)
                .max(1),
        }
    }

    /// Resolve worker thread count (0 means use available parallelism).
    pub fn resolved_worker_threads(&self) -> usize {
        if self.worker_threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            self.worker_threads
        }
    }
}

// ── I/O ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Decimal places for coordinates in result files.
    pub precision: usize,
}

impl IoConfig {
    fn from_lookup(lookup: Lookup, p: &str) -> Self {
        Self {
            input: PathBuf::from(profiled_or(lookup, p, "LLOYD_INPUT", "dataset.csv")),
            output: PathBuf::from(profiled_or(lookup, p, "LLOYD_OUTPUT", "resultados.csv")),
            precision: profiled_parse(lookup, p, "LLOYD_PRECISION", 2),
        }
    }
}
