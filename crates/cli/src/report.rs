use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use lloyd_compute::KmeansResult;
use lloyd_core::Config;

/// Human-readable centroid listing for stdout.
pub fn format_centroids(result: &KmeansResult, precision: usize) -> String {
    let mut out = String::from("Centroids:\n");
    for (j, centroid) in result.centroids.iter().enumerate() {
        let coords: Vec<String> = centroid
            .iter()
            .map(|x| format!("{:.*}", precision, x))
            .collect();
        out.push_str(&format!(
            "  [{}] ({}) members={}\n",
            j,
            coords.join(", "),
            result.cluster_sizes[j]
        ));
    }
    out
}

/// JSON summary of a run. Per-row assignments live in the results CSV and
/// are not repeated here.
pub fn build_report(config: &Config, result: &KmeansResult, elapsed: Duration) -> serde_json::Value {
    serde_json::json!({
        "generated_at": Utc::now(),
        "elapsed_ms": elapsed.as_millis() as u64,
        "config": config.summary(),
        "result": {
            "k": result.k,
            "iterations": result.iterations,
            "inertia": result.inertia,
            "cluster_sizes": result.cluster_sizes,
            "centroids": result.centroids,
            "metrics": result.metrics,
        },
    })
}

pub fn write_report(path: &Path, report: &serde_json::Value) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create report {}", path.display()))?;
    serde_json::to_writer_pretty(file, report).context("failed to write report")?;
    Ok(())
}
