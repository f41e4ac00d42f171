use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use lloyd_core::{Config, EmptyClusterPolicy};

/// Parallel k-means clustering of CSV datasets.
///
/// Defaults come from `LLOYD_*` environment variables (and `.env`); flags
/// override them.
#[derive(Parser, Debug)]
#[command(name = "lloyd", version, about)]
pub struct CliArgs {
    /// Config profile: keys are looked up as {PROFILE}_{KEY} first.
    #[arg(long, env = "LLOYD_PROFILE", default_value = "", global = true)]
    pub profile: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load a dataset, cluster it and save per-row assignments.
    Run(RunArgs),
    /// Write a random dataset for testing.
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Input CSV (first column is the row id).
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output CSV with a trailing Cluster column.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Number of clusters.
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Exact number of assign/update rounds.
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Seed for centroid initialization.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Empty cluster policy: keep, reseed or fail.
    #[arg(long)]
    pub empty_cluster: Option<EmptyClusterPolicy>,

    /// Sample initial centroids without replacement.
    #[arg(long)]
    pub distinct_init: bool,

    /// Worker threads (0 = all cores).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Result channel capacity per phase.
    #[arg(long)]
    pub channel_capacity: Option<usize>,

    /// Decimal places for coordinates in the output file.
    #[arg(long)]
    pub precision: Option<usize>,

    /// Write a JSON run report to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl RunArgs {
    /// Overlay flags onto the environment-derived config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref input) = self.input {
            config.io.input = input.clone();
        }
        if let Some(ref output) = self.output {
            config.io.output = output.clone();
        }
        if let Some(precision) = self.precision {
            config.io.precision = precision;
        }
        if let Some(k) = self.k {
            config.clustering.k = k;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.clustering.max_iterations = max_iterations;
        }
        if let Some(seed) = self.seed {
            config.clustering.seed = Some(seed);
        }
        if let Some(policy) = self.empty_cluster {
            config.clustering.empty_cluster = policy.to_string();
        }
        if self.distinct_init {
            config.clustering.distinct_init = true;
        }
        if let Some(threads) = self.threads {
            config.engine.worker_threads = threads;
        }
        if let Some(capacity) = self.channel_capacity {
            config.engine.channel_capacity = capacity.max(1);
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Destination CSV (defaults to the configured input path).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Number of rows.
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    pub samples: usize,

    /// Seed for reproducible datasets.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated coordinate column names.
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_run_flags() {
        let args = CliArgs::try_parse_from([
            "lloyd", "run", "--input", "in.csv", "-k", "4", "--max-iterations", "7",
            "--seed", "9", "--empty-cluster", "reseed", "--distinct-init", "--threads", "2",
        ])
        .unwrap();

        let Command::Run(run) = args.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(run.input, Some(PathBuf::from("in.csv")));
        assert_eq!(run.k, Some(4));
        assert_eq!(run.max_iterations, Some(7));
        assert_eq!(run.seed, Some(9));
        assert_eq!(run.empty_cluster, Some(EmptyClusterPolicy::Reseed));
        assert!(run.distinct_init);
        assert_eq!(run.threads, Some(2));
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(CliArgs::try_parse_from(["lloyd", "run", "--empty-cluster", "ignore"]).is_err());
    }

    #[test]
    fn parses_generate_columns() {
        let args = CliArgs::try_parse_from([
            "lloyd", "generate", "-n", "10", "--columns", "a,b,c", "--seed", "3",
        ])
        .unwrap();

        let Command::Generate(generate) = args.command else {
            panic!("expected generate subcommand");
        };
        assert_eq!(generate.samples, 10);
        assert_eq!(generate.columns, vec!["a", "b", "c"]);
        assert_eq!(generate.seed, Some(3));
        assert_eq!(generate.output, None);
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::for_profile_with("", &|_: &str| -> Option<String> { None });
        let run = RunArgs {
            k: Some(6),
            seed: Some(1),
            empty_cluster: Some(EmptyClusterPolicy::Fail),
            output: Some(PathBuf::from("out.csv")),
            channel_capacity: Some(0),
            ..Default::default()
        };
        run.apply(&mut config);

        assert_eq!(config.clustering.k, 6);
        assert_eq!(config.clustering.seed, Some(1));
        assert_eq!(config.clustering.max_iterations, 100);
        assert_eq!(config.io.output, PathBuf::from("out.csv"));
        assert_eq!(config.engine.channel_capacity, 1);
        let params = config.clustering.to_params().unwrap();
        assert_eq!(params.empty_cluster_policy, EmptyClusterPolicy::Fail);
    }
}
