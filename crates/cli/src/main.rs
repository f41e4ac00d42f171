mod cli;
mod report;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use lloyd_compute::ComputeEngine;
use lloyd_core::config::load_dotenv;
use lloyd_core::Config;
use lloyd_ingest::{CsvExporter, CsvImporter, DatasetGenerator};

use crate::cli::{CliArgs, Command, GenerateArgs, RunArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let mut config = Config::for_profile(&args.profile);

    match args.command {
        Command::Run(run_args) => run(&mut config, &run_args),
        Command::Generate(gen_args) => generate(&config, &gen_args),
    }
}

/// Load → cluster → print → save.
fn run(config: &mut Config, args: &RunArgs) -> Result<()> {
    args.apply(config);
    config.log_summary();

    let params = config
        .clustering
        .to_params()
        .context("invalid clustering configuration")?;

    let dataset = CsvImporter::import(&config.io.input)
        .with_context(|| format!("failed to read dataset {}", config.io.input.display()))?;

    let engine = ComputeEngine::new(&config.engine).context("failed to start compute engine")?;

    let start = Instant::now();
    let result = engine
        .cluster(dataset.vectors(), &params)
        .context("clustering failed")?;
    let elapsed = start.elapsed();

    print!("{}", report::format_centroids(&result, config.io.precision));
    println!("Elapsed: {:?}", elapsed);

    CsvExporter::save(&config.io.output, &dataset, &result.assignments, config.io.precision)
        .with_context(|| format!("failed to save results to {}", config.io.output.display()))?;
    println!("Results saved to {}", config.io.output.display());

    if let Some(ref path) = args.report {
        let summary = report::build_report(config, &result, elapsed);
        report::write_report(path, &summary)?;
        info!(path = %path.display(), "wrote run report");
    }

    Ok(())
}

fn generate(config: &Config, args: &GenerateArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| config.io.input.clone());

    let mut generator = if args.columns.is_empty() {
        DatasetGenerator::with_default_columns(args.seed)
    } else {
        DatasetGenerator::new(args.columns.clone(), args.seed)
    };

    generator
        .generate(&output, args.samples)
        .with_context(|| format!("failed to generate dataset {}", output.display()))?;
    println!("Dataset written to {}", output.display());
    Ok(())
}
