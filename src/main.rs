//! Hut-Ripple main entry point
//!
//! This is the command-line interface for the hut availability scrape orchestrator.

use anyhow::Context;
use clap::Parser;
use hut_ripple::config::{load_config_with_hash, Config};
use hut_ripple::orchestrator::{OrchestrationOptions, Orchestrator, ProgressSnapshot};
use hut_ripple::output::{
    generate_markdown_report, print_report_summary, report_to_json, write_json_report,
};
use hut_ripple::persistence::JsonLinesPersistence;
use hut_ripple::provider::ProviderRegistry;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Hut-Ripple: batch availability scraper for mountain huts
///
/// Runs every configured target through its provider in fixed-size batches,
/// retrying failures with a linear backoff, and reports the outcome per target.
#[derive(Parser, Debug)]
#[command(name = "hut-ripple")]
#[command(version)]
#[command(about = "Batch availability scraper for mountain huts", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the batch plan without scraping
    #[arg(long)]
    dry_run: bool,

    /// Only scrape these target ids; the rest are reported as skipped
    #[arg(long, value_name = "ID", num_args = 1..)]
    only: Vec<String>,

    /// Print the final report as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Also write a markdown report to this path
    #[arg(long, value_name = "PATH")]
    markdown: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let options = config.orchestration_options();

    if cli.dry_run {
        handle_dry_run(&config, &options);
        return Ok(());
    }

    let failed = handle_scrape(&config, options, &cli).await?;
    if failed {
        std::process::exit(1);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hut_ripple=info,warn"),
            1 => EnvFilter::new("hut_ripple=debug,info"),
            2 => EnvFilter::new("hut_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows options, targets and the batch plan
fn handle_dry_run(config: &Config, options: &OrchestrationOptions) {
    let registry = ProviderRegistry::with_defaults(&config.http);
    let targets = config.targets();

    println!("=== Hut-Ripple Dry Run ===\n");

    println!("Orchestration:");
    println!("  Concurrency: {}", options.concurrency);
    println!("  Max attempts: {}", options.retries);
    println!("  Delay between batches: {}ms", options.delay_between_batches);
    println!("  Delay between targets: {}ms", options.delay_between_targets);
    println!("  Retry backoff base: {}ms", options.retry_backoff);
    println!("  Save results: {}", options.save_to_database);
    println!("  Save report: {}", options.save_to_file);

    println!("\nDate range:");
    println!("  {} .. {}", options.date_range.start_date(), options.date_range.end_date());

    println!("\nTargets ({}):", targets.len());
    for target in &targets {
        let marker = if registry.contains(&target.provider_type) {
            ""
        } else {
            " (unknown provider)"
        };
        println!("  - [{}] {} via {}{}", target.id, target.name, target.provider_type, marker);
        if let Some(subs) = &target.sub_resources {
            println!("    rooms: {}", subs.join(", "));
        }
    }

    println!(
        "\n✓ Would run {} batch(es) of up to {} target(s)",
        options.total_batches(targets.len()),
        options.concurrency
    );
}

/// Runs the scrape and writes the configured outputs; returns whether any target failed
async fn handle_scrape(
    config: &Config,
    options: OrchestrationOptions,
    cli: &Cli,
) -> anyhow::Result<bool> {
    let targets = config.targets();
    let save_to_file = options.save_to_file;
    let registry = ProviderRegistry::with_defaults(&config.http);

    for target in &targets {
        if !registry.contains(&target.provider_type) {
            tracing::warn!(
                "Target {} uses unregistered provider '{}'; it will fail",
                target.id,
                target.provider_type
            );
        }
    }

    let mut orchestrator = Orchestrator::new(options, Arc::new(registry))?
        .with_persistence(Arc::new(JsonLinesPersistence::new(&config.output.results_path)));

    if !cli.only.is_empty() {
        let wanted: HashSet<String> = cli.only.iter().cloned().collect();
        orchestrator = orchestrator.with_filter(move |target| {
            wanted.contains(&target.id.to_string())
        });
    }

    tracing::info!(
        "Scraping {} target(s) for {} .. {}",
        targets.len(),
        orchestrator.options().date_range.start_date(),
        orchestrator.options().date_range.end_date()
    );

    let mut on_progress = |snapshot: &ProgressSnapshot| {
        tracing::info!(
            "Batch {}/{} done: {}/{} completed, {} ok, {} failed",
            snapshot.current_batch,
            snapshot.total_batches,
            snapshot.completed,
            snapshot.total,
            snapshot.successful,
            snapshot.failed
        );
    };
    let report = orchestrator.scrape_all(&targets, Some(&mut on_progress)).await;

    if save_to_file {
        let path = Path::new(&config.output.report_path);
        write_json_report(&report, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!("Report written to: {}", path.display());
    }

    if let Some(path) = &cli.markdown {
        generate_markdown_report(&report, path)
            .with_context(|| format!("failed to write markdown report to {}", path.display()))?;
        tracing::info!("Markdown report written to: {}", path.display());
    }

    if cli.json {
        println!("{}", report_to_json(&report)?);
    } else if !cli.quiet {
        print_report_summary(&report);
    }

    Ok(report.has_failures())
}
