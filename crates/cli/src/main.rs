//! Council research CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse configuration** — load `council-research.toml`, apply
//!    environment overrides, and validate it.
//! 2. **Wire observability** — configure `tracing-subscriber` and, when an
//!    OTLP endpoint is set, an OpenTelemetry exporter.
//! 3. **Construct infrastructure** — create the `OpenRouterProvider` and
//!    inject it into the `ResearchGatherer` and the `DirectCouncil`.
//! 4. **Run the comparison** — send the query through the council once
//!    without research and once with it, print a summary, and write the
//!    comparison artifacts.

mod config;
mod council;
mod report;
mod telemetry;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use llm::{OpenRouterProvider, ProviderConfig};
use research::{
    format_for_display, run_with_research, CategoryName, CouncilRun, ResearchConfig,
    ResearchGatherer, RunId,
};
use tracing::{info, info_span, Instrument};

use crate::config::AppConfig;
use crate::council::DirectCouncil;
use crate::report::ArtifactPaths;

const SAMPLE_QUERY: &str = "Analyze the film \"Baahubali: The Beginning\" (2015). What makes it significant
in Indian cinema, and what are the deeper themes beyond the surface-level action and spectacle?";

const RULE: &str = "================================================================================";

#[derive(Debug, Parser)]
#[command(
    name = "council-research",
    version,
    about = "Compare council answers with and without the stage 0 research layer"
)]
struct Cli {
    /// Configuration file; defaults are used when it does not exist.
    #[arg(long, default_value = "council-research.toml")]
    config: PathBuf,

    /// Query to analyze.
    #[arg(long, default_value = SAMPLE_QUERY)]
    query: String,

    /// Subject name used in the comparison document title.
    #[arg(long, default_value = "Baahubali")]
    title: String,

    /// File name prefix for the written artifacts.
    #[arg(long, default_value = "baahubali")]
    prefix: String,

    /// Directory the artifacts are written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Comma-separated research categories (default: all built-in categories).
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,

    /// Print the gathered research findings in full.
    #[arg(long)]
    show_research: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;

    let _telemetry = telemetry::init(config.log_format, config.otlp_endpoint.as_deref())?;

    let run_id = RunId::new_random();
    run(cli, config, run_id)
        .instrument(info_span!("comparison", run_id = %run_id))
        .await
}

async fn run(cli: Cli, config: AppConfig, run_id: RunId) -> anyhow::Result<()> {
    let provider = Arc::new(
        OpenRouterProvider::new(ProviderConfig::from_env(
            config.api_base_url.clone(),
            &config.api_key_env,
            config.request_timeout(),
        )?)
        .context("failed to construct model provider")?,
    );

    let gatherer = ResearchGatherer::new(
        provider.clone(),
        ResearchConfig::builtin(config.research_model()?),
    );
    let council = DirectCouncil::new(provider, config.chairman_model()?);

    let categories: Vec<CategoryName> = cli
        .categories
        .iter()
        .filter_map(|c| CategoryName::new(c.trim()))
        .collect();
    let selection = (!categories.is_empty()).then_some(categories.as_slice());

    println!("{RULE}\n{} ANALYSIS TEST\n{RULE}", cli.title.to_uppercase());
    println!("\nQuery: {}\n\n{RULE}", cli.query);

    println!("\n[TEST 1] Running WITHOUT research layer (standard mode)...");
    let without = run_with_research(&gatherer, &council, &cli.query, selection, false)
        .await
        .context("standard run failed")?;
    print_summary(&without, false);

    println!("\n[TEST 2] Running WITH research layer (research mode)...");
    let with = run_with_research(&gatherer, &council, &cli.query, selection, true)
        .await
        .context("research run failed")?;
    print_summary(&with, cli.show_research);

    std::fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("failed to create {}", cli.output_dir.display()))?;
    let paths = ArtifactPaths::new(&cli.output_dir, &cli.prefix);
    report::write_artifacts(&paths, &cli.title, &cli.query, run_id, &without, &with)?;

    println!("\n[SAVING RESULTS]");
    for path in [&paths.without_research, &paths.with_research, &paths.comparison] {
        println!("  saved: {}", path.display());
    }
    info!(run_id = %run_id, "Comparison complete");
    Ok(())
}

fn print_summary(run: &CouncilRun, show_research: bool) {
    if run.metadata.research_enabled {
        println!("\n  Stage 0: Research gathering ({} findings)", run.stage0.len());
        for finding in &run.stage0 {
            println!("  - {}: {} chars", finding.category.title(), finding.findings.len());
        }
        if show_research {
            println!("\n{}", format_for_display(&run.stage0));
        }
    }
    for stage in run.outcome.stages.keys() {
        println!("  {stage}: collected");
    }
    println!("  Chairman model: {}", run.outcome.chairman_model);
    println!("  Response length: {} chars", run.outcome.final_answer.len());
}
