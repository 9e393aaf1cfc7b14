//! # exitrank-cli
//!
//! Ranks required core courses from a graduate exit survey workbook and
//! writes the ranking as CSV plus a bar chart PNG.

mod config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use config::ExitrankConfig;
use exitrank_survey::{aggregate_course_ratings, write_ranking_csv};
use exitrank_viz::BarChart;
use exitrank_xlsx::read_sheet_rows;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// exitrank - rank core courses from exit survey ratings
#[derive(Parser)]
#[command(name = "exitrank")]
#[command(author, version, about = "Rank core courses from exit survey ratings", long_about = None)]
struct Cli {
    /// Survey workbook (.xlsx)
    #[arg(long, value_name = "FILE", default_value = "data/grad_exit_survey_2024.xlsx")]
    input: PathBuf,

    /// Workbook to use when --input does not exist
    #[arg(
        long,
        value_name = "FILE",
        default_value = "Grad Program Exit Survey Data 2024 (1).xlsx"
    )]
    fallback_input: PathBuf,

    /// Ranking CSV output
    #[arg(long, value_name = "FILE", default_value = "outputs/rank_order.csv")]
    csv: PathBuf,

    /// Bar chart PNG output
    #[arg(long, value_name = "FILE", default_value = "outputs/rank_order.png")]
    png: PathBuf,

    /// JSON file with `layout` and `chart` settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let config = match &cli.config {
        Some(path) => ExitrankConfig::load(path)?,
        None => ExitrankConfig::default(),
    };

    let input = resolve_input_path(&cli.input, &cli.fallback_input)?;
    run(&input, &cli.csv, &cli.png, &config)?;

    println!("Wrote {} and {}", cli.csv.display(), cli.png.display());
    Ok(())
}

/// Pick the primary workbook, or the fallback when the primary is missing.
fn resolve_input_path(primary: &Path, fallback: &Path) -> Result<PathBuf> {
    if primary.exists() {
        return Ok(primary.to_path_buf());
    }
    if fallback.exists() {
        warn!(
            primary = %primary.display(),
            fallback = %fallback.display(),
            "input workbook not found, using fallback"
        );
        eprintln!(
            "{} {} not found; using fallback {}.",
            "Warning:".yellow().bold(),
            primary.display(),
            fallback.display()
        );
        return Ok(fallback.to_path_buf());
    }
    bail!("Missing input workbook at {}", primary.display())
}

/// Read the workbook, rank the courses, and write both outputs.
fn run(input: &Path, csv_path: &Path, png_path: &Path, config: &ExitrankConfig) -> Result<()> {
    info!(input = %input.display(), "reading survey workbook");
    let rows = read_sheet_rows(input)
        .with_context(|| format!("Failed to read workbook: {}", input.display()))?;

    let ranked = aggregate_course_ratings(&rows, &config.layout)
        .with_context(|| format!("Failed to rank courses in {}", input.display()))?;

    write_ranking_csv(&ranked, csv_path)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;

    BarChart::new(config.chart.clone())
        .save_png(&ranked, png_path)
        .with_context(|| format!("Failed to write {}", png_path.display()))?;

    Ok(())
}
