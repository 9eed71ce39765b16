// src/main.rs
use std::{fs, path::PathBuf};

use anyhow::Result;
use cardscraper::{config, ingest, process, sink};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cardscraper")]
#[command(about = "Extracts typed reward and cashback tables from a scraped card table")]
struct Args {
    /// Scraped card table (CSV, one row per bank/card)
    cards: PathBuf,

    /// Output directory for the extracted tables
    #[arg(short, long, default_value = "out")]
    output: PathBuf,

    /// Pipeline config (YAML); defaults cover the standard applicant allow-list
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cardscraper=info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let args = Args::parse();

    // ─── 2) load business-rule config ────────────────────────────────
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::PipelineConfig::default(),
    };
    info!(
        qualified_applicants = config.qualified_applicants.len(),
        excluded_cards = config.excluded_cashback_cards.len(),
        "loaded pipeline config"
    );

    // ─── 3) read the scraped card table ──────────────────────────────
    let cards = ingest::read_card_table(&args.cards)?;

    // ─── 4) run both extraction pipelines ────────────────────────────
    let reward_rows = process::extract_reward_points(&cards, &config)?;
    let cashback_rows = process::extract_cashback(&cards, &config)?;

    // ─── 5) persist, all-or-nothing per file ─────────────────────────
    fs::create_dir_all(&args.output)?;
    sink::write_csv(&reward_rows, &args.output.join("reward_points.csv"))?;
    sink::write_reward_parquet(&reward_rows, &args.output.join("reward_points.parquet"))?;
    sink::write_csv(&cashback_rows, &args.output.join("cashback.csv"))?;
    sink::write_cashback_parquet(&cashback_rows, &args.output.join("cashback.parquet"))?;

    info!(
        reward_rows = reward_rows.len(),
        cashback_rows = cashback_rows.len(),
        "all done"
    );
    Ok(())
}
