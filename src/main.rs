use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use snorkel_alert::config::SnorkelAlertConfig;
use snorkel_alert::forecast::{AssemblySettings, ForecastAssembler, compare_documents};
use snorkel_alert::logging::init_tracing;
use snorkel_alert::models::ForecastDocument;
use snorkel_alert::rating::ScoringMode;
use snorkel_alert::weather::{OpenMeteoProvider, fetch_all};
use snorkel_alert::{LocationCatalog, Snapshot};

#[derive(Parser)]
#[command(
    name = "snorkel-alert",
    version,
    about = "Snorkel and beach condition forecasts for the Perth coast"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch live provider data and save it as a snapshot
    Record {
        #[arg(long)]
        output: PathBuf,
    },

    /// Assemble the forecast document and print or write it as JSON
    Forecast {
        /// Replay a recorded snapshot instead of fetching live data
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Scoring mode override (legacy or current)
        #[arg(long)]
        mode: Option<ScoringMode>,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare a snapshot's forecast against a stored baseline document
    Compare {
        #[arg(long)]
        fixture: PathBuf,

        #[arg(long)]
        baseline: PathBuf,

        /// Scoring mode override (legacy or current)
        #[arg(long)]
        mode: Option<ScoringMode>,

        /// Overwrite the baseline with the current document
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SnorkelAlertConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging, cli.verbose)?;

    let catalog = config.catalog()?;
    info!("snorkel-alert {} with {} locations", snorkel_alert::VERSION, catalog.len());

    match cli.command {
        Command::Record { output } => {
            let snapshot = fetch_snapshot(&config, &catalog).await?;
            snapshot
                .save(&output)
                .with_context(|| format!("Failed to write snapshot: {}", output.display()))?;
        }
        Command::Forecast { fixture, mode, output } => {
            let (snapshot, today) = match fixture {
                Some(path) => replay(&path, &config)?,
                None => (fetch_snapshot(&config, &catalog).await?, local_today(&config)),
            };
            let document = assemble(&config, &catalog, mode, snapshot, today);
            let json = serde_json::to_string_pretty(&document)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write forecast: {}", path.display()))?;
                    info!("Wrote forecast to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Compare {
            fixture,
            baseline,
            mode,
            write,
        } => {
            let (snapshot, today) = replay(&fixture, &config)?;
            let current = assemble(&config, &catalog, mode, snapshot, today);

            if write {
                fs::write(&baseline, serde_json::to_string_pretty(&current)?)
                    .with_context(|| format!("Failed to write baseline: {}", baseline.display()))?;
                println!("Baseline written to {}", baseline.display());
                return Ok(());
            }

            let raw = fs::read_to_string(&baseline)
                .with_context(|| format!("Failed to read baseline: {}", baseline.display()))?;
            let stored: ForecastDocument = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse baseline: {}", baseline.display()))?;

            let report = compare_documents(&stored, &current);
            print!("{report}");
            if !report.coverage_matches() {
                bail!("{} coverage issue(s) against baseline", report.issues.len());
            }
        }
    }

    Ok(())
}

async fn fetch_snapshot(config: &SnorkelAlertConfig, catalog: &LocationCatalog) -> Result<Snapshot> {
    let provider = OpenMeteoProvider::new(&config.provider)?;
    let outcome = fetch_all(&provider, catalog, config.provider.concurrency).await;
    if outcome.forecasts.is_empty() {
        bail!("No location could be fetched");
    }
    Ok(Snapshot::from_outcome(outcome, Utc::now()))
}

/// Load a snapshot and the date it should be rated from
fn replay(path: &Path, config: &SnorkelAlertConfig) -> Result<(Snapshot, NaiveDate)> {
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("Failed to load snapshot: {}", path.display()))?;
    let today = snapshot.first_date().unwrap_or_else(|| local_today(config));
    Ok((snapshot, today))
}

fn local_today(config: &SnorkelAlertConfig) -> NaiveDate {
    Utc::now().with_timezone(&config.provider.tz()).date_naive()
}

fn assemble(
    config: &SnorkelAlertConfig,
    catalog: &LocationCatalog,
    mode: Option<ScoringMode>,
    snapshot: Snapshot,
    today: NaiveDate,
) -> ForecastDocument {
    let mut settings = AssemblySettings::from_config(config);
    if let Some(mode) = mode {
        settings = settings.with_mode(mode);
    }
    let input = snapshot.into_input(today);
    ForecastAssembler::new(catalog, settings).assemble(&input)
}
