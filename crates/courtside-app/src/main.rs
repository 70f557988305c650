// Courtside entry point.
//
// Startup sequence:
// 1. Seed and load config (errors go to stderr, nothing is logged yet)
// 2. Install the file logger described by `[logging]`
// 3. Parse the projection sheet and schedule into the shared source caches
// 4. Refresh every configured league in parallel, one blocking task each
// 5. Write one JSON snapshot per successful league

mod config;
mod file_provider;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing::{error, info};

use courtside_core::league::{LeagueAssembler, LeagueSnapshot};
use courtside_core::normalize::NameNormalizer;
use courtside_core::SourceData;

use crate::config::{Config, LoggingConfig};
use crate::file_provider::JsonFileProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Config
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let seeded = config::ensure_config_file(&cwd).context("failed to prepare configuration")?;
    let config = config::load_config_from(&cwd).context("failed to load configuration")?;

    // 2. Logging
    let log_path = init_tracing(&config.logging)?;
    info!("Courtside starting up, logging to {}", log_path.display());
    if let Some(path) = seeded {
        info!("Seeded {} from defaults", path.display());
    }
    info!(
        "Config loaded: {} leagues, {} extra aliases",
        config.leagues.len(),
        config.aliases.len()
    );

    // 3. Source caches
    let sources = Arc::new(load_sources(&config)?);

    // 4-5. Refresh leagues and write snapshots
    let outcomes = run_all(&config, sources).await;
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();

    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => println!("{}: wrote {}", outcome.league_id, path.display()),
            Err(e) => println!("{}: FAILED ({e:#})", outcome.league_id),
        }
    }

    if failed == outcomes.len() {
        anyhow::bail!("all {} leagues failed to refresh", outcomes.len());
    }

    info!(
        "Courtside finished: {} of {} leagues refreshed",
        outcomes.len() - failed,
        outcomes.len()
    );
    Ok(())
}

/// Log file name inside `[logging] dir`.
const LOG_FILE: &str = "courtside.log";

/// Filter from `RUST_LOG` when set, else the configured one.
fn log_filter(logging: &LoggingConfig) -> anyhow::Result<tracing_subscriber::EnvFilter> {
    use tracing_subscriber::EnvFilter;

    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&logging.filter)
            .with_context(|| format!("invalid [logging] filter `{}`", logging.filter)),
    }
}

/// Install the global subscriber, truncating `<dir>/courtside.log`.
/// Returns the log file path.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(&logging.dir)
        .with_context(|| format!("failed to create log directory {}", logging.dir.display()))?;
    let path = logging.dir.join(LOG_FILE);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(logging)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))?;

    Ok(path)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Read both source files and build the shared caches.
fn load_sources(config: &Config) -> anyhow::Result<SourceData> {
    let sources = SourceData::new(NameNormalizer::with_aliases(&config.aliases));

    let sheet_path = &config.sources.projections;
    let sheet_text = std::fs::read_to_string(sheet_path)
        .with_context(|| format!("failed to read projections from {}", sheet_path.display()))?;
    sources
        .refresh_stats(&sheet_text)
        .with_context(|| format!("failed to parse projections in {}", sheet_path.display()))?;

    let schedule_path = &config.sources.schedule;
    let schedule_html = std::fs::read_to_string(schedule_path)
        .with_context(|| format!("failed to read schedule from {}", schedule_path.display()))?;
    sources
        .refresh_schedule_html(&schedule_html)
        .with_context(|| format!("failed to parse schedule in {}", schedule_path.display()))?;

    Ok(sources)
}

/// Result of one league's refresh: the snapshot path on success.
#[derive(Debug)]
struct LeagueOutcome {
    league_id: String,
    result: anyhow::Result<PathBuf>,
}

/// Refresh every configured league concurrently. Each league runs on its own
/// blocking task and shares only the read-only source caches.
async fn run_all(config: &Config, sources: Arc<SourceData>) -> Vec<LeagueOutcome> {
    let mut handles = Vec::with_capacity(config.leagues.len());
    for league in &config.leagues {
        let id = league.id.clone();
        let provider_file = league.provider_file.clone();
        let output = config.snapshot_path(&league.id);
        let sources = Arc::clone(&sources);
        let handle = tokio::task::spawn_blocking(move || {
            refresh_league(&provider_file, sources, &output).map(|_| output)
        });
        handles.push((id, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (league_id, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(anyhow::Error::new(e).context("refresh task panicked")),
        };
        if let Err(e) = &result {
            error!("League {} failed: {:#}", league_id, e);
        }
        outcomes.push(LeagueOutcome { league_id, result });
    }
    outcomes
}

/// Refresh one league from its provider export and write its snapshot.
fn refresh_league(
    provider_file: &Path,
    sources: Arc<SourceData>,
    output: &Path,
) -> anyhow::Result<Arc<LeagueSnapshot>> {
    let provider = JsonFileProvider::open(provider_file)
        .with_context(|| format!("failed to open provider export {}", provider_file.display()))?;
    info!("Refreshing league from {}", provider.path().display());
    let assembler = LeagueAssembler::new(provider, sources);
    let snapshot = assembler.refresh().context("league refresh failed")?;
    write_snapshot(output, &snapshot)?;
    info!(
        "Snapshot for '{}' written to {}",
        snapshot.name,
        output.display()
    );
    Ok(snapshot)
}

fn write_snapshot(path: &Path, snapshot: &LeagueSnapshot) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }
    let json = snapshot.to_json().context("failed to serialize snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
