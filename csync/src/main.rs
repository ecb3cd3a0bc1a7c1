//! csync - Contact reconciliation CLI
//!
//! Reconciles a CSV contact export against a JSON contact store: each row
//! is matched against existing contacts (exact, then fuzzy, refined by
//! phone corroboration) and either merged additively or created as a new
//! contact. `--skeptical` asks before every match, merge, and create.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use csync::config::SyncConfig;
use csync::confirm::StdinConfirm;
use csync::driver::{Mode, Reconciler};
use csync::ingest::CsvRowSource;
use csync_common::store::JsonStore;

/// Command-line arguments for csync
#[derive(Parser, Debug)]
#[command(name = "csync")]
#[command(about = "Reconcile a contact spreadsheet export against a contact store")]
#[command(version)]
struct Args {
    /// CSV export of the contact spreadsheet
    input: PathBuf,

    /// Ask for confirmation before every match, merge, and create
    #[arg(long)]
    skeptical: bool,

    /// Process at most this many data rows
    #[arg(long)]
    limit: Option<usize>,

    /// Contact store file
    #[arg(long, default_value = "contacts.json", env = "CSYNC_STORE")]
    store: PathBuf,

    /// Optional TOML file with tunables (country code, fuzzy threshold)
    #[arg(long, env = "CSYNC_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "csync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mode = if args.skeptical {
        Mode::Skeptical
    } else {
        Mode::Automatic
    };
    info!("starting csync ({:?} mode)", mode);

    let config = SyncConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;

    let store = JsonStore::open(&args.store)
        .with_context(|| format!("Failed to open contact store {}", args.store.display()))?;

    let mut rows = CsvRowSource::open(&args.input)
        .with_context(|| format!("Failed to open input {}", args.input.display()))?;

    let mut reconciler = Reconciler::new(store, StdinConfirm, mode, args.limit, config);
    let summary = reconciler.run(&mut rows).context("Batch aborted")?;

    println!("{}", summary);
    Ok(())
}
