//! MarketDesk - residential real-estate market intelligence in the terminal.
//!
//! Runs the daily refresh once (reusing today's snapshot when there is one),
//! then prints the selected report page or writes it to a file.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use marketdesk_core::models::Geography;
use marketdesk_core::{
    reduce, report, AppEvent, AppState, Config, FileSnapshotStore, GeminiClient, Page, RefreshOutcome,
    Refresher, SystemClock,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the refresh event channel.
/// A refresh sends at most two events before the receiver drains.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Log file name prefix inside the cache directory's `logs/` folder
const LOG_FILE_PREFIX: &str = "marketdesk";

const USAGE: &str = "\
Usage: marketdesk [OPTIONS]

Options:
  --page <PAGE>         Page to show: market, competitive, sources, shares,
                        india-news, world-news (default: market)
  --refresh             Fetch new data even if today's snapshot is cached
  --clear-cache         Delete the stored snapshot and exit
  --export <PATH>       Write the page to PATH instead of stdout
  --geography <NAME>    Geography label shown in the header
  -h, --help            Print this help
";

#[derive(Debug, Default, PartialEq)]
struct Args {
    page: Page,
    force_refresh: bool,
    clear_cache: bool,
    export: Option<PathBuf>,
    geography: Option<Geography>,
    help: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--page" => {
                let value = iter.next().context("--page needs a value")?;
                parsed.page = Page::from_slug(&value)
                    .with_context(|| format!("Unknown page: {}", value))?;
            }
            "--refresh" => parsed.force_refresh = true,
            "--clear-cache" => parsed.clear_cache = true,
            "--export" => {
                let value = iter.next().context("--export needs a path")?;
                parsed.export = Some(PathBuf::from(value));
            }
            "--geography" => {
                let value = iter.next().context("--geography needs a value")?;
                parsed.geography = Some(
                    Geography::parse(&value).with_context(|| format!("Unknown geography: {}", value))?,
                );
            }
            "-h" | "--help" => parsed.help = true,
            other => bail!("Unknown argument: {}\n\n{}", other, USAGE),
        }
    }

    Ok(parsed)
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr and to a daily rolling file. RUST_LOG controls the
/// level (e.g., RUST_LOG=debug). The returned guard must live until exit so
/// buffered file output is flushed.
fn init_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir);

    let (file_layer, guard) = match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print!("{}", USAGE);
        return Ok(());
    }

    let first_run = !Config::config_path()?.exists();
    let config = Config::load().context("Failed to load config")?;
    let cache_dir = config.cache_dir()?;

    let _log_guard = init_tracing(&cache_dir.join("logs"));
    info!("MarketDesk starting");

    // Leave an editable config behind on first run
    if first_run {
        match config.save() {
            Ok(()) => info!("Wrote default config"),
            Err(e) => warn!(error = %e, "Failed to write default config"),
        }
    }

    if config.resolved_api_key().is_none() {
        warn!("No API key configured; only today's cached snapshot can be shown");
    }

    let store = Arc::new(FileSnapshotStore::new(cache_dir)?);
    if args.clear_cache {
        store.clear().context("Failed to clear cached snapshot")?;
        eprintln!("Cleared cached snapshot at {}", store.path().display());
        return Ok(());
    }

    let provider = Arc::new(GeminiClient::new(&config)?);
    let refresher = Refresher::new(provider, store, Arc::new(SystemClock), config.default_geography);

    let (tx, mut rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    let outcome = if args.force_refresh {
        refresher.force_refresh(&tx).await
    } else {
        refresher.refresh(&tx).await
    };
    drop(tx);

    let mut state = reduce(AppState::new(), AppEvent::PageSelected(args.page));
    while let Some(event) = rx.recv().await {
        state = reduce(state, event);
    }
    if let Some(geography) = args.geography {
        state = reduce(state, AppEvent::GeographySelected(geography));
    }

    let text = report::render(&state);
    match args.export {
        Some(path) => {
            std::fs::write(&path, &text)
                .with_context(|| format!("Failed to export report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", text),
    }

    if outcome == RefreshOutcome::Failed {
        warn!("Refresh failed; run again later to retry");
    }
    info!("MarketDesk shutting down");
    Ok(())
}
