// Wendor - self-service vending kiosk
//
// A customer browses products laid out on numbered trays, picks up to three
// items, watches a simulated payment and vend sequence, and is returned to
// the trays. After a period of inactivity a "Touch to Start" screensaver
// covers the screen.
//
// Architecture:
// - Catalog: one-shot fetch of the product list (file or URL)
// - Kiosk: cart, tray browser, checkout simulator and idle screensaver state
// - Timer: cancellable delayed messages into the UI loop
// - TUI (ratatui): renders the kiosk and maps terminal input to kiosk actions
// - Event system: a single mpsc channel feeds the UI loop

mod catalog;
mod cli;
mod config;
mod events;
mod kiosk;
mod logging;
mod timer;
mod tui;

use anyhow::Result;
use catalog::CatalogSource;
use clap::Parser;
use config::{Config, LogRotation, LoggingConfig};
use events::AppEvent;
use logging::{LogBuffer, TuiLogLayer};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Ensure config template exists (helps operators discover options)
    Config::ensure_config_exists();

    let mut config = Config::load()?;
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }

    // Maintenance subcommands log to stderr and exit
    if let Some(command) = cli.command {
        let _guard = init_tracing(&config.logging, None);
        return cli::run(command, config).await;
    }

    // In kiosk mode logs go to the in-app buffer so they never garble the display
    let log_buffer = LogBuffer::new();
    let _guard = init_tracing(&config.logging, Some(log_buffer.clone()));

    tracing::info!(
        "Starting wendor-kiosk {} (catalog: {}, idle after {:?})",
        config::VERSION,
        config.catalog,
        config.idle_threshold
    );

    let (app_tx, app_rx) = mpsc::unbounded_channel();

    // Fetch the catalog once in the background; the trays fill in when it lands
    let source = CatalogSource::parse(&config.catalog);
    let catalog_tx = app_tx.clone();
    tokio::spawn(async move {
        let products = catalog::load(&source).await;
        let _ = catalog_tx.send(AppEvent::CatalogLoaded(products));
    });

    if let Err(e) = tui::run_tui(app_tx, app_rx, log_buffer, config).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Initialize tracing
///
/// With a buffer, events are captured for the log panel; without one they
/// are printed to stderr. File logging is layered on top when enabled.
/// Precedence for the filter: RUST_LOG env var > config file > "info".
fn init_tracing(logging: &LoggingConfig, buffer: Option<LogBuffer>) -> Option<WorkerGuard> {
    let default_filter = format!("wendor_kiosk={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let console = match buffer {
        Some(buffer) => TuiLogLayer::new(buffer).boxed(),
        None => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let (file_layer, guard) = match file_writer(logging) {
        Some((writer, guard)) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    guard
}

/// Non-blocking rolling file writer, if file logging is enabled and usable
///
/// The guard must be kept alive for the duration of the program so logs flush.
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    Some(tracing_appender::non_blocking(appender))
}
