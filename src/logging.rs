//! File logging for the admin client
//!
//! The window owns the terminal, so everything goes to a daily log file under
//! `<local data dir>/fitness-admin/logs/`. `FITNESS_ADMIN_LOG` sets the filter
//! and `RUST_LOG` is honoured when it is absent.

use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{self, Settings};
use crate::error::Result;

const LOG_ENV: &str = "FITNESS_ADMIN_LOG";
const DEFAULT_FILTER: &str = "fitness_admin=info,warn";

/// Install the file subscriber. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init() -> Result<WorkerGuard> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "fitness-admin.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_names(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    info!(
        "fitness-admin {} starting, logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );
    Ok(guard)
}

/// Record where settings came from and the values this session runs with.
pub fn log_settings(settings: &Settings) {
    match config::config_path() {
        Some(path) if path.exists() => info!("Settings file: {}", path.display()),
        Some(path) => info!("No settings file at {}, using defaults", path.display()),
        None => info!("No config directory on this platform, using defaults"),
    }
    info!("Backend: {}", settings.api.base_url);
    info!(
        "Lists: {} rows per page, {} ms search debounce, catalog limit {}",
        settings.list.default_page_size,
        settings.list.search_debounce_ms,
        settings.list.catalog_limit
    );
    info!(
        "Uploads: {} KiB, {} px longest side",
        settings.upload.max_bytes / 1024,
        settings.upload.max_dimension
    );
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fitness-admin")
        .join("logs")
}
