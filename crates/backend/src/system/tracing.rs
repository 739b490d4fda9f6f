use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=warn";

/// Инициализация системы трассировки (tracing)
///
/// Логи пишутся в:
/// - stdout (с цветами)
/// - logs/backend.log рядом с exe (без цветов), запасной вариант target/logs
///
/// Returns the log file path.
pub fn initialize() -> anyhow::Result<PathBuf> {
    let log_dir = log_directory();

    std::fs::create_dir_all(&log_dir).map_err(|e| {
        anyhow::anyhow!("Cannot create log directory {}: {}", log_dir.display(), e)
    })?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| anyhow::anyhow!("Cannot open log file {}: {}", log_file_path.display(), e))?;

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    println!("✓ Log level: {}", log_level);
    println!("✓ Log file: {}", log_file_path.display());

    Ok(log_file_path)
}

fn log_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| Path::new("target").join("logs"))
}
