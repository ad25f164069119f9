use crate::config::settings::{LogRotation, LoggingConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "browser-ctl.log";

/// Keeps the background log writer alive; drop it last.
#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

/// Initialize logging.
///
/// With debug enabled, everything from this crate at debug level goes to a
/// log file (next to the config file unless `logging.path` says otherwise).
/// Without it, warnings go to stderr and `RUST_LOG` can raise the level.
pub fn init(config: &LoggingConfig) -> Result<Option<LogGuard>> {
    if !config.debug {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .ok(); // Already initialized in tests.
        return Ok(None);
    }

    let log_path = resolve_log_path(config.path.as_deref())?;
    let (dir, file_name) = split_dir_and_name(&log_path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let appender = match config.rotation {
        LogRotation::Never => tracing_appender::rolling::never(&dir, &file_name),
        LogRotation::Daily => {
            prune_daily_logs(&dir, &file_name, config.keep)?;
            tracing_appender::rolling::daily(&dir, &file_name)
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_new("browser_ctl=debug,warn").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok();

    tracing::info!(log_file = %log_path.display(), rotation = ?config.rotation, "debug logging enabled");

    Ok(Some(LogGuard(guard)))
}

fn resolve_log_path(configured: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = configured else {
        let config_path = crate::config::config_path()?;
        return Ok(config_path.with_file_name(LOG_FILE_NAME));
    };

    let path = PathBuf::from(expand_tilde(raw));
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join(LOG_FILE_NAME));
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => format!("{}{}", home.display(), rest),
            None => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

fn split_dir_and_name(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .context("Invalid logging.path: not valid UTF-8")?
        .to_string();
    Ok((dir, name))
}

/// Remove all but the newest `keep` daily files (`{name}.YYYY-MM-DD`).
fn prune_daily_logs(dir: &Path, file_name: &str, keep: usize) -> Result<()> {
    if keep == 0 || !dir.exists() {
        return Ok(());
    }

    let prefix = format!("{file_name}.");
    let mut rotated: Vec<String> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read log directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.starts_with(&prefix))
        .collect();

    // Date suffixes sort lexicographically; newest first.
    rotated.sort_unstable_by(|a, b| b.cmp(a));

    for name in rotated.into_iter().skip(keep) {
        let path = dir.join(&name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(error = %e, file = %path.display(), "failed to remove old log file");
        }
    }

    Ok(())
}
