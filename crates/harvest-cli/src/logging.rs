//! Tracing subscriber bootstrap.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber: `RUST_LOG` if set, otherwise the
/// configured level. Events go to stdout, and also to a per-run file when
/// a log directory is configured.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or the log file
/// cannot be created.
pub(crate) fn init_tracing(
    config: &harvest_core::AppConfig,
    run_label: &str,
) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;

    let file_layer = match &config.log_dir {
        Some(dir) => {
            let path = log_file_path(dir, run_label, chrono::Local::now());
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file = File::create(&path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}

/// `<dir>/<label>_<YYYYmmdd_HHMMSS>.log`
pub(crate) fn log_file_path<Tz>(dir: &Path, run_label: &str, at: chrono::DateTime<Tz>) -> PathBuf
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    dir.join(format!("{run_label}_{}.log", at.format("%Y%m%d_%H%M%S")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn log_file_is_named_after_run_and_timestamp() {
        let at = chrono::Utc
            .with_ymd_and_hms(2025, 3, 9, 14, 5, 7)
            .single()
            .expect("valid timestamp");
        let path = log_file_path(Path::new("logs"), "books", at);
        assert_eq!(path, Path::new("logs/books_20250309_140507.log"));
    }
}
