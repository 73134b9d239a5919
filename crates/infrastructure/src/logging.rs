//! Host logging.
//!
//! One log file per run, `<prefix>_<YYYYmmdd_HHMMSS>.log`, in the logs
//! directory, plus a console layer. `RUST_LOG` overrides the configured
//! level. Files older than the retention period are removed at startup.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};
use fcut_application::{HostError, HostResult};
use fcut_domain::HostConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Keeps the background log writer alive; drop it last.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// File name for a run started at `started`.
#[must_use]
pub fn log_file_name(prefix: &str, started: DateTime<Local>) -> String {
    format!("{prefix}_{}.log", started.format("%Y%m%d_%H%M%S"))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the logs directory cannot be created or a
/// subscriber is already installed.
pub fn init_logging(config: &HostConfig, logs_dir: &Path) -> HostResult<LogGuard> {
    fs::create_dir_all(logs_dir).map_err(|e| {
        HostError::Config(format!("cannot create {}: {e}", logs_dir.display()))
    })?;

    let file_name = log_file_name(config.log_file_prefix(), Local::now());
    let appender = tracing_appender::rolling::never(logs_dir, &file_name);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| HostError::Config(format!("logging already initialized: {e}")))?;

    tracing::info!(file = %logs_dir.join(&file_name).display(), "logging initialized");
    Ok(LogGuard { _worker: worker })
}

/// Deletes `<prefix>_*.log` files in `dir` last modified more than
/// `retention_days` before `now`. Returns how many were removed.
///
/// Files that cannot be inspected or removed are skipped.
///
/// # Errors
///
/// Returns an error only if `dir` itself cannot be read.
pub fn clean_old_logs(
    dir: &Path,
    prefix: &str,
    retention_days: u32,
    now: SystemTime,
) -> io::Result<usize> {
    let max_age = Duration::from_secs(u64::from(retention_days) * SECONDS_PER_DAY);
    let cutoff = now.checked_sub(max_age).unwrap_or(SystemTime::UNIX_EPOCH);
    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(&format!("{prefix}_")) || !name.ends_with(".log") {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::debug!("skipping {name}: {e}");
                continue;
            }
        };
        if modified >= cutoff {
            continue;
        }

        match fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!("cannot remove old log {name}: {e}"),
        }
    }

    if removed > 0 {
        tracing::info!(removed, "old log files cleaned");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::fs::File;

    fn touch(dir: &Path, name: &str, age_days: u64, now: SystemTime) {
        let file = File::create(dir.join(name)).expect("create");
        let modified = now - Duration::from_secs(age_days * SECONDS_PER_DAY);
        file.set_modified(modified).expect("set_modified");
    }

    #[test]
    fn file_name_embeds_start_time() {
        let started = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("valid time");
        assert_eq!(log_file_name("FCut", started), "FCut_20240309_070501.log");
    }

    #[test]
    fn removes_only_expired_matching_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let now = SystemTime::now();

        touch(dir.path(), "FCut_20240101_000000.log", 30, now);
        touch(dir.path(), "FCut_20240301_000000.log", 11, now);
        touch(dir.path(), "FCut_20240309_000000.log", 2, now);
        touch(dir.path(), "Other_20240101_000000.log", 30, now);
        touch(dir.path(), "FCut_notes.txt", 30, now);

        let removed = clean_old_logs(dir.path(), "FCut", 10, now).expect("clean");
        assert_eq!(removed, 2);

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .expect("read_dir")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec![
                "FCut_20240309_000000.log".to_string(),
                "FCut_notes.txt".to_string(),
                "Other_20240101_000000.log".to_string(),
            ]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = clean_old_logs(&dir.path().join("nope"), "FCut", 10, SystemTime::now());
        assert!(result.is_err());
    }
}
