//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` overrides `log_level` when set. Falls back to stdout-only
/// when `log_dir` is missing or does not exist.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let json = json.unwrap_or(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "widget-server");
            if json {
                subscriber.json().with_writer(file_appender).init();
            } else {
                subscriber.with_writer(file_appender).init();
            }
            return;
        }
    }

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Clean up log files older than `days`
///
/// Walks `log_dir` and removes regular files whose modification time is
/// older than the cutoff. Subdirectories are left alone.
pub fn cleanup_old_logs(log_dir: &str, days: u64) -> std::io::Result<()> {
    let dir = Path::new(log_dir);
    if !dir.exists() {
        return Ok(());
    }

    let cutoff = SystemTime::now() - Duration::from_secs(days * 24 * 60 * 60);
    let mut removed = 0usize;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(t) => t,
            // 文件系统不支持 mtime 时跳过该文件
            Err(_) => continue,
        };

        if modified < cutoff && std::fs::remove_file(&path).is_ok() {
            removed += 1;
        }
    }

    if removed > 0 {
        tracing::debug!("Removed {} log file(s) older than {} days", removed, days);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_cleanup_skips_recent_files() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let fresh = dir.path().join("widget-server.2025-08-25");
        fs::write(&fresh, "log line").expect("Failed to write log file");

        cleanup_old_logs(dir.path().to_str().unwrap(), 30).expect("Cleanup failed");

        assert!(fresh.exists(), "Recent log file must survive cleanup");
    }

    #[test]
    fn test_cleanup_missing_dir_is_noop() {
        let result = cleanup_old_logs("/nonexistent/hermit-logs", 30);
        assert!(result.is_ok());
    }
}
