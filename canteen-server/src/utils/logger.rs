//! Logging Infrastructure
//!
//! Structured logging setup for development and production
//! Features:
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent security logs (never deleted)
//!
//! security_log! 宏写入 target = "security" 的事件，
//! 由独立的文件层收集，不参与滚动清理。

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// 应用日志保留天数 (安全日志永久保留)
const LOG_RETENTION_DAYS: i64 = 14;

/// 应用日志文件前缀 (tracing-appender 生成 "canteen-server.YYYY-MM-DD")
const APP_LOG_PREFIX: &str = "canteen-server";

/// Initialize the logger (console only)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// # Arguments
/// * `log_level` - Log level, defaults to "info"; `RUST_LOG` overrides it
/// * `log_dir` - Optional directory for file logging (e.g. WORK_DIR/logs)
///
/// 文件输出开启时写两份：
/// - `<dir>/app/canteen-server.YYYY-MM-DD` - 应用日志 (按天滚动，14 天后清理)
/// - `<dir>/security/security.YYYY-MM-DD` - 安全日志 (永久保留)
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    // Resolve the log directories up front so a failure falls back to console-only
    let file_dirs = log_dir.map(Path::new).and_then(|dir| {
        let app_dir = dir.join("app");
        let security_dir = dir.join("security");
        if fs::create_dir_all(&app_dir).is_ok() && fs::create_dir_all(&security_dir).is_ok() {
            Some((app_dir, security_dir, dir.to_path_buf()))
        } else {
            eprintln!(
                "Failed to create log directories under {}, falling back to console logging",
                dir.display()
            );
            None
        }
    });

    match file_dirs {
        Some((app_dir, security_dir, cleanup_dir)) => {
            // Application logs: everything except target = "security"
            let app_log = RollingFileAppender::new(Rotation::DAILY, app_dir, APP_LOG_PREFIX);
            let app_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(filter_fn(|meta| meta.target() != "security"));

            // Security logs: target = "security" only, kept forever
            let security_log = RollingFileAppender::new(Rotation::DAILY, security_dir, "security");
            let security_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(security_log))
                .with_filter(filter_fn(|meta| meta.target() == "security"));

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(app_layer)
                .with(security_layer)
                .init();

            // Hourly cleanup of rotated application logs
            tokio::spawn(periodic_cleanup(cleanup_dir));
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .init();
        }
    }
}

/// Clean up rotated application log files older than the retention window
///
/// 只清理 `<dir>/app` 下按天滚动的文件；安全日志不在清理范围内。
pub fn cleanup_old_logs(log_dir: &Path) -> std::io::Result<usize> {
    let cutoff = chrono::Utc::now().date_naive() - chrono::Duration::days(LOG_RETENTION_DAYS);
    let app_dir = log_dir.join("app");
    if !app_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0usize;
    for entry in fs::read_dir(app_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        // Rotated files are named "<prefix>.YYYY-MM-DD"
        let Some(date_part) = name
            .strip_prefix(APP_LOG_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            continue;
        };
        if let Ok(file_date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            if file_date < cutoff {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
    }

    Ok(removed)
}

/// Hourly cleanup task for rotated application logs
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        match cleanup_old_logs(&log_dir) {
            Ok(removed) if removed > 0 => {
                tracing::info!(removed = removed, "Cleaned up old application logs");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "Failed to clean up old logs");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_only_stale_app_logs() {
        let tmp = tempfile::tempdir().unwrap();
        let app_dir = tmp.path().join("app");
        fs::create_dir_all(&app_dir).unwrap();
        fs::create_dir_all(tmp.path().join("security")).unwrap();

        // Stale, current, and non-rotated files
        fs::write(app_dir.join("canteen-server.2020-01-01"), b"old").unwrap();
        let today = chrono::Utc::now().date_naive().format("%Y-%m-%d");
        fs::write(app_dir.join(format!("canteen-server.{}", today)), b"new").unwrap();
        fs::write(app_dir.join("unrelated.txt"), b"keep").unwrap();
        fs::write(
            tmp.path().join("security").join("security.2020-01-01"),
            b"keep",
        )
        .unwrap();

        let removed = cleanup_old_logs(tmp.path()).unwrap();

        assert_eq!(removed, 1);
        assert!(!app_dir.join("canteen-server.2020-01-01").exists());
        assert!(app_dir.join(format!("canteen-server.{}", today)).exists());
        assert!(app_dir.join("unrelated.txt").exists());
        assert!(
            tmp.path()
                .join("security")
                .join("security.2020-01-01")
                .exists()
        );
    }

    #[test]
    fn test_cleanup_on_missing_dir_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(&tmp.path().join("nope")).unwrap(), 0);
    }
}
