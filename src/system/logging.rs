//! 日志初始化
//!
//! 根据 [`LoggingConfig`] 选择输出目标（stdout、追加文件、按天滚动文件）
//! 和格式（text/json）。返回的 `WorkerGuard` 必须在程序运行期间保持存活。

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const DEFAULT_LOG_FILE: &str = "linkdrop.log";

fn build_writer(config: &LoggingConfig) -> anyhow::Result<Box<dyn std::io::Write + Send + Sync>> {
    let Some(log_file) = config.file.as_deref().filter(|f| !f.is_empty()) else {
        return Ok(Box::new(std::io::stdout()));
    };

    let path = Path::new(log_file);

    if config.enable_rotation {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE);

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
            .context("Failed to create rolling log appender")?;
        return Ok(Box::new(appender));
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", log_file))?;
    Ok(Box::new(file))
}

/// 初始化全局 tracing subscriber
///
/// `RUST_LOG` 优先于配置中的 level。重复初始化返回错误。
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let writer = build_writer(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let to_console = config.file.as_deref().is_none_or(str::is_empty);

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(to_console);

    let result = if config.format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_writer_when_no_file() {
        let config = LoggingConfig::default();
        assert!(build_writer(&config).is_ok());
    }

    #[test]
    fn test_append_file_writer() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().into_owned()),
            enable_rotation: false,
            ..Default::default()
        };

        assert!(build_writer(&config).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_rolling_writer_in_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("server.log");
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().into_owned()),
            enable_rotation: true,
            max_backups: 3,
            ..Default::default()
        };

        assert!(build_writer(&config).is_ok());
    }
}
