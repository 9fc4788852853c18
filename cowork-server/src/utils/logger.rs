//! Logging Infrastructure
//!
//! `tracing-subscriber` setup with an env filter and optional daily file output.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional file output
///
/// `RUST_LOG` wins over `log_level` when set. File output is used only when
/// `log_dir` exists.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cowork_server={level},shared={level},tower_http={level},sqlx=warn"
        ))
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir.map(Path::new).filter(|p| p.is_dir()) {
        let file_appender = tracing_appender::rolling::daily(dir, "cowork-server");
        let _ = subscriber.with_ansi(false).with_writer(file_appender).try_init();
        return;
    }

    // a second init (tests, embedding) keeps the first subscriber
    let _ = subscriber.try_init();
}
