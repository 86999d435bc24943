//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set. Otherwise the filter is `log_level` plus one
//! directive per `quiet_crates` entry, so Horizon round trips logged by
//! reqwest and hyper stay out of the relay's own debug output.

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level applied to a quiet crate that does not name its own
const QUIET_LEVEL: &str = "warn";

/// `EnvFilter` directives built from the config
pub fn filter_directives(config: &AppConfig) -> String {
    let mut directives = vec![config.log_level.trim().to_string()];
    for entry in &config.quiet_crates {
        let entry = entry.trim();
        if entry.contains('=') {
            directives.push(entry.to_string());
        } else {
            directives.push(format!("{}={}", entry, QUIET_LEVEL));
        }
    }
    directives.join(",")
}

fn file_appender(config: &AppConfig) -> RollingFileAppender {
    match config.rotation.as_str() {
        "hourly" => rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => rolling::daily(&config.log_dir, &config.log_file),
        _ => rolling::never(&config.log_dir, &config.log_file),
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered file output is lost.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(file_appender(config));

    let directives = filter_directives(config);
    let mut rejected = None;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&directives).unwrap_or_else(|e| {
            rejected = Some(e.to_string());
            EnvFilter::new("info")
        })
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.use_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(writer).with_ansi(false))
            .with(fmt::layer().with_target(false).with_ansi(true))
            .init();
    }

    if let Some(error) = rejected {
        tracing::warn!(%directives, %error, "Log filter rejected, falling back to info");
    }

    guard
}
