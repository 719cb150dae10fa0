// Logging module - `[logging]` settings and tracing subscriber setup
//
// Stdout gets human-readable output. When `json_dir` is set, a second layer
// writes JSON lines through a non-blocking rolling appender.
//
// Precedence: RUST_LOG env var > config file > default "info"

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the background log writer alive; drop it only at exit so logs flush
pub type LogGuard = tracing_appender::non_blocking::WorkerGuard;

/// File name prefix of the JSON log files (`tagkit.2025-01-15`)
const LOG_FILE_PREFIX: &str = "tagkit";

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }

    fn rotation(self) -> Rotation {
        match self {
            Self::Hourly => Rotation::HOURLY,
            Self::Daily => Rotation::DAILY,
            Self::Never => Rotation::NEVER,
        }
    }
}

/// The `[logging]` config section; every key is optional
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for tagkit's own targets: trace, debug, info, warn, error
    pub level: String,
    /// Also write JSON lines here; stdout only when unset
    pub json_dir: Option<PathBuf>,
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_dir: None,
            rotation: LogRotation::Daily,
        }
    }
}

/// Default filter directive for a configured level
pub fn default_filter(level: &str) -> String {
    format!("tagkit={},tower_http=debug,axum=debug", level)
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Option<LogGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.level).into());

    let appender = config
        .json_dir
        .as_deref()
        .and_then(|dir| json_appender(dir, config.rotation));
    let Some(appender) = appender else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
        return None;
    };

    // Writes happen on a background thread
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

/// Rolling appender under `dir`, or `None` (stdout only) when it cannot be opened
fn json_appender(dir: &Path, rotation: LogRotation) -> Option<RollingFileAppender> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Warning: Could not create log directory {:?}: {}", dir, e);
        return None;
    }

    let built = RollingFileAppender::builder()
        .rotation(rotation.rotation())
        .filename_prefix(LOG_FILE_PREFIX)
        .build(dir);
    match built {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!("Warning: Could not open log file in {:?}: {}", dir, e);
            None
        }
    }
}
