use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::{MakeWriterExt, Tee, WithMaxLevel, WithMinLevel};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LogSetupError {
    #[error("Invalid log filter '{filter}': {source}")]
    Filter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("Failed to create log directory '{path}': {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create log file appender: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),
    #[error("Logging already initialized")]
    AlreadyInitialized,
}

/// Where and how verbosely to log.
///
/// `RUST_LOG` overrides `base_level` when it is set.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub base_level: String,
    pub directory: PathBuf,
    pub file_prefix: String,
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: "info".to_string(),
            directory: PathBuf::from("logs"),
            file_prefix: "ridgeflow".to_string(),
            max_log_files: 5,
        }
    }
}

impl LogConfig {
    pub fn with_level(base_level: &str) -> Self {
        Self {
            base_level: base_level.to_string(),
            ..Self::default()
        }
    }
}

/// Installs a console layer (info and below to stdout, warnings and above to
/// stderr) and a daily rolling file layer. Call once per process, from binaries only.
pub fn setup_logging(config: &LogConfig) -> Result<(), LogSetupError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            EnvFilter::try_new(&config.base_level).map_err(|source| LogSetupError::Filter {
                filter: config.base_level.clone(),
                source,
            })?
        }
    };

    std::fs::create_dir_all(&config.directory).map_err(|source| LogSetupError::Directory {
        path: config.directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .max_log_files(config.max_log_files)
        .build(&config.directory)?;

    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    LOG_GUARD
        .set(guard)
        .map_err(|_| LogSetupError::AlreadyInitialized)?;

    let console_writer = split_by_level(std::io::stdout, std::io::stderr);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true)
        .with_writer(console_writer);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|_| LogSetupError::AlreadyInitialized)
}

/// Routes `WARN` and `ERROR` events to `severe`, everything else to `routine`.
fn split_by_level<R, S>(routine: R, severe: S) -> Tee<WithMinLevel<R>, WithMaxLevel<S>>
where
    R: for<'w> MakeWriter<'w>,
    S: for<'w> MakeWriter<'w>,
{
    routine
        .with_min_level(Level::INFO)
        .and(severe.with_max_level(Level::WARN))
}
