//! Process logging bootstrap.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend exactly once per process, writing
//!   either rolling files or stderr.
//! - Capture panics as structured log events.
//!
//! # Invariants
//! - Init is idempotent for the same level and sink.
//! - Re-initialization with a different level or sink is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "bookshelf";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    Directory(PathBuf),
}

impl LogSink {
    fn describe(&self) -> String {
        match self {
            Self::Stderr => "stderr".to_string(),
            Self::Directory(dir) => dir.display().to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),
    #[error("log_dir must be an absolute path, got `{0}`")]
    RelativeLogDir(String),
    #[error("failed to create log directory `{path}`: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start logger: {0}")]
    Backend(#[from] flexi_logger::FlexiLoggerError),
    #[error("logging already initialized with {active}; refusing to switch to {requested}")]
    Reconfigure { active: String, requested: String },
}

struct LoggingState {
    level: &'static str,
    sink: LogSink,
    _logger: LoggerHandle,
}

/// Initializes process logging.
///
/// `log_dir = None` (or blank) logs to stderr; otherwise rolling files are
/// written to the given absolute directory.
///
/// # Errors
/// - `level` is unsupported or `log_dir` is relative.
/// - The directory cannot be created or the backend fails to start.
/// - Logging is already active with a different level or sink.
pub fn init_logging(level: &str, log_dir: Option<&str>) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    let sink = normalize_sink(log_dir)?;

    let state = LOGGING_STATE.get_or_try_init(|| start_backend(level, &sink))?;

    if state.level != level || state.sink != sink {
        return Err(LoggingError::Reconfigure {
            active: format!("level `{}` sink `{}`", state.level, state.sink.describe()),
            requested: format!("level `{}` sink `{}`", level, sink.describe()),
        });
    }

    Ok(())
}

/// Returns `(level, sink)` of the active logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, LogSink)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.sink.clone()))
}

/// Returns the default log level for current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_backend(level: &'static str, sink: &LogSink) -> Result<LoggingState, LoggingError> {
    let logger = Logger::try_with_str(level)?;
    let logger = match sink {
        LogSink::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format)
            .start()?,
        LogSink::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()?
        }
    };

    install_panic_hook_once();

    info!(
        "event=app_start module=core status=ok platform={} version={} level={} sink={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        level,
        sink.describe()
    );

    Ok(LoggingState {
        level,
        sink: sink.clone(),
        _logger: logger,
    })
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn normalize_sink(log_dir: Option<&str>) -> Result<LogSink, LoggingError> {
    let Some(trimmed) = log_dir.map(str::trim).filter(|dir| !dir.is_empty()) else {
        return Ok(LogSink::Stderr);
    };
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::RelativeLogDir(trimmed.to_string()));
    }
    Ok(LogSink::Directory(path.to_path_buf()))
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

/// Flattens newlines and caps length; panic payloads may carry form input.
fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::{
        init_logging, logging_status, normalize_level, normalize_sink, sanitize_message,
        LogSink, LoggingError,
    };

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(matches!(
            normalize_level("loud"),
            Err(LoggingError::UnsupportedLevel(_))
        ));
    }

    #[test]
    fn normalize_sink_defaults_to_stderr_and_rejects_relative_dirs() {
        assert_eq!(normalize_sink(None).unwrap(), LogSink::Stderr);
        assert_eq!(normalize_sink(Some("   ")).unwrap(), LogSink::Stderr);
        assert!(matches!(
            normalize_sink(Some("logs/dev")),
            Err(LoggingError::RelativeLogDir(_))
        ));
    }

    #[test]
    fn sanitize_message_removes_newlines_and_truncates() {
        let sanitized = sanitize_message("line1\nline2\rline3", 8);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert!(sanitized.ends_with("..."));
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();

        init_logging("info", Some(&dir_str)).expect("first init should succeed");
        init_logging("info", Some(&dir_str)).expect("same config should be idempotent");

        let level_err = init_logging("debug", Some(&dir_str)).unwrap_err();
        assert!(matches!(level_err, LoggingError::Reconfigure { .. }));

        let sink_err = init_logging("info", None).unwrap_err();
        assert!(sink_err.to_string().contains("refusing to switch"));

        let (level, sink) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(sink, LogSink::Directory(dir.path().to_path_buf()));
    }
}
