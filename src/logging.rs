use crate::config::Config;
use crate::error::AusmashError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILE_NAME: &str = "ausmash.log";
const DEFAULT_DIRECTIVE: &str = "ausmash=info";

/// Sets up logging for an application embedding the client.
///
/// - Writes to a daily rolling file in the configured or default log directory
/// - Optionally mirrors output to stdout
/// - Honours `RUST_LOG`, defaulting to `ausmash=info`
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub fn init_logging(config: &Config, to_stdout: bool) -> Result<(String, WorkerGuard), AusmashError> {
    let (log_dir, log_file_name) = match &config.log_file_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path.parent().unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DEFAULT_LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), DEFAULT_LOG_FILE_NAME.to_string()),
    };

    if !log_dir.is_empty() && !Path::new(&log_dir).exists() {
        std::fs::create_dir_all(&log_dir).map_err(|e| {
            AusmashError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must outlive every log call or buffered lines are lost
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter()?);

    let stdout_layer = to_stdout.then(|| {
        env_filter().map(|filter| {
            fmt::Layer::new()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_filter(filter)
        })
    });
    let stdout_layer = stdout_layer.transpose()?;

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| AusmashError::log_setup_error(e.to_string()))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    tracing::info!("Logs are being written to: {log_file_path}");

    Ok((log_file_path, guard))
}

fn env_filter() -> Result<EnvFilter, AusmashError> {
    let directive = DEFAULT_DIRECTIVE
        .parse()
        .map_err(|e| AusmashError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}
