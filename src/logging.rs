use tracing_appender::non_blocking::WorkerGuard;

const LOG_TARGET_STARTUP: &str = "valocoach::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to:
/// - macOS: ~/Library/Application Support/ValoCoach/logs/
/// - Windows: %APPDATA%/ValoCoach/logs/
/// - Linux: ~/.config/ValoCoach/logs/
///
/// Log output:
/// - File: daily rotation, files named valocoach.log.YYYY-MM-DD
/// - Console: stderr, so JSON reports on stdout stay clean
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the life of the process.
pub fn initialize_tracing(verbose: bool) -> Option<WorkerGuard> {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    }

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("ValoCoach").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));

    // Console only if the log directory is unusable
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer())
            .init();
        return None;
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::daily(&log_dir, "valocoach.log"));

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer())
        .init();

    tracing::debug!("Log directory: {}", log_dir.display());
    Some(guard)
}

pub fn log_runtime_environment() {
    use sysinfo::System;

    let version = env!("CARGO_PKG_VERSION");
    let os_name = System::long_os_version()
        .or_else(System::name)
        .unwrap_or_else(|| "Unknown OS".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "Unknown Kernel".to_string());
    let architecture = std::env::consts::ARCH;

    tracing::debug!(target: LOG_TARGET_STARTUP, "Starting ValoCoach v{} on ({})", version, architecture);
    tracing::debug!(target: LOG_TARGET_STARTUP, "Operating System: {} (kernel {})", os_name, kernel);
}
