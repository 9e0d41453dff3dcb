//! Logging setup for the binary.
//!
//! Filter precedence: `--log-level` > `--verbose` > config `[logging] level`
//! > `RUST_LOG` > `warn`. Output goes to stderr so `convert` can pipe
//! Markdown on stdout.

use crate::cli::LogLevel;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Directive chosen from explicit sources, or `None` to defer to `RUST_LOG`.
pub fn explicit_directive(
    log_level: Option<LogLevel>,
    verbose: bool,
    config_level: Option<&str>,
) -> Option<String> {
    if let Some(level) = log_level {
        return Some(LevelFilter::from(level).to_string().to_lowercase());
    }
    if verbose {
        return Some("debug".to_string());
    }
    config_level
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .map(str::to_string)
}

/// Build the filter for the given sources.
pub fn build_filter(
    log_level: Option<LogLevel>,
    verbose: bool,
    config_level: Option<&str>,
) -> EnvFilter {
    match explicit_directive(log_level, verbose, config_level) {
        Some(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid log level '{directive}': {e}");
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

/// Install the global subscriber.
pub fn init(log_level: Option<LogLevel>, verbose: bool, config_level: Option<&str>) {
    let filter = build_filter(log_level, verbose, config_level);

    // A subscriber may already be installed when called more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
