//! Logging initialisation.
//!
//! Progress and warnings go through `tracing`; this module installs the
//! subscriber that prints them to stderr. `RUST_LOG` overrides the level
//! picked from the command line, e.g. `RUST_LOG=effectorseek=debug`.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::{PipelineError, PipelineResult};

/// Maps `-q`/`-v` counts to a level: quiet wins, then 0 = info, 1 = debug,
/// 2+ = trace.
pub fn level_from_verbosity(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(level: Level) -> PipelineResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| PipelineError::Configuration {
            field: "logging".to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(0, false), Level::INFO);
        assert_eq!(level_from_verbosity(1, false), Level::DEBUG);
        assert_eq!(level_from_verbosity(5, false), Level::TRACE);
        assert_eq!(level_from_verbosity(2, true), Level::WARN);
    }
}
