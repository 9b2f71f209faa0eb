use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError};

pub struct Logger;

impl Logger {
    pub fn text(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let layer = fmt::layer()
            .with_ansi(cfg.use_color)
            .with_target(cfg.with_targets)
            .with_timer(mk_timer());

        tracing_subscriber::registry()
            .with(mk_filter(&cfg.level)?)
            .with(layer)
            .try_init()
            .map_err(as_error)
    }

    pub fn json(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        let layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_ansi(false)
            .with_target(cfg.with_targets)
            .with_timer(mk_timer());

        tracing_subscriber::registry()
            .with(mk_filter(&cfg.level)?)
            .with(layer)
            .try_init()
            .map_err(as_error)
    }

    pub fn journald(cfg: &LoggerConfig) -> Result<(), LoggerError> {
        mk_journald(mk_filter(&cfg.level)?)
    }
}

fn mk_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(level).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

/// RFC3339 timestamps in the local offset, UTC when the offset cannot be determined.
fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn as_error(e: impl std::fmt::Display) -> LoggerError {
    let s = e.to_string();
    if s.contains("SetGlobalDefaultError") || s.contains("global default trace dispatcher") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::InitializationFailed(s)
    }
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn mk_journald(filter: EnvFilter) -> Result<(), LoggerError> {
    let journald = tracing_journald::layer()
        .map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(journald)
        .try_init()
        .map_err(as_error)
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn mk_journald(_filter: EnvFilter) -> Result<(), LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_directives() {
        assert!(mk_filter("info").is_ok());
        assert!(mk_filter("bkp_core=debug,warn").is_ok());
    }

    #[test]
    fn filter_rejects_unknown_level() {
        let err = mk_filter("bkp_core=loud").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLogLevel(ref l) if l == "bkp_core=loud"));
    }

    #[test]
    fn second_init_is_reported() {
        let cfg = LoggerConfig::default();
        let _ = Logger::text(&cfg);
        assert!(Logger::json(&cfg).is_err());
    }
}
