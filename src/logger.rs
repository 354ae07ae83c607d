use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log level '{level}': {message}")]
    InvalidLevel {
        level: String,
        message: String
    },

    #[error("failed to set subscriber: {0}")]
    AlreadyInitialized(String)
}

/// `level` 可為 `"info"` 等單一 level，或完整的 `EnvFilter` 字串（`"numint=debug"`）。
/// 字串無效時退回 `RUST_LOG`。
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    build_filter_or(level, EnvFilter::try_from_default_env)
}

fn build_filter_or<F, E>(level: &str, fallback: F) -> Result<EnvFilter, LoggerError> where
    F: FnOnce() -> Result<EnvFilter, E>,
    E: std::fmt::Display {
    match EnvFilter::try_new(level) {
        Ok(filter) => Ok(filter),
        Err(level_error) => fallback().map_err(|env_error| LoggerError::InvalidLevel {
            level: level.to_owned(),
            message: format!("{level_error}; RUST_LOG parse failed: {env_error}")
        })
    }
}

/// 初始化全域 tracing subscriber，輸出至 stderr，避免與互動提示混在一起。
pub fn init(level: &str) -> Result<(), LoggerError> {
    let filter = build_filter(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| LoggerError::AlreadyInitialized(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_levels_and_directives() {
        assert!(build_filter("debug").is_ok());
        assert!(build_filter("numint=trace,warn").is_ok());
    }

    #[test]
    fn invalid_level_falls_back_to_environment() {
        let filter = build_filter_or("numint=loud", || EnvFilter::try_new("numint=debug")).unwrap();
        assert!(filter.to_string().contains("numint=debug"));

        let result = build_filter_or("numint=loud", || EnvFilter::try_new("numint=quiet"));
        assert!(matches!(result, Err(LoggerError::InvalidLevel { level, .. }) if level == "numint=loud"));
    }

    #[test]
    fn second_init_fails() {
        let _ = init("warn");
        assert!(matches!(init("warn"), Err(LoggerError::AlreadyInitialized(_))));
    }
}
