use env_logger::{Builder, Target};
use log::{info, LevelFilter};
use std::fs::File;
use std::path::Path;

const LOG_ENV: &str = "PARTICLE_FIELD_LOG";

fn get_log_level(log_level: &str) -> LevelFilter {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Send log output to `log_file`. The terminal belongs to the UI, so
/// without a file nothing is logged.
///
/// Level priority: CLI argument, env var, default (info).
pub fn init_logger(log_file: Option<&Path>, user_log_level: Option<&str>) -> Result<(), String> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;

    let log_level = user_log_level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| "info".to_string());

    let mut log_builder = Builder::new();
    log_builder
        .target(Target::Pipe(Box::new(file)))
        .filter_level(get_log_level(&log_level))
        .try_init()
        .map_err(|e| format!("Failed to initialise logger: {}", e))?;

    info!("Log level {}", get_log_level(&log_level));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(get_log_level("debug"), LevelFilter::Debug);
        assert_eq!(get_log_level(" WARN "), LevelFilter::Warn);
        assert_eq!(get_log_level("off"), LevelFilter::Off);
        assert_eq!(get_log_level("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_no_log_file_is_a_no_op() {
        assert!(init_logger(None, Some("trace")).is_ok());
    }
}
