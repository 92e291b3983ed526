use std::str::FromStr;

use tracing_subscriber::filter::LevelFilter;

use crate::config::types::Config;

pub fn validate(config: &Config) -> Result<(), String> {
    if config.ledger.capacity == Some(0) {
        return Err("ledger.capacity must be > 0 (omit it for an unbounded ledger)".into());
    }
    if LevelFilter::from_str(config.logging.level.trim()).is_err() {
        return Err(format!(
            "logging.level '{}' is not one of off, error, warn, info, debug, trace",
            config.logging.level
        ));
    }
    Ok(())
}
