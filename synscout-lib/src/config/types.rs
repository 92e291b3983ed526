use serde::Deserialize;

use super::ledger::LedgerConfig;
use super::logging::LoggingConfig;
use super::report::ReportConfig;

/// Main configuration structure
/// Every section is optional; an empty file is a valid configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Pending-SYN ledger configuration
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Report configuration
    #[serde(default)]
    pub report: ReportConfig,
}
