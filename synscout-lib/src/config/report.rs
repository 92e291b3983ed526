use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Output format of the end-of-run report
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Counters followed by one suspect address per line
    #[default]
    Text,
    /// Full report as pretty-printed JSON
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{other}' (expected 'text' or 'json')")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => f.write_str("text"),
            ReportFormat::Json => f.write_str("json"),
        }
    }
}

/// Report configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ReportConfig {
    /// Output format: "text" or "json"
    /// Default: "text"
    #[serde(default)]
    pub format: ReportFormat,
}
