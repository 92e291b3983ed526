use serde::Deserialize;

/// `[logging]` section. Logs go to stderr; the report owns stdout.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Minimum level emitted. `RUST_LOG`, when set, wins over this.
    ///
    /// At `warn`: orphan SYN-ACKs and captures that end in a read error.
    /// At `info`: capture opened and capture exhausted milestones.
    /// At `debug`: ledger evictions, undecodable frames and handshake
    /// segments that are not IPv4. Expect one line per such packet.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Prefix each line with the emitting module path
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), show_target: false }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
