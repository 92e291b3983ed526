use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use crate::analysis::Suspect;
use crate::error::{Result, ScanError};

/// End-of-run result of a scan pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub tcp_packets: u64,
    pub syn_packets: u64,
    pub syn_ack_packets: u64,
    pub orphan_syn_acks: u64,
    /// SYNs dropped from a bounded ledger before they could be matched
    pub evicted_syns: u64,
    /// SYNs still unmatched when the capture ended
    pub pending_syns: u64,
    /// Flagged addresses, in the order the statistics table yielded them
    pub suspects: Vec<Suspect>,
}

impl ScanReport {
    pub fn suspect_addresses(&self) -> Vec<Ipv4Addr> {
        self.suspects.iter().map(|s| s.address).collect()
    }

    pub fn is_suspect(&self, address: Ipv4Addr) -> bool {
        self.suspects.iter().any(|s| s.address == address)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::Report(format!("Failed to serialize report: {e}")))
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of TCP packets read: {}", self.tcp_packets)?;
        writeln!(f, "Number of SYN packets read: {}", self.syn_packets)?;
        writeln!(f, "Number of SYN-ACK packets read: {}", self.syn_ack_packets)?;
        if self.orphan_syn_acks > 0 {
            writeln!(f, "SYN-ACKs without a matching SYN: {}", self.orphan_syn_acks)?;
        }
        if self.evicted_syns > 0 {
            writeln!(f, "Pending SYNs evicted (ledger full): {}", self.evicted_syns)?;
        }
        writeln!(f)?;
        writeln!(f, "Possible SYN scanning IPs:")?;
        writeln!(f)?;
        for suspect in &self.suspects {
            writeln!(f, "{}", suspect.address)?;
        }
        Ok(())
    }
}
