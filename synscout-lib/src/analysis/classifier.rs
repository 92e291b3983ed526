use std::net::Ipv4Addr;

use serde::Serialize;

use super::stats::AddressStats;
use super::types::AddressCounters;

/// An address is suspect once its unanswered SYNs exceed this many per
/// answered SYN.
pub const UNANSWERED_PER_ANSWERED: u64 = 3;

/// Why an address was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspectReason {
    /// Sent at least one SYN and never received a SYN-ACK
    NoResponses,
    /// Received some SYN-ACKs, but `answered * 3 < unanswered`
    RatioExceeded,
}

/// An address that looks like it is running a SYN scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suspect {
    pub address: Ipv4Addr,
    pub unanswered: u64,
    pub answered: u64,
    pub reason: SuspectReason,
}

/// Decide whether one address's counters are suspicious.
pub fn verdict(counters: &AddressCounters) -> Option<SuspectReason> {
    if counters.has_answers() {
        (counters.answered.saturating_mul(UNANSWERED_PER_ANSWERED) < counters.unanswered)
            .then_some(SuspectReason::RatioExceeded)
    } else {
        (counters.unanswered >= 1).then_some(SuspectReason::NoResponses)
    }
}

/// Drain the statistics table and return the suspect addresses in table
/// order.
///
/// This is a heuristic: lost replies or asymmetric routing will also
/// produce suspects.
pub fn classify_suspects(stats: &mut AddressStats) -> Vec<Suspect> {
    stats
        .drain()
        .filter_map(|(address, counters)| {
            verdict(&counters).map(|reason| Suspect {
                address,
                unanswered: counters.unanswered,
                answered: counters.answered,
                reason,
            })
        })
        .collect()
}
