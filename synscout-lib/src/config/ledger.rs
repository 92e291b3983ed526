use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::analysis::PendingSynLedger;

/// Pending-SYN ledger configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct LedgerConfig {
    /// Maximum number of SYNs waiting for a SYN-ACK
    /// When full, the oldest pending SYN is evicted (it stays counted as unanswered)
    /// Must be > 0 when set
    /// Default: None (unbounded, every SYN is kept until the capture ends)
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl LedgerConfig {
    /// Build an empty ledger honouring the configured capacity
    pub fn build_ledger(&self) -> PendingSynLedger {
        match self.capacity.and_then(NonZeroUsize::new) {
            Some(cap) => PendingSynLedger::with_capacity_limit(cap),
            None => PendingSynLedger::new(),
        }
    }
}
