use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::num::NonZeroUsize;

use tracing::debug;

use super::types::PendingSyn;

/// Outstanding SYNs awaiting a SYN-ACK, kept in insertion order.
///
/// Matching scans from the newest entry backwards: a SYN-ACK usually
/// answers one of the most recent SYNs, so the common case stays short
/// even when thousands of scan probes never get a reply.
///
/// The ledger is unbounded by default. A capacity limit turns it into a
/// FIFO window: inserting into a full ledger evicts the oldest entry. An
/// evicted SYN simply can no longer be matched; it keeps counting as
/// unanswered for its sender.
#[derive(Debug, Clone, Default)]
pub struct PendingSynLedger {
    entries: VecDeque<PendingSyn>,
    capacity: Option<NonZeroUsize>,
    evicted: u64,
}

impl PendingSynLedger {
    /// Create an unbounded ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger that holds at most `capacity` pending SYNs
    pub fn with_capacity_limit(capacity: NonZeroUsize) -> Self {
        Self { entries: VecDeque::new(), capacity: Some(capacity), evicted: 0 }
    }

    /// Record a new SYN.
    ///
    /// Returns the entry that was evicted to make room, if the ledger is
    /// bounded and already full.
    pub fn record_syn(&mut self, source: Ipv4Addr, sequence: u32) -> Option<PendingSyn> {
        let evicted = match self.capacity {
            Some(cap) if self.entries.len() >= cap.get() => {
                let oldest = self.entries.pop_front();
                if let Some(old) = &oldest {
                    self.evicted += 1;
                    debug!(
                        source = %old.source,
                        sequence = old.sequence,
                        capacity = cap.get(),
                        "pending SYN ledger full; evicting oldest entry"
                    );
                }
                oldest
            }
            _ => None,
        };

        self.entries.push_back(PendingSyn { source, sequence });
        evicted
    }

    /// Remove and return the pending SYN answered by a SYN-ACK carrying
    /// `acknowledgment`, if any.
    ///
    /// When several SYNs share a sequence number the most recent one wins.
    pub fn try_match(&mut self, acknowledgment: u32) -> Option<PendingSyn> {
        let idx = self
            .entries
            .iter()
            .rposition(|p| p.expected_ack() == acknowledgment)?;
        self.entries.remove(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity, `None` when unbounded
    pub fn capacity_limit(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// Number of entries dropped because the ledger was full
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Pending entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &PendingSyn> {
        self.entries.iter()
    }
}
