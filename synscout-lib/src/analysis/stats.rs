use std::net::Ipv4Addr;

use ahash::AHashMap;
use tracing::warn;

use super::types::AddressCounters;

/// Per-initiator SYN accounting.
///
/// Both counters are keyed by the address that *sent the SYN*. A matched
/// SYN-ACK is credited to the initiator recorded in the ledger, never to
/// the responder that sent the SYN-ACK.
///
/// Entries are kept in first-seen order so that two passes over the same
/// capture produce the same suspect list.
#[derive(Debug, Default)]
pub struct AddressStats {
    index: AHashMap<Ipv4Addr, usize>,
    entries: Vec<(Ipv4Addr, AddressCounters)>,
}

impl AddressStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more unanswered SYN from `address`.
    pub fn note_unanswered_syn(&mut self, address: Ipv4Addr) {
        self.entry_mut(address).unanswered += 1;
    }

    /// Move one SYN from `origin` from the unanswered to the answered column.
    ///
    /// Returns `false` if `origin` never sent a SYN; the table is left
    /// unchanged in that case.
    pub fn note_matched_syn_ack(&mut self, origin: Ipv4Addr) -> bool {
        let Some(&idx) = self.index.get(&origin) else {
            warn!(%origin, "matched SYN-ACK for an address with no recorded SYN");
            return false;
        };
        let counters = &mut self.entries[idx].1;
        if counters.unanswered == 0 {
            warn!(%origin, "matched SYN-ACK with no unanswered SYN left for address");
            return false;
        }
        counters.unanswered -= 1;
        counters.answered += 1;
        true
    }

    pub fn get(&self, address: Ipv4Addr) -> Option<&AddressCounters> {
        self.index.get(&address).map(|&idx| &self.entries[idx].1)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (Ipv4Addr, &AddressCounters)> {
        self.entries.iter().map(|(addr, c)| (*addr, c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, yielding them in first-seen order.
    pub fn drain(&mut self) -> impl Iterator<Item = (Ipv4Addr, AddressCounters)> + '_ {
        self.index.clear();
        self.entries.drain(..)
    }

    fn entry_mut(&mut self, address: Ipv4Addr) -> &mut AddressCounters {
        let idx = match self.index.get(&address) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((address, AddressCounters::default()));
                self.index.insert(address, idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }
}
