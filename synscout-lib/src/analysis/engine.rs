use serde::Serialize;
use tracing::{debug, warn};

use super::classifier::classify_suspects;
use super::flags::FlowClass;
use super::ledger::PendingSynLedger;
use super::stats::AddressStats;
use super::types::TcpObservation;
use super::PacketHeaders;
use crate::report::ScanReport;

/// Raw packet counters maintained alongside the ledger and statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PacketCounters {
    /// Every packet that carried a TCP header
    pub tcp_packets: u64,
    /// Pure SYN segments
    pub syn_packets: u64,
    /// Pure SYN-ACK segments
    pub syn_ack_packets: u64,
    /// SYN-ACKs that matched no pending SYN
    pub orphan_syn_acks: u64,
}

/// Single-pass SYN-scan analyzer.
///
/// Owns every piece of state the pass needs. Feed packets in capture
/// order with [`process`](Self::process), then call
/// [`finish`](Self::finish) once to classify.
#[derive(Debug, Default)]
pub struct SynScanAnalyzer {
    ledger: PendingSynLedger,
    stats: AddressStats,
    counters: PacketCounters,
}

impl SynScanAnalyzer {
    /// Analyzer with an unbounded pending-SYN ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer using the given (possibly bounded) ledger
    pub fn with_ledger(ledger: PendingSynLedger) -> Self {
        Self { ledger, stats: AddressStats::new(), counters: PacketCounters::default() }
    }

    /// Handle one packet.
    ///
    /// Only the flag byte is read for packets that are not SYN or SYN-ACK.
    /// Packets without a TCP header are ignored entirely, and handshake
    /// segments that are not IPv4 are counted but not tracked.
    pub fn process<P: PacketHeaders + ?Sized>(&mut self, packet: &P) -> FlowClass {
        let Some(flags) = packet.tcp_flags() else {
            return FlowClass::Other;
        };
        self.counters.tcp_packets += 1;

        let class = FlowClass::from_flags(flags);
        match class {
            FlowClass::Syn => self.counters.syn_packets += 1,
            FlowClass::SynAck => self.counters.syn_ack_packets += 1,
            FlowClass::Other => return class,
        }

        match packet.observation(class) {
            Some(obs) => self.observe(&obs),
            None => debug!(?class, "handshake segment without IPv4 header; not tracked"),
        }
        class
    }

    /// Apply an already extracted SYN or SYN-ACK to the ledger and
    /// statistics. Other classes are ignored.
    ///
    /// Packet counters are not touched here; [`process`](Self::process)
    /// maintains them.
    pub fn observe(&mut self, obs: &TcpObservation) {
        match obs.class {
            FlowClass::Syn => self.on_syn(obs),
            FlowClass::SynAck => self.on_syn_ack(obs),
            FlowClass::Other => {}
        }
    }

    fn on_syn(&mut self, obs: &TcpObservation) {
        self.ledger.record_syn(obs.source, obs.sequence);
        self.stats.note_unanswered_syn(obs.source);
    }

    fn on_syn_ack(&mut self, obs: &TcpObservation) {
        match self.ledger.try_match(obs.acknowledgment) {
            Some(pending) => {
                // credit the initiator recorded with the SYN, not the responder
                let credited = self.stats.note_matched_syn_ack(pending.source);
                debug_assert!(credited, "ledger entry for {} has no unanswered SYN", pending.source);
            }
            None => {
                self.counters.orphan_syn_acks += 1;
                warn!(
                    source = %obs.source,
                    destination = %obs.destination,
                    ack = obs.acknowledgment,
                    "found a SYN-ACK without a matching SYN; ignored"
                );
            }
        }
    }

    pub fn counters(&self) -> &PacketCounters {
        &self.counters
    }

    pub fn ledger(&self) -> &PendingSynLedger {
        &self.ledger
    }

    pub fn stats(&self) -> &AddressStats {
        &self.stats
    }

    /// Run the final classification and produce the report.
    pub fn finish(mut self) -> ScanReport {
        let suspects = classify_suspects(&mut self.stats);
        ScanReport {
            tcp_packets: self.counters.tcp_packets,
            syn_packets: self.counters.syn_packets,
            syn_ack_packets: self.counters.syn_ack_packets,
            orphan_syn_acks: self.counters.orphan_syn_acks,
            evicted_syns: self.ledger.evicted(),
            pending_syns: self.ledger.len() as u64,
            suspects,
        }
    }
}

/// Analyse a finite packet sequence from scratch.
pub fn analyze<I, P>(packets: I, ledger: PendingSynLedger) -> ScanReport
where
    I: IntoIterator<Item = P>,
    P: PacketHeaders,
{
    let mut analyzer = SynScanAnalyzer::with_ledger(ledger);
    for packet in packets {
        analyzer.process(&packet);
    }
    analyzer.finish()
}
