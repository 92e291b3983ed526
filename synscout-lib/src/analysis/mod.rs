//! Stream analysis: flag classification, SYN/SYN-ACK correlation,
//! per-address accounting and the final scan heuristic.

pub mod classifier;
pub mod engine;
pub mod flags;
pub mod ledger;
pub mod stats;
pub mod types;

pub use classifier::{classify_suspects, verdict, Suspect, SuspectReason, UNANSWERED_PER_ANSWERED};
pub use engine::{analyze, PacketCounters, SynScanAnalyzer};
pub use flags::FlowClass;
pub use ledger::PendingSynLedger;
pub use stats::AddressStats;
pub use types::{AddressCounters, PendingSyn, TcpObservation};

/// Header access needed by the analyzer.
///
/// Split in two so that the flag byte can be checked before anything else
/// is decoded.
pub trait PacketHeaders {
    /// TCP flag byte, or `None` when the packet has no TCP header.
    fn tcp_flags(&self) -> Option<u8>;

    /// Full TCP/IPv4 fields, tagged with `class`.
    ///
    /// `None` when the packet is not TCP over IPv4.
    fn observation(&self, class: FlowClass) -> Option<TcpObservation>;
}
