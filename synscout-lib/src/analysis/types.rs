use std::net::Ipv4Addr;

use serde::Serialize;

use super::flags::FlowClass;

/// Header fields of a SYN or SYN-ACK segment, extracted once the flag byte
/// has marked the packet as interesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpObservation {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub sequence: u32,
    pub acknowledgment: u32,
    pub class: FlowClass,
}

/// A SYN still waiting for its SYN-ACK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSyn {
    /// Address of the host that sent the SYN
    pub source: Ipv4Addr,
    /// Initial sequence number carried by the SYN
    pub sequence: u32,
}

impl PendingSyn {
    /// Acknowledgment number a SYN-ACK must carry to answer this SYN.
    /// Sequence space wraps at 2^32.
    pub fn expected_ack(&self) -> u32 {
        self.sequence.wrapping_add(1)
    }
}

/// Per-initiator handshake accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AddressCounters {
    /// SYNs sent by this address that have not been matched by a SYN-ACK
    pub unanswered: u64,
    /// SYNs sent by this address that were matched by a SYN-ACK
    pub answered: u64,
}

impl AddressCounters {
    /// Total SYNs originated by this address.
    pub fn syns_sent(&self) -> u64 {
        self.unanswered + self.answered
    }

    /// Whether any SYN-ACK was ever matched for this address.
    pub fn has_answers(&self) -> bool {
        self.answered > 0
    }
}
