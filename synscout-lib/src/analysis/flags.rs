/// SYN bit of the TCP flag byte (byte 13 of the TCP header).
pub const TCP_FLAG_SYN: u8 = 0x02;
/// ACK bit of the TCP flag byte.
pub const TCP_FLAG_ACK: u8 = 0x10;

/// Handshake role of a TCP segment, decided from its flag byte alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowClass {
    /// Only SYN is set: a connection attempt.
    Syn,
    /// Exactly SYN and ACK are set: the responder's half of the handshake.
    SynAck,
    /// Anything else, including SYNs carrying ECN or other extra bits.
    Other,
}

impl FlowClass {
    /// Classify a raw flag byte. Exact comparison: extra bits demote the
    /// segment to `Other`.
    pub fn from_flags(flags: u8) -> Self {
        match flags {
            TCP_FLAG_SYN => FlowClass::Syn,
            f if f == TCP_FLAG_SYN | TCP_FLAG_ACK => FlowClass::SynAck,
            _ => FlowClass::Other,
        }
    }

    /// Whether this class needs full header extraction.
    pub fn is_handshake(self) -> bool {
        matches!(self, FlowClass::Syn | FlowClass::SynAck)
    }
}
