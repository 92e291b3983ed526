use std::net::Ipv4Addr;

use etherparse::{NetSlice, SlicedPacket, TcpSlice, TransportSlice};

use super::link::LinkType;
use crate::analysis::{FlowClass, PacketHeaders, TcpObservation};

/// A captured frame sliced into its headers.
pub struct PacketView<'a> {
    sliced: SlicedPacket<'a>,
}

impl<'a> PacketView<'a> {
    /// Slice `data` according to `link`. `None` when the frame cannot be
    /// decoded, which the analyzer treats like any non-TCP packet.
    pub fn parse(data: &'a [u8], link: LinkType) -> Option<Self> {
        link.slice(data).map(|sliced| Self { sliced })
    }

    fn tcp(&self) -> Option<&TcpSlice<'a>> {
        match &self.sliced.transport {
            Some(TransportSlice::Tcp(tcp)) => Some(tcp),
            _ => None,
        }
    }
}

impl PacketHeaders for PacketView<'_> {
    fn tcp_flags(&self) -> Option<u8> {
        self.tcp().map(flag_byte)
    }

    fn observation(&self, class: FlowClass) -> Option<TcpObservation> {
        let tcp = self.tcp()?;
        let Some(NetSlice::Ipv4(ipv4)) = &self.sliced.net else {
            return None;
        };
        let header = ipv4.header();
        Some(TcpObservation {
            source: header.source_addr(),
            destination: header.destination_addr(),
            sequence: tcp.sequence_number(),
            acknowledgment: tcp.acknowledgment_number(),
            class,
        })
    }
}

/// Rebuild byte 13 of the TCP header (CWR..FIN) from the decoded bits.
fn flag_byte(tcp: &TcpSlice<'_>) -> u8 {
    [tcp.fin(), tcp.syn(), tcp.rst(), tcp.psh(), tcp.ack(), tcp.urg(), tcp.ece(), tcp.cwr()]
        .iter()
        .enumerate()
        .fold(0u8, |acc, (bit, &set)| if set { acc | (1 << bit) } else { acc })
}

/// TCP header fields of an already parsed packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpFields {
    pub flags: u8,
    pub sequence: u32,
    pub acknowledgment: u32,
}

/// IPv4 header fields of an already parsed packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Fields {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

/// Packet record from an upstream that has already decoded headers.
///
/// Either header may be absent: no TCP header means the packet is not
/// TCP, no IPv4 header means it travelled over something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedPacket {
    pub tcp: Option<TcpFields>,
    pub ipv4: Option<Ipv4Fields>,
}

impl ParsedPacket {
    /// TCP over IPv4 with arbitrary flags
    pub fn tcp(
        source: Ipv4Addr,
        destination: Ipv4Addr,
        flags: u8,
        sequence: u32,
        acknowledgment: u32,
    ) -> Self {
        Self {
            tcp: Some(TcpFields { flags, sequence, acknowledgment }),
            ipv4: Some(Ipv4Fields { source, destination }),
        }
    }

    pub fn syn(source: Ipv4Addr, destination: Ipv4Addr, sequence: u32) -> Self {
        Self::tcp(source, destination, 0x02, sequence, 0)
    }

    pub fn syn_ack(
        source: Ipv4Addr,
        destination: Ipv4Addr,
        sequence: u32,
        acknowledgment: u32,
    ) -> Self {
        Self::tcp(source, destination, 0x12, sequence, acknowledgment)
    }

    /// TCP segment whose network layer is not IPv4
    pub fn tcp_without_ipv4(flags: u8, sequence: u32, acknowledgment: u32) -> Self {
        Self { tcp: Some(TcpFields { flags, sequence, acknowledgment }), ipv4: None }
    }

    /// Anything that is not TCP (UDP, ICMP, ARP, ...)
    pub fn non_tcp() -> Self {
        Self::default()
    }
}

impl PacketHeaders for ParsedPacket {
    fn tcp_flags(&self) -> Option<u8> {
        self.tcp.map(|t| t.flags)
    }

    fn observation(&self, class: FlowClass) -> Option<TcpObservation> {
        let tcp = self.tcp?;
        let ip = self.ipv4?;
        Some(TcpObservation {
            source: ip.source,
            destination: ip.destination,
            sequence: tcp.sequence,
            acknowledgment: tcp.acknowledgment,
            class,
        })
    }
}
