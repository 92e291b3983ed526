use etherparse::SlicedPacket;
use pcap_file::DataLink;

/// Length of a Linux "cooked" capture (SLL) header
const SLL_HEADER_LEN: usize = 16;
/// EtherType for IPv4
const ETHERTYPE_IPV4: u16 = 0x0800;

/// Link-layer framing of captured packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    /// Ethernet II frames (DLT_EN10MB)
    Ethernet,
    /// Bare IP packets with no link header (DLT_RAW, LINKTYPE_IPV4)
    RawIp,
    /// Linux cooked capture v1 (DLT_LINUX_SLL), e.g. `tcpdump -i any`
    LinuxSll,
}

impl LinkType {
    /// Map a capture file link type. `None` for framings this tool cannot decode.
    pub fn from_datalink(datalink: DataLink) -> Option<Self> {
        match datalink {
            DataLink::ETHERNET => Some(LinkType::Ethernet),
            DataLink::RAW | DataLink::IPV4 => Some(LinkType::RawIp),
            DataLink::LINUX_SLL => Some(LinkType::LinuxSll),
            _ => None,
        }
    }

    /// Slice a frame down to its network and transport headers.
    ///
    /// Slicing only checks lengths and records offsets; header fields are
    /// decoded on access.
    pub fn slice(self, data: &[u8]) -> Option<SlicedPacket<'_>> {
        match self {
            LinkType::Ethernet => SlicedPacket::from_ethernet(data).ok(),
            LinkType::RawIp => SlicedPacket::from_ip(data).ok(),
            LinkType::LinuxSll => {
                if data.len() < SLL_HEADER_LEN {
                    return None;
                }
                let protocol = u16::from_be_bytes([data[14], data[15]]);
                if protocol != ETHERTYPE_IPV4 {
                    return None;
                }
                SlicedPacket::from_ip(&data[SLL_HEADER_LEN..]).ok()
            }
        }
    }
}
