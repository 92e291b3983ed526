//! Shared helpers: frame builders and capture file writers.
#![allow(dead_code)]

use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use etherparse::PacketBuilder;
use pcap_file::pcap::{PcapHeader, PcapPacket, PcapWriter};
use pcap_file::pcapng::blocks::enhanced_packet::EnhancedPacketBlock;
use pcap_file::pcapng::blocks::interface_description::InterfaceDescriptionBlock;
use pcap_file::pcapng::{Block, PcapNgWriter};
use pcap_file::DataLink;

pub type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

const SRC_MAC: [u8; 6] = [0x02, 0, 0, 0, 0, 0x01];
const DST_MAC: [u8; 6] = [0x02, 0, 0, 0, 0, 0x02];

/// Ethernet/IPv4/TCP SYN
pub fn syn_frame(src: [u8; 4], dst: [u8; 4], seq: u32) -> Result<Vec<u8>, BoxError> {
    let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4(src, dst, 64)
        .tcp(40000, 80, seq, 64240)
        .syn();
    let mut frame = Vec::with_capacity(builder.size(0));
    builder.write(&mut frame, &[])?;
    Ok(frame)
}

/// Ethernet/IPv4/TCP SYN-ACK
pub fn syn_ack_frame(src: [u8; 4], dst: [u8; 4], seq: u32, ack: u32) -> Result<Vec<u8>, BoxError> {
    let builder = PacketBuilder::ethernet2(DST_MAC, SRC_MAC)
        .ipv4(src, dst, 64)
        .tcp(80, 40000, seq, 65535)
        .syn()
        .ack(ack);
    let mut frame = Vec::with_capacity(builder.size(0));
    builder.write(&mut frame, &[])?;
    Ok(frame)
}

/// Ethernet/IPv4/TCP segment with only ACK set, carrying a payload
pub fn ack_frame(src: [u8; 4], dst: [u8; 4], seq: u32, ack: u32) -> Result<Vec<u8>, BoxError> {
    let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4(src, dst, 64)
        .tcp(40000, 80, seq, 64240)
        .ack(ack);
    let payload = b"GET / HTTP/1.1\r\n\r\n";
    let mut frame = Vec::with_capacity(builder.size(payload.len()));
    builder.write(&mut frame, payload)?;
    Ok(frame)
}

/// Ethernet/IPv4/UDP datagram
pub fn udp_frame(src: [u8; 4], dst: [u8; 4]) -> Result<Vec<u8>, BoxError> {
    let builder = PacketBuilder::ethernet2(SRC_MAC, DST_MAC).ipv4(src, dst, 64).udp(5353, 53);
    let payload = [0u8; 12];
    let mut frame = Vec::with_capacity(builder.size(payload.len()));
    builder.write(&mut frame, &payload)?;
    Ok(frame)
}

/// IPv4/TCP SYN with no link header
pub fn raw_ip_syn(src: [u8; 4], dst: [u8; 4], seq: u32) -> Result<Vec<u8>, BoxError> {
    let builder = PacketBuilder::ipv4(src, dst, 64).tcp(40000, 22, seq, 64240).syn();
    let mut packet = Vec::with_capacity(builder.size(0));
    builder.write(&mut packet, &[])?;
    Ok(packet)
}

/// Write a classic pcap file
pub fn write_pcap(path: &Path, datalink: DataLink, frames: &[Vec<u8>]) -> TestResult {
    let file = File::create(path)?;
    let header = PcapHeader { datalink, ..Default::default() };
    let mut writer = PcapWriter::with_header(file, header)?;
    for (i, frame) in frames.iter().enumerate() {
        let packet = PcapPacket::new(Duration::from_millis(i as u64), frame.len() as u32, frame);
        writer.write_packet(&packet)?;
    }
    Ok(())
}

/// Write a pcapng file with a single Ethernet interface
pub fn write_pcapng(path: &Path, frames: &[Vec<u8>]) -> TestResult {
    let packets: Vec<(u32, Vec<u8>)> = frames.iter().map(|f| (0, f.clone())).collect();
    write_pcapng_sections(
        path,
        &[PcapNgSection { interfaces: vec![DataLink::ETHERNET], packets }],
    )
}

/// One pcapng section: its interface table and `(interface_id, frame)` pairs
pub struct PcapNgSection {
    pub interfaces: Vec<DataLink>,
    pub packets: Vec<(u32, Vec<u8>)>,
}

/// Write a pcapng file; every section after the first starts with a fresh
/// section header, so interface ids restart at 0.
pub fn write_pcapng_sections(path: &Path, sections: &[PcapNgSection]) -> TestResult {
    let file = File::create(path)?;
    let mut writer = PcapNgWriter::new(file)?;
    let section_header = writer.section().clone();
    let mut ts = 0u64;
    for (n, section) in sections.iter().enumerate() {
        if n > 0 {
            writer.write_block(&Block::SectionHeader(section_header.clone()))?;
        }
        for &linktype in &section.interfaces {
            let interface =
                InterfaceDescriptionBlock { linktype, snaplen: 0xFFFF, options: vec![] };
            writer.write_block(&Block::InterfaceDescription(interface))?;
        }
        for (interface_id, frame) in &section.packets {
            ts += 1;
            let packet = EnhancedPacketBlock {
                interface_id: *interface_id,
                timestamp: Duration::from_millis(ts),
                original_len: frame.len() as u32,
                data: Cow::Borrowed(frame.as_slice()),
                options: vec![],
            };
            writer.write_block(&Block::EnhancedPacket(packet))?;
        }
    }
    Ok(())
}

/// Prefix `packet` with a Linux cooked (SLL v1) header carrying `protocol`
pub fn sll_frame(protocol: u16, packet: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(16 + packet.len());
    frame.extend_from_slice(&0u16.to_be_bytes()); // packet type: to us
    frame.extend_from_slice(&1u16.to_be_bytes()); // ARPHRD_ETHER
    frame.extend_from_slice(&6u16.to_be_bytes()); // address length
    frame.extend_from_slice(&SRC_MAC);
    frame.extend_from_slice(&[0, 0]); // address padding
    frame.extend_from_slice(&protocol.to_be_bytes());
    frame.extend_from_slice(packet);
    frame
}

pub fn capture_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
