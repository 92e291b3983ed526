use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

use pcap_file::pcap::PcapReader;
use pcap_file::pcapng::{Block, PcapNgReader};
use pcap_file::PcapError;
use tracing::warn;

use super::link::LinkType;
use super::packet::PacketView;
use crate::error::{Result, ScanError};

const PCAPNG_MAGIC: [u8; 4] = [0x0a, 0x0d, 0x0d, 0x0a];

/// Classic pcap magic numbers: micro/nanosecond, both byte orders
const PCAP_MAGICS: [[u8; 4]; 4] = [
    [0xd4, 0xc3, 0xb2, 0xa1],
    [0xa1, 0xb2, 0xc3, 0xd4],
    [0x4d, 0x3c, 0xb2, 0xa1],
    [0xa1, 0xb2, 0x3c, 0x4d],
];

/// On-disk capture container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFormat {
    Pcap,
    PcapNg,
}

/// One captured frame
pub struct Frame<'a> {
    /// Framing of `data`; `None` when the capturing interface used a link
    /// type this tool does not decode
    pub link: Option<LinkType>,
    pub timestamp: Duration,
    pub data: Cow<'a, [u8]>,
}

impl Frame<'_> {
    /// Slice the frame's headers, `None` if it cannot be decoded
    pub fn view(&self) -> Option<PacketView<'_>> {
        self.link.and_then(|link| PacketView::parse(&self.data, link))
    }
}

enum Reader {
    Pcap { reader: PcapReader<BufReader<File>>, link: LinkType },
    PcapNg { reader: PcapNgReader<BufReader<File>>, interfaces: Vec<Option<LinkType>> },
}

/// An offline capture opened for sequential reading.
///
/// The underlying file handle is closed when the value is dropped.
pub struct CaptureFile {
    path: PathBuf,
    format: CaptureFormat,
    reader: Reader,
}

impl CaptureFile {
    /// Open a pcap or pcapng file, detecting the format from its magic number.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ScanError::Capture(format!("Failed to open capture file {}: {e}", path.display()))
        })?;
        let mut buf = BufReader::new(file);

        let format = match sniff_format(&mut buf)? {
            Some(format) => format,
            None => return Err(ScanError::UnsupportedFormat),
        };

        let reader = match format {
            CaptureFormat::Pcap => {
                let reader = PcapReader::new(buf).map_err(|e| capture_error(path, e))?;
                let datalink = reader.header().datalink;
                let link = LinkType::from_datalink(datalink)
                    .ok_or_else(|| ScanError::UnsupportedLinkType(format!("{datalink:?}")))?;
                Reader::Pcap { reader, link }
            }
            CaptureFormat::PcapNg => {
                let reader = PcapNgReader::new(buf).map_err(|e| capture_error(path, e))?;
                Reader::PcapNg { reader, interfaces: Vec::new() }
            }
        };

        Ok(Self { path: path.to_path_buf(), format, reader })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> CaptureFormat {
        self.format
    }

    /// Read the next frame.
    ///
    /// `None` at end of file. An error means the rest of the file cannot be
    /// read (truncated or corrupt); frames already returned stay valid.
    pub fn next_frame(&mut self) -> Option<Result<Frame<'_>>> {
        let path = &self.path;
        match &mut self.reader {
            Reader::Pcap { reader, link } => {
                let link = *link;
                let packet = reader.next_packet()?;
                Some(
                    packet
                        .map(|p| Frame { link: Some(link), timestamp: p.timestamp, data: p.data })
                        .map_err(|e| capture_error(path, e)),
                )
            }
            Reader::PcapNg { reader, interfaces } => loop {
                let block = match reader.next_block()? {
                    Ok(block) => block,
                    Err(e) => return Some(Err(capture_error(path, e))),
                };
                match block {
                    // interface ids restart with every section
                    Block::SectionHeader(_) => interfaces.clear(),
                    Block::InterfaceDescription(idb) => {
                        let link = LinkType::from_datalink(idb.linktype);
                        if link.is_none() {
                            warn!(
                                interface = interfaces.len(),
                                linktype = ?idb.linktype,
                                "unsupported link type; packets on this interface are skipped"
                            );
                        }
                        interfaces.push(link);
                    }
                    // returning a borrow of `reader` from inside the loop does not
                    // pass borrowck, so pcapng frames are copied out
                    Block::EnhancedPacket(epb) => {
                        let link = interfaces.get(epb.interface_id as usize).copied().flatten();
                        return Some(Ok(Frame {
                            link,
                            timestamp: epb.timestamp,
                            data: Cow::Owned(epb.data.into_owned()),
                        }));
                    }
                    Block::SimplePacket(spb) => {
                        let link = interfaces.first().copied().flatten();
                        return Some(Ok(Frame {
                            link,
                            timestamp: Duration::ZERO,
                            data: Cow::Owned(spb.data.into_owned()),
                        }));
                    }
                    _ => {}
                }
            },
        }
    }
}

fn sniff_format(buf: &mut BufReader<File>) -> Result<Option<CaptureFormat>> {
    let head = buf.fill_buf()?;
    if head.len() < 4 {
        return Ok(None);
    }
    let magic = [head[0], head[1], head[2], head[3]];
    if magic == PCAPNG_MAGIC {
        Ok(Some(CaptureFormat::PcapNg))
    } else if PCAP_MAGICS.contains(&magic) {
        Ok(Some(CaptureFormat::Pcap))
    } else {
        Ok(None)
    }
}

fn capture_error(path: &Path, err: PcapError) -> ScanError {
    ScanError::Capture(format!("{}: {err}", path.display()))
}
