//! Offline capture input: file reading and header extraction.

pub mod link;
pub mod packet;
pub mod reader;

pub use link::LinkType;
pub use packet::{Ipv4Fields, PacketView, ParsedPacket, TcpFields};
pub use reader::{CaptureFile, CaptureFormat, Frame};
