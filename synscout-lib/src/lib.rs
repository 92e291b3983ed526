#![forbid(unsafe_code)]

pub mod analysis;
pub mod capture;
pub mod config;
pub mod error;
pub mod report;
pub mod scan;
pub mod telemetry;

pub use analysis::{
    analyze, FlowClass, PacketHeaders, PendingSynLedger, Suspect, SuspectReason, SynScanAnalyzer,
};
pub use capture::{CaptureFile, ParsedPacket};
pub use config::{load_from_path, Config, ReportFormat};
pub use error::{Result, ScanError};
pub use report::ScanReport;
pub use scan::scan_capture;
