use thiserror::Error;

/// Errors that abort a scan before any packet is analysed
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Unrecognised capture format: not a pcap or pcapng file")]
    UnsupportedFormat,

    #[error("Unsupported capture link type: {0}")]
    UnsupportedLinkType(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
