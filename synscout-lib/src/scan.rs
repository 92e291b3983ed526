use std::path::Path;

use tracing::{debug, info, warn};

use crate::analysis::{PendingSynLedger, SynScanAnalyzer};
use crate::capture::CaptureFile;
use crate::error::Result;
use crate::report::ScanReport;

/// Analyse a capture file end to end.
///
/// Fails only if the file cannot be opened. A read error part way through
/// ends the pass early and the packets read so far are still reported. The
/// file is closed before classification runs.
pub fn scan_capture<P: AsRef<Path>>(path: P, ledger: PendingSynLedger) -> Result<ScanReport> {
    let mut capture = CaptureFile::open(path)?;
    info!(
        path = %capture.path().display(),
        format = ?capture.format(),
        "capture opened; searching for TCP SYN and SYN-ACK packets"
    );

    let mut analyzer = SynScanAnalyzer::with_ledger(ledger);
    let frames = feed_capture(&mut capture, &mut analyzer);
    drop(capture);

    info!(
        frames,
        tcp = analyzer.counters().tcp_packets,
        pending = analyzer.ledger().len(),
        addresses = analyzer.stats().len(),
        "capture exhausted; evaluating unanswered SYNs"
    );
    Ok(analyzer.finish())
}

/// Push every frame of `capture` through `analyzer`, returning the number
/// of frames read.
pub fn feed_capture(capture: &mut CaptureFile, analyzer: &mut SynScanAnalyzer) -> u64 {
    let mut frames = 0u64;
    while let Some(next) = capture.next_frame() {
        let frame = match next {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%err, frames, "capture read failed; analysing the packets read so far");
                break;
            }
        };
        frames += 1;

        match frame.view() {
            Some(view) => {
                analyzer.process(&view);
            }
            None => debug!(frame = frames, ts = ?frame.timestamp, "undecodable frame skipped"),
        }
    }
    frames
}
