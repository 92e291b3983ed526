#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use synscout_lib::config::LoggingConfig;
use synscout_lib::telemetry::init_tracing;
use synscout_lib::{load_from_path, scan_capture, Config, ReportFormat, ScanReport};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Flag hosts showing SYN-scan behaviour in a packet capture")]
struct Cli {
    /// Capture file to analyse (pcap or pcapng)
    #[arg(value_name = "CAPTURE")]
    capture: PathBuf,

    /// Path to configuration TOML file
    #[arg(short, long, value_name = "FILE", env = "SYNSCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Report format, overrides [report] format
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<ReportFormat>,

    /// Maximum pending SYNs kept for matching, overrides [ledger] capacity
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    ledger_capacity: Option<u64>,

    /// Log level, overrides [logging] level
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(cfg) => cfg,
        Err(err) => {
            match init_tracing(&LoggingConfig::default()) {
                Ok(()) => error!(%err, "failed to load configuration"),
                Err(_) => eprintln!("failed to load configuration: {err}"),
            }
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.logging) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    info!(capture = %cli.capture.display(), "opening capture for reading");
    let report = match scan_capture(&cli.capture, config.ledger.build_ledger()) {
        Ok(report) => report,
        Err(err) => {
            error!(%err, "cannot analyse capture");
            return ExitCode::FAILURE;
        }
    };

    match render(&report, config.report.format) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "failed to render report");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> synscout_lib::Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => load_from_path(path)?,
        None => Config::default(),
    };
    if let Some(format) = cli.format {
        cfg.report.format = format;
    }
    if let Some(cap) = cli.ledger_capacity {
        cfg.ledger.capacity = Some(usize::try_from(cap).unwrap_or(usize::MAX));
    }
    if let Some(level) = &cli.log_level {
        cfg.logging.level = level.clone();
    }
    synscout_lib::config::validate(&cfg).map_err(synscout_lib::ScanError::Config)?;
    Ok(cfg)
}

fn render(report: &ScanReport, format: ReportFormat) -> synscout_lib::Result<String> {
    match format {
        ReportFormat::Text => Ok(report.to_string()),
        ReportFormat::Json => report.to_json().map(|json| json + "\n"),
    }
}
