//! Micro benchmarks for the SYN-scan analysis pipeline.
//! Pure CPU - no capture files, no IO.
//!
//! ```bash
//! cargo bench --bench bench_analysis
//! ```

use std::net::Ipv4Addr;
use std::num::NonZeroUsize;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use etherparse::PacketBuilder;
use synscout_lib::analysis::{PendingSynLedger, SynScanAnalyzer};
use synscout_lib::capture::{LinkType, PacketView};
use synscout_lib::{analyze, ParsedPacket, PacketHeaders};

const SERVER: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);

/// 256 clients, each answered on every other SYN, plus one scanner probing
/// without answers. Deterministic so runs are comparable.
fn synthetic_stream(len: usize) -> Vec<ParsedPacket> {
    let scanner = Ipv4Addr::new(198, 51, 100, 66);
    let mut packets = Vec::with_capacity(len);
    let mut seq: u32 = 0x4000_0000;
    let mut i = 0usize;
    while packets.len() < len {
        let client = Ipv4Addr::new(192, 0, 2, (i % 256) as u8);
        packets.push(ParsedPacket::syn(client, SERVER, seq));
        if i % 2 == 0 {
            packets.push(ParsedPacket::syn_ack(SERVER, client, seq ^ 0x5a5a, seq.wrapping_add(1)));
        }
        packets.push(ParsedPacket::syn(scanner, SERVER, seq.wrapping_mul(31)));
        seq = seq.wrapping_add(7919);
        i += 1;
    }
    packets.truncate(len);
    packets
}

fn ethernet_syn_ack() -> Vec<u8> {
    let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
        .ipv4([10, 0, 0, 1], [192, 0, 2, 1], 64)
        .tcp(443, 51000, 1234, 64240)
        .syn()
        .ack(5678);
    let mut frame = Vec::with_capacity(builder.size(0));
    if let Err(e) = builder.write(&mut frame, &[]) {
        panic!("failed to build fixture frame: {e}");
    }
    frame
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for len in [1_000usize, 10_000, 100_000] {
        let packets = synthetic_stream(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("unbounded", len), &packets, |b, packets| {
            b.iter(|| {
                analyze(std::hint::black_box(packets).iter().copied(), PendingSynLedger::new())
            });
        });
        group.bench_with_input(BenchmarkId::new("capacity_4096", len), &packets, |b, packets| {
            let cap = NonZeroUsize::new(4096).unwrap_or(NonZeroUsize::MIN);
            b.iter(|| {
                analyze(
                    std::hint::black_box(packets).iter().copied(),
                    PendingSynLedger::with_capacity_limit(cap),
                )
            });
        });
    }
    group.finish();
}

fn bench_ledger_match(c: &mut Criterion) {
    // worst case: the matching SYN is the oldest of many pending ones
    let mut ledger = PendingSynLedger::new();
    for n in 0..10_000u32 {
        ledger.record_syn(Ipv4Addr::new(192, 0, 2, (n % 256) as u8), n * 2);
    }

    c.bench_function("ledger_match_oldest_of_10k", |b| {
        b.iter_batched(
            || ledger.clone(),
            |mut ledger| ledger.try_match(std::hint::black_box(1)),
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_packet_view(c: &mut Criterion) {
    let frame = ethernet_syn_ack();
    match PacketView::parse(&frame, LinkType::Ethernet) {
        Some(view) => assert_eq!(view.tcp_flags(), Some(0x12), "fixture is not a SYN-ACK"),
        None => panic!("fixture frame did not slice"),
    }

    c.bench_function("packet_view_parse_ethernet_syn_ack", |b| {
        b.iter(|| {
            PacketView::parse(std::hint::black_box(&frame), LinkType::Ethernet)
                .and_then(|v| v.tcp_flags())
        });
    });

    c.bench_function("analyzer_process_single_view", |b| {
        let mut analyzer = SynScanAnalyzer::new();
        b.iter(|| {
            if let Some(view) = PacketView::parse(&frame, LinkType::Ethernet) {
                analyzer.process(std::hint::black_box(&view));
            }
        });
    });
}

criterion_group!(analysis_benches, bench_analyze, bench_ledger_match, bench_packet_view);
criterion_main!(analysis_benches);
