use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pcap_decap::{decapsulate, CaptureFile, DecodeOptions, PcapParser};

/// Builds a native byte order capture of `count` ICMP echo requests carrying 56 bytes each.
fn capture(count: usize) -> Vec<u8> {
    let mut data = hex::decode("a1b2c3d40002000400000000000000000000ffff00000001").unwrap();
    let body = hex::decode(
        "52540012350200163e4b7a1c08004500005400010000400100000a0000010a0000020800000000010001",
    )
    .unwrap();

    for i in 0..count as u32 {
        data.extend_from_slice(&i.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&98u32.to_be_bytes());
        data.extend_from_slice(&98u32.to_be_bytes());
        data.extend_from_slice(&body);
        data.extend((0..56).map(|b| b as u8));
    }

    data
}

fn bench_parse(c: &mut Criterion) {
    let data = capture(10_000);

    let mut group = c.benchmark_group("Pcap");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("Parser", |b| {
        b.iter(|| {
            let (mut src, mut parser) = PcapParser::new(&data).unwrap();
            while !src.is_empty() {
                let (rem, packet) = parser.next_packet(src).unwrap();
                black_box(packet);
                src = rem;
            }
        })
    });

    group.bench_function("CaptureFile", |b| b.iter(|| black_box(CaptureFile::from_slice(&data).unwrap())));

    group.bench_function("Decapsulate", |b| b.iter(|| black_box(decapsulate(&data, DecodeOptions::default()).unwrap())));

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
