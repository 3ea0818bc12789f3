use criterion::{criterion_group, criterion_main, Criterion, Throughput};

/// Log-like text: repetitive structure with varying numeric fields, the
/// shape this codec is aimed at.
fn synthetic_log(lines: u32) -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..lines {
        data.extend_from_slice(
            format!(
                "2026-01-{:02}T09:{:02}:{:02} worker-{} served /api/v1/items in {} ms\n",
                i % 28 + 1,
                i % 60,
                (i * 17) % 60,
                i % 8,
                (i * 37) % 1500
            )
            .as_bytes(),
        );
    }
    data
}

fn codec_throughput(c: &mut Criterion) {
    let data = synthetic_log(16_000);
    let packed = sbro::compress(&data).unwrap();

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("compress", |b| b.iter(|| sbro::compress(&data).unwrap()));
    group.bench_function("decompress", |b| {
        b.iter(|| sbro::decompress(&packed).unwrap())
    });
    group.finish();
}

criterion_group!(benches, codec_throughput);
criterion_main!(benches);
