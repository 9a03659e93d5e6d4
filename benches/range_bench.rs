use criterion::{criterion_group, criterion_main, Criterion};
use rangecoder::range::{RangeDecoder, RangeEncoder};
use std::io::Cursor;

fn bench_small_alphabet(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_small_alphabet");
    let input = (0..1000).map(|i| i % 3).collect::<Vec<usize>>();
    let count = [2u64, 1, 1];
    let count_cum = [2u64, 3, 4];

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut encoder = RangeEncoder::new(Cursor::new(Vec::new()));
            for &index in &input {
                encoder.encode(&count, &count_cum, index).unwrap();
            }
            encoder.finish().unwrap()
        })
    });

    let mut encoder = RangeEncoder::new(Cursor::new(Vec::new()));
    for &index in &input {
        encoder.encode(&count, &count_cum, index).unwrap();
    }
    let encoded = encoder.finish().unwrap().into_inner();

    group.bench_function("decode", |b| {
        b.iter(|| {
            let mut decoder = RangeDecoder::new(Cursor::new(encoded.clone())).unwrap();
            for _ in 0..input.len() {
                decoder.decode(&count, &count_cum).unwrap();
            }
        })
    });
}

fn bench_byte_alphabet(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_byte_alphabet");

    // A full 256-entry table with mildly skewed weights, the shape a
    // byte-oriented model hands the coder.
    let count: Vec<u64> = (0..256).map(|i| 1 + (i % 16) as u64).collect();
    let mut count_cum = vec![0u64; 256];
    let mut total = 0;
    for (i, &f) in count.iter().enumerate() {
        total += f;
        count_cum[i] = total;
    }
    let input = (0..1000).map(|i| (i * 31) % 256).collect::<Vec<usize>>();

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut encoder = RangeEncoder::new(Cursor::new(Vec::new()));
            for &index in &input {
                encoder.encode(&count, &count_cum, index).unwrap();
            }
            encoder.finish().unwrap()
        })
    });

    let mut encoder = RangeEncoder::new(Cursor::new(Vec::new()));
    for &index in &input {
        encoder.encode(&count, &count_cum, index).unwrap();
    }
    let encoded = encoder.finish().unwrap().into_inner();

    group.bench_function("decode", |b| {
        b.iter(|| {
            let mut decoder = RangeDecoder::new(Cursor::new(encoded.clone())).unwrap();
            for _ in 0..input.len() {
                decoder.decode(&count, &count_cum).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_small_alphabet, bench_byte_alphabet);
criterion_main!(benches);
