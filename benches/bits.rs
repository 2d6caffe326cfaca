//! Benchmarks for the bit-level primitives the decoder spends most of its
//! time in.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dwg_decode::bit::{BitReader, BitWriter};
use dwg_decode::FileVersion;

fn bench_bit_double(c: &mut Criterion) {
    let mut w = BitWriter::new(FileVersion::Ac1015);
    for i in 0..10_000 {
        w.write_bit_double(i as f64 * 0.25).unwrap();
    }
    let data = w.into_data();

    c.bench_function("read_bit_double_10k", |b| {
        b.iter(|| {
            let mut r = BitReader::new(black_box(&data), FileVersion::Ac1015);
            let mut sum = 0.0;
            for _ in 0..10_000 {
                sum += r.read_bit_double().unwrap();
            }
            black_box(sum)
        })
    });
}

fn bench_modular_char(c: &mut Criterion) {
    let mut w = BitWriter::new(FileVersion::Ac1015);
    for i in 0..10_000u64 {
        w.write_modular_char(i * 37).unwrap();
    }
    let data = w.into_data();

    c.bench_function("read_modular_char_10k", |b| {
        b.iter(|| {
            let mut r = BitReader::new(black_box(&data), FileVersion::Ac1015);
            let mut sum = 0u64;
            for _ in 0..10_000 {
                sum = sum.wrapping_add(r.read_modular_char().unwrap());
            }
            black_box(sum)
        })
    });
}

fn bench_handles(c: &mut Criterion) {
    let mut w = BitWriter::new(FileVersion::Ac1015);
    for i in 1..5_000u64 {
        w.write_handle(i * 3).unwrap();
    }
    let data = w.into_data();

    c.bench_function("read_handle_5k", |b| {
        b.iter(|| {
            let mut r = BitReader::new(black_box(&data), FileVersion::Ac1015);
            let mut sum = 0u64;
            for _ in 1..5_000 {
                sum = sum.wrapping_add(r.read_handle(0).unwrap());
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_bit_double, bench_modular_char, bench_handles);
criterion_main!(benches);
