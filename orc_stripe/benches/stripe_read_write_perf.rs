//! Stripe read/write throughput benchmarks.
//!
//! Measures file open (layout validation), single-stripe decode with
//! checksum verification, and encode of a 16-column stripe.

use criterion::{Criterion, criterion_group, criterion_main};
use orc_stripe::{ColumnProjection, ReaderOptions, StripeReader, StripeWriter, WriterOptions};
use std::hint::black_box;

const COLUMNS: usize = 16;
const STRIPES: usize = 64;
const CHUNK_BYTES: usize = 1024;

fn sample_file() -> Vec<u8> {
    let chunk = vec![0x5Au8; CHUNK_BYTES];
    let columns: Vec<&[u8]> = (0..COLUMNS).map(|_| chunk.as_slice()).collect();

    let mut writer = StripeWriter::new(COLUMNS as u32, WriterOptions::default()).expect("writer");
    for _ in 0..STRIPES {
        writer.write_stripe(1024, &columns).expect("write stripe");
    }
    writer.finish()
}

fn bench_open(c: &mut Criterion) {
    let bytes = sample_file();

    c.bench_function("stripe_file_open_64", |b| {
        b.iter(|| StripeReader::open(black_box(&bytes), ReaderOptions::default()).unwrap());
    });
}

fn bench_read_stripe(c: &mut Criterion) {
    let bytes = sample_file();
    let reader = StripeReader::open(&bytes, ReaderOptions::default()).expect("open");
    let all = ColumnProjection::all();
    let narrow = ColumnProjection::select([3, 7]);

    c.bench_function("stripe_read_all_columns", |b| {
        b.iter(|| reader.read_stripe(black_box(17), &all).unwrap());
    });

    c.bench_function("stripe_read_two_columns", |b| {
        b.iter(|| reader.read_stripe(black_box(17), &narrow).unwrap());
    });
}

fn bench_write_stripe(c: &mut Criterion) {
    let chunk = vec![0xA5u8; CHUNK_BYTES];
    let columns: Vec<&[u8]> = (0..COLUMNS).map(|_| chunk.as_slice()).collect();

    c.bench_function("stripe_write_16_columns", |b| {
        b.iter(|| {
            let mut writer = StripeWriter::new(COLUMNS as u32, WriterOptions::default()).unwrap();
            writer.write_stripe(1024, black_box(&columns)).unwrap();
            writer.finish()
        });
    });
}

fn bench_rejection(c: &mut Criterion) {
    let mut bytes = sample_file();
    bytes[3 + 32 + 4] ^= 0xFF;
    let reader = StripeReader::open(&bytes, ReaderOptions::default()).expect("open");

    c.bench_function("stripe_read_checksum_mismatch", |b| {
        b.iter(|| reader.read_stripe(black_box(0), &ColumnProjection::all()).unwrap_err());
    });
}

criterion_group!(
    benches,
    bench_open,
    bench_read_stripe,
    bench_write_stripe,
    bench_rejection,
);
criterion_main!(benches);
