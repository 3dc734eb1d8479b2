//! Digest benchmarks
//!
//! Run: `cargo bench -p hashes`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p hashes`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const SIZES: &[usize] = &[8, 24, 64, 256, 1024, 4096, 16384, 65536];

fn bench_city64(c: &mut Criterion) {
  let mut group = c.benchmark_group("city64");

  for &size in SIZES {
    let data = vec![0xA5u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| hashes::city::hash64(std::hint::black_box(data)));
    });
  }

  group.finish();
}

fn bench_city128(c: &mut Criterion) {
  let mut group = c.benchmark_group("city128");

  for &size in SIZES {
    let data = vec![0xA5u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| hashes::city::hash128(std::hint::black_box(data)));
    });
  }

  group.finish();
}

fn bench_farm64(c: &mut Criterion) {
  let mut group = c.benchmark_group("farm64");

  for &size in SIZES {
    let data = vec![0xA5u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| hashes::farm::hash64(std::hint::black_box(data)));
    });
  }

  group.finish();
}

fn bench_hash256(c: &mut Criterion) {
  let mut group = c.benchmark_group("city256");

  let word = checksum::WordCrc::resolve();
  for &size in &[256usize, 1024, 4096, 16384, 65536] {
    let data = vec![0xA5u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| hashes::city::crc::hash256_with(&word, std::hint::black_box(data)));
    });
  }

  group.finish();
}

criterion_group!(benches, bench_city64, bench_city128, bench_farm64, bench_hash256);
criterion_main!(benches);
