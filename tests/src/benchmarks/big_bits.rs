//! # Big-Bits Benchmarks
//!
//! - `bits_to_big_bits`: cost grows with the magnitude's bit length
//! - `entropy_big_bits_to_difficulty_bits`: a division and a shift
//! - Integrity check: one full re-derivation of the constant set

use std::time::Duration;

use big_bits::{
    bits_to_big_bits, entropy_big_bits_to_difficulty_bits, IntegrityMonitor, MonitorConfig,
    ProcessConstants,
};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use num_bigint::BigUint;
use rand::Rng;

fn random_magnitude(bits: u64) -> BigUint {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..bits.div_ceil(8)).map(|_| rng.gen()).collect();
    // Force the top bit so the magnitude has exactly `bits` bits
    BigUint::from_bytes_be(&bytes) | (BigUint::from(1u32) << (bits - 1))
}

pub fn bench_bits_to_big_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("big-bits/bits_to_big_bits");
    group.measurement_time(Duration::from_secs(10));

    for bits in [16u64, 64, 128, 256, 512] {
        let magnitude = random_magnitude(bits);
        group.bench_with_input(BenchmarkId::from_parameter(bits), &magnitude, |b, m| {
            b.iter(|| black_box(bits_to_big_bits(m)))
        });
    }

    group.finish();
}

pub fn bench_chain_weight(c: &mut Criterion) {
    let mut group = c.benchmark_group("big-bits/chain_weight");

    for blocks in [100usize, 1_000] {
        let difficulties: Vec<BigUint> = (0..blocks).map(|_| random_magnitude(64)).collect();
        group.throughput(Throughput::Elements(blocks as u64));
        group.bench_with_input(BenchmarkId::new("sum", blocks), &difficulties, |b, d| {
            b.iter(|| {
                let total: BigUint = d
                    .iter()
                    .filter_map(|x| bits_to_big_bits(x).ok())
                    .sum();
                black_box(entropy_big_bits_to_difficulty_bits(&total))
            })
        });
    }

    group.finish();
}

pub fn bench_integrity_check(c: &mut Criterion) {
    let monitor = IntegrityMonitor::new(ProcessConstants, MonitorConfig::default());
    c.bench_function("big-bits/integrity_check", |b| {
        b.iter(|| black_box(monitor.check().is_ok()))
    });
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_bits_to_big_bits(c);
    bench_chain_weight(c);
    bench_integrity_check(c);
}
