//! # Ledger Index Benchmarks
//!
//! | Crate | Hot path |
//! |-------|----------|
//! | big-bits | `bits_to_big_bits`, chain weight sums, integrity check |
//! | tx-lookup | entry classification, index write/read, bloom pruning |

use criterion::{criterion_group, criterion_main, Criterion};
use ledger_tests::benchmarks;

fn big_bits(c: &mut Criterion) {
    benchmarks::big_bits::register_benchmarks(c);
}

fn tx_lookup(c: &mut Criterion) {
    benchmarks::tx_lookup::register_benchmarks(c);
}

criterion_group!(benches, big_bits, tx_lookup);
criterion_main!(benches);
