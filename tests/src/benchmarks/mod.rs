//! # Ledger Index Benchmarks
//!
//! criterion benchmarks per crate, registered from `benches/ledger_benchmarks.rs`.

pub mod big_bits;
