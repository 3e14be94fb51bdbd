//! # Ledger Index Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # criterion benchmarks per crate
//! │   ├── big_bits.rs
//! │   └── tx_lookup.rs
//! │
//! ├── integration/      # Cross-crate flows
//! │   ├── lookup_flows.rs
//! │   ├── big_bits_flows.rs
//! │   └── runtime_flows.rs
//! │
//! └── support.rs        # Fixtures and log capture
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledger-tests
//!
//! # By category
//! cargo test -p ledger-tests integration::lookup_flows
//!
//! # Benchmarks
//! cargo bench -p ledger-tests
//! ```

pub mod benchmarks;
pub mod integration;
