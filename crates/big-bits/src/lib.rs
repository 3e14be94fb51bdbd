//! # Big-Bits Arithmetic
//!
//! Fixed-point base-2 logarithms for chain weight. A magnitude `x` (a
//! difficulty, an accumulated entropy) is carried as
//!
//! ```text
//! v = floor(log2(x) * 2^64)
//! ```
//!
//! in an arbitrary-precision integer, so values spanning 256+ bits can be
//! compared and summed without overflow.
//!
//! ## Crate Structure
//!
//! - `constants` - Process-wide canonical values (0, 1, 2, 3, 8, 32, 256, 257,
//!   2^256, 2^64) behind read-only accessors
//! - `arithmetic` - Conversions between linear and log-domain values
//! - `monitor` - Background watchdog that aborts the node if a canonical
//!   value is ever observed to differ from its construction
//!
//! ## Invariants
//!
//! | ID | Invariant |
//! |----|-----------|
//! | 1 | `big_bits_to_bits(bits_to_big_bits(x)) == floor(log2(x))` for `x >= 1` |
//! | 2 | `bits_to_big_bits` is monotonic in `x` |
//! | 3 | Canonical values are bit-identical for the lifetime of the process |
//!
//! ## Usage
//!
//! ```ignore
//! use big_bits::{bits_to_big_bits, entropy_big_bits_to_difficulty_bits};
//! use num_bigint::BigUint;
//!
//! let entropy = bits_to_big_bits(&BigUint::from(256u32))?;
//! let difficulty = entropy_big_bits_to_difficulty_bits(&entropy); // 2^248
//! ```

pub mod arithmetic;
pub mod constants;
pub mod error;
pub mod monitor;

pub use arithmetic::{
    big_bits_array_to_bits_array, big_bits_to_bits, big_bits_to_bits_float, binary_log,
    bits_to_big_bits, entropy_big_bits_to_difficulty_bits, log_big, BigBitsRatio,
};
pub use constants::{big_2e256, big_2e64, common, Constant, ConstantSet, MANT_BITS};
pub use error::{BigBitsError, IntegrityViolation, ViolationSite};
pub use monitor::{ConstantSource, IntegrityMonitor, MonitorConfig, ProcessConstants};
