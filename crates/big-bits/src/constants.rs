//! # Canonical Constants
//!
//! The ten big integers every weight computation refers to. The process-wide
//! set is built once on first use and only ever handed out by shared
//! reference. Owned copies (snapshots, test fixtures) are ordinary values.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::ops::Index;
use std::sync::LazyLock;

/// Number of fractional bits in a big-bits value.
pub const MANT_BITS: u32 = 64;

static COMMON: LazyLock<ConstantSet> = LazyLock::new(ConstantSet::derive);

/// The process-wide canonical constant set.
pub fn common() -> &'static ConstantSet {
    &COMMON
}

/// `2^64`, the big-bits fixed-point scale.
pub fn big_2e64() -> &'static BigUint {
    &common()[Constant::TwoPow64]
}

/// `2^256`, the difficulty numerator.
pub fn big_2e256() -> &'static BigUint {
    &common()[Constant::TwoPow256]
}

/// Identifier of one canonical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Zero,
    One,
    Two,
    Three,
    Eight,
    ThirtyTwo,
    TwoFiftySix,
    TwoFiftySeven,
    TwoPow256,
    TwoPow64,
}

impl Constant {
    /// Every constant, in registry order.
    pub const ALL: [Constant; 10] = [
        Constant::Zero,
        Constant::One,
        Constant::Two,
        Constant::Three,
        Constant::Eight,
        Constant::ThirtyTwo,
        Constant::TwoFiftySix,
        Constant::TwoFiftySeven,
        Constant::TwoPow256,
        Constant::TwoPow64,
    ];

    /// Stable name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Constant::Zero => "big0",
            Constant::One => "big1",
            Constant::Two => "big2",
            Constant::Three => "big3",
            Constant::Eight => "big8",
            Constant::ThirtyTwo => "big32",
            Constant::TwoFiftySix => "big256",
            Constant::TwoFiftySeven => "big257",
            Constant::TwoPow256 => "big2e256",
            Constant::TwoPow64 => "big2e64",
        }
    }

    /// Build the value from first principles.
    pub fn derive(self) -> BigUint {
        match self {
            Constant::Zero => BigUint::zero(),
            Constant::One => BigUint::one(),
            Constant::Two => BigUint::from(2u32),
            Constant::Three => BigUint::from(3u32),
            Constant::Eight => BigUint::from(8u32),
            Constant::ThirtyTwo => BigUint::from(32u32),
            Constant::TwoFiftySix => BigUint::from(256u32),
            Constant::TwoFiftySeven => BigUint::from(257u32),
            Constant::TwoPow256 => BigUint::from(2u32).pow(256),
            Constant::TwoPow64 => BigUint::from(2u32).pow(MANT_BITS),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// A full set of canonical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantSet {
    values: [BigUint; 10],
}

impl ConstantSet {
    /// Build a fresh set by re-running every construction expression.
    pub fn derive() -> Self {
        Self {
            values: Constant::ALL.map(Constant::derive),
        }
    }

    /// Read one value.
    pub fn get(&self, constant: Constant) -> &BigUint {
        &self.values[constant.slot()]
    }

    /// Mutable access to one value of an owned set.
    ///
    /// The process-wide set is never reachable through this method; it is
    /// only exposed as `&'static ConstantSet`.
    pub fn value_mut(&mut self, constant: Constant) -> &mut BigUint {
        &mut self.values[constant.slot()]
    }

    /// First constant whose value differs between `self` and `other`.
    pub fn first_mismatch(&self, other: &ConstantSet) -> Option<Constant> {
        Constant::ALL
            .into_iter()
            .find(|c| self.get(*c) != other.get(*c))
    }

    /// Iterate `(constant, value)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Constant, &BigUint)> {
        Constant::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl Index<Constant> for ConstantSet {
    type Output = BigUint;

    fn index(&self, constant: Constant) -> &BigUint {
        self.get(constant)
    }
}
