//! # Log-Domain Conversions
//!
//! A big-bits value `v` encodes `log2(x)` with [`MANT_BITS`] fractional bits:
//! the high part `v >> 64` is the integer characteristic, the low 64 bits are
//! the mantissa.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::constants::{big_2e256, big_2e64, MANT_BITS};
use crate::error::BigBitsError;

/// Integer characteristic of a big-bits value: `floor(v / 2^64)`.
pub fn big_bits_to_bits(original: &BigUint) -> BigUint {
    original / big_2e64()
}

/// Full-precision form of a big-bits value: the exact ratio `v / 2^64`.
pub fn big_bits_to_bits_float(original: &BigUint) -> BigBitsRatio {
    BigBitsRatio {
        numerator: original.clone(),
    }
}

/// Element-wise [`big_bits_to_bits`].
pub fn big_bits_array_to_bits_array(original: &[BigUint]) -> Vec<BigUint> {
    original.iter().map(big_bits_to_bits).collect()
}

/// Convert a linear magnitude into its big-bits value `c * 2^64 + m`.
pub fn bits_to_big_bits(original: &BigUint) -> Result<BigUint, BigBitsError> {
    let (characteristic, mantissa) = binary_log(original, MANT_BITS)?;
    Ok((BigUint::from(characteristic) << MANT_BITS) + mantissa)
}

/// Log-domain reduction of a proof-of-work difficulty.
///
/// Same transform as [`bits_to_big_bits`]; the caller's value is only read.
pub fn log_big(diff: &BigUint) -> Result<BigUint, BigBitsError> {
    let (characteristic, mantissa) = binary_log(diff, MANT_BITS)?;
    Ok((BigUint::from(characteristic) << MANT_BITS) + mantissa)
}

/// Convert accumulated entropy back into difficulty bits:
/// `2^256 >> floor(v / 2^64)`. The fractional part of the exponent is dropped.
pub fn entropy_big_bits_to_difficulty_bits(big_bits: &BigUint) -> BigUint {
    match big_bits_to_bits(big_bits).to_u64() {
        Some(exponent) if exponent <= 256 => big_2e256() >> exponent,
        _ => BigUint::zero(),
    }
}

/// Binary logarithm of `n` as `(characteristic, mantissa)` with
/// `n ≈ 2^(characteristic + mantissa / 2^mantissa_bits)`.
///
/// The mantissa is produced one bit at a time by squaring the normalised value
/// `y = n / 2^characteristic` (in `[1, 2)`): whenever `y^2 >= 2` the next bit
/// is 1 and `y` is halved. `y` is held in fixed point with
/// `max(characteristic, mantissa_bits)` fractional bits, so small magnitudes
/// still get a full-width mantissa.
///
/// For `n >= 2^mantissa_bits` this is identical to a fixed point with
/// `characteristic` fractional bits. Below that the mantissa is more precise
/// than such a fixed point yields, so values under `2^64` are not
/// bit-compatible with big-bits values computed that way (`log2(3)` gives a
/// mantissa of about 0.585 rather than 0.5).
pub fn binary_log(n: &BigUint, mantissa_bits: u32) -> Result<(u64, BigUint), BigBitsError> {
    if n.is_zero() {
        return Err(BigBitsError::ZeroMagnitude);
    }

    let characteristic = n.bits() - 1;
    let precision = characteristic.max(u64::from(mantissa_bits));
    let two = BigUint::from(1u32) << (precision + 1);

    let mut y = n << (precision - characteristic);
    let mut mantissa = BigUint::zero();
    for _ in 0..mantissa_bits {
        y = (&y * &y) >> precision;
        mantissa <<= 1u32;
        if y >= two {
            mantissa += 1u32;
            y >>= 1u32;
        }
    }

    Ok((characteristic, mantissa))
}

/// Exact rational `numerator / 2^64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigBitsRatio {
    numerator: BigUint,
}

impl BigBitsRatio {
    /// The big-bits value itself.
    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    /// Always `2^64`.
    pub fn denominator(&self) -> &'static BigUint {
        big_2e64()
    }

    /// `floor(numerator / 2^64)`.
    pub fn integer_part(&self) -> BigUint {
        big_bits_to_bits(&self.numerator)
    }

    /// The low 64 bits: the mantissa.
    pub fn fractional_part(&self) -> u64 {
        self.numerator.iter_u64_digits().next().unwrap_or(0)
    }

    /// Nearest `f64`. Division by a power of two is exact in binary floating
    /// point, so the only rounding is in the numerator conversion.
    pub fn to_f64(&self) -> f64 {
        let numerator = self.numerator.to_f64().unwrap_or(f64::INFINITY);
        numerator / 2f64.powi(MANT_BITS as i32)
    }
}
